use log::debug;

use super::{CanvasEvent, EventHandler};

/// Writes every canvas event to the debug log
#[derive(Debug, Default)]
pub struct LoggingHandler;

impl EventHandler for LoggingHandler {
    fn handle_event(&mut self, event: &CanvasEvent) {
        debug!("Canvas event: {:?}", event);
    }
}
