mod bus;
mod events;
mod handlers;

pub use bus::EventBus;
pub use events::CanvasEvent;
pub use handlers::LoggingHandler;

/// Receives every event broadcast on an `EventBus`
pub trait EventHandler {
    fn handle_event(&mut self, event: &CanvasEvent);
}
