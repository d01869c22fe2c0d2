use egui::{Key, KeyboardShortcut, Modifiers, Rect};
use log::{info, warn};

use crate::canvas::Canvas;
use crate::config::CanvasConfig;
use crate::event::LoggingHandler;
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};

const UNDO_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);
const REDO_SHORTCUT: KeyboardShortcut =
    KeyboardShortcut::new(Modifiers::COMMAND.plus(Modifiers::SHIFT), Key::Z);

/// Desktop host for a single canvas
#[derive(Debug)]
pub struct CanvasApp {
    canvas: Canvas,
    input: InputHandler,
    /// Outcome of the last save or load, shown in the tools panel
    status: Option<String>,
}

impl Default for CanvasApp {
    fn default() -> Self {
        Self::with_config(CanvasConfig::default())
    }
}

impl CanvasApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Restore the settings of the previous session, if any
        let config = cc
            .storage
            .and_then(|storage| eframe::get_value::<CanvasConfig>(storage, eframe::APP_KEY))
            .unwrap_or_default();
        Self::with_config(config)
    }

    pub fn with_config(config: CanvasConfig) -> Self {
        let canvas = Canvas::with_config(config);
        canvas.subscribe(Box::new(LoggingHandler));
        Self {
            canvas,
            input: InputHandler::new(Rect::NOTHING),
            status: None,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn input_mut(&mut self) -> &mut InputHandler {
        &mut self.input
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn undo(&mut self) {
        if let Err(err) = self.canvas.undo() {
            warn!("Undo failed: {}", err);
        }
    }

    pub fn redo(&mut self) {
        if let Err(err) = self.canvas.redo() {
            warn!("Redo failed: {}", err);
        }
    }

    /// Write the drawing to the configured save file
    pub fn save(&mut self) {
        let path = self.canvas.config().save_path.clone();
        self.status = Some(match self.canvas.save_to_path(&path) {
            Ok(()) => format!("Saved to {}", path.display()),
            Err(err) => {
                warn!("Saving to {} failed: {}", path.display(), err);
                format!("Save failed: {}", err)
            }
        });
    }

    /// Replace the drawing with the configured save file
    pub fn load(&mut self) {
        let path = self.canvas.config().save_path.clone();
        self.status = Some(match self.canvas.load_from_path(&path) {
            Ok(()) => format!("Loaded {}", path.display()),
            Err(err) => {
                warn!("Loading {} failed: {}", path.display(), err);
                format!("Load failed: {}", err)
            }
        });
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        // Redo first, undo would also match Ctrl+Shift+Z
        if ctx.input_mut(|i| i.consume_shortcut(&REDO_SHORTCUT)) {
            info!("Redo shortcut");
            self.redo();
        } else if ctx.input_mut(|i| i.consume_shortcut(&UNDO_SHORTCUT)) {
            info!("Undo shortcut");
            self.undo();
        }
    }
}

impl eframe::App for CanvasApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self.canvas.config());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);
        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}
