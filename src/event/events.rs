use egui::Vec2;

use crate::element::ElementId;
use crate::tools::Mode;

/// State changes broadcast by the canvas
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    ModeChanged {
        old: Mode,
        new: Mode,
    },
    SelectionChanged(Option<ElementId>),
    /// Elements were added, removed, moved or restored
    ElementsChanged,
    ViewChanged {
        offset: Vec2,
        zoom: f32,
    },
    SurfaceResized {
        size: Vec2,
    },
    HistoryChanged {
        position: usize,
        len: usize,
    },
    Loaded {
        count: usize,
    },
    Saved {
        count: usize,
    },
}
