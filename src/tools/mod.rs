use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::document::Document;
use crate::element::{ElementId, ElementType};
use crate::event::CanvasEvent;
use crate::renderer::Renderer;
use crate::viewport::Viewport;

mod eraser_tool;
mod freedraw_tool;
mod pan_tool;
mod rect_tool;
mod selection_tool;

pub use eraser_tool::EraserTool;
pub use freedraw_tool::FreeDrawTool;
pub use pan_tool::PanTool;
pub use rect_tool::RectTool;
pub use selection_tool::SelectionTool;

/// Interaction mode deciding which gesture a pointer-down starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Select,
    Drag,
    #[default]
    Rect,
    FreeDraw,
    Erase,
}

impl Mode {
    pub const ALL: [Mode; 5] = [Mode::Select, Mode::Drag, Mode::Rect, Mode::FreeDraw, Mode::Erase];

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Select => "select",
            Mode::Drag => "drag",
            Mode::Rect => "rect",
            Mode::FreeDraw => "freedraw",
            Mode::Erase => "erase",
        }
    }
}

/// Everything a gesture may read or mutate while it runs
pub struct ToolContext<'a> {
    pub document: &'a mut Document,
    pub viewport: &'a mut Viewport,
    pub renderer: &'a mut Renderer,
    pub selected: &'a mut Option<ElementId>,
    pub screen_size: Vec2,
    pub color: &'a str,
    pub line_width: f32,
    /// Events to broadcast once the handler returns
    pub events: Vec<CanvasEvent>,
}

impl ToolContext<'_> {
    /// Mark the canvas dirty and queue an event describing why
    pub(crate) fn changed(&mut self, event: CanvasEvent) {
        self.renderer.request_redraw();
        if !self.events.contains(&event) {
            self.events.push(event);
        }
    }
}

/// One pointer gesture, from down through moves to up
pub trait Tool: Sized {
    fn name(&self) -> &'static str;

    /// Handle pointer drag while the pointer is held down
    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>);

    /// Finish the gesture. Return the history entry to record, if any.
    fn on_pointer_up(self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command>;

    /// Element being created, drawn on top of the document until committed
    fn preview(&self) -> Option<&ElementType> {
        None
    }
}

/// Enum representing the active gesture of each mode
#[derive(Debug, Clone)]
pub enum ToolType {
    Rect(RectTool),
    FreeDraw(FreeDrawTool),
    Pan(PanTool),
    Selection(SelectionTool),
    Eraser(EraserTool),
}

impl ToolType {
    /// Start the gesture for `mode` at a screen point.
    ///
    /// Returns None when the down event did not start a gesture.
    pub fn begin(mode: Mode, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Self> {
        match mode {
            Mode::Rect => Some(Self::Rect(RectTool::begin(pos, ctx))),
            Mode::FreeDraw => Some(Self::FreeDraw(FreeDrawTool::begin(pos, ctx))),
            Mode::Drag => Some(Self::Pan(PanTool::begin(pos))),
            Mode::Select => SelectionTool::begin(pos, ctx).map(Self::Selection),
            Mode::Erase => Some(Self::Eraser(EraserTool::begin(pos, ctx))),
        }
    }
}

impl Tool for ToolType {
    fn name(&self) -> &'static str {
        match self {
            Self::Rect(tool) => tool.name(),
            Self::FreeDraw(tool) => tool.name(),
            Self::Pan(tool) => tool.name(),
            Self::Selection(tool) => tool.name(),
            Self::Eraser(tool) => tool.name(),
        }
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) {
        match self {
            Self::Rect(tool) => tool.on_pointer_move(pos, ctx),
            Self::FreeDraw(tool) => tool.on_pointer_move(pos, ctx),
            Self::Pan(tool) => tool.on_pointer_move(pos, ctx),
            Self::Selection(tool) => tool.on_pointer_move(pos, ctx),
            Self::Eraser(tool) => tool.on_pointer_move(pos, ctx),
        }
    }

    fn on_pointer_up(self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command> {
        match self {
            Self::Rect(tool) => tool.on_pointer_up(pos, ctx),
            Self::FreeDraw(tool) => tool.on_pointer_up(pos, ctx),
            Self::Pan(tool) => tool.on_pointer_up(pos, ctx),
            Self::Selection(tool) => tool.on_pointer_up(pos, ctx),
            Self::Eraser(tool) => tool.on_pointer_up(pos, ctx),
        }
    }

    fn preview(&self) -> Option<&ElementType> {
        match self {
            Self::Rect(tool) => tool.preview(),
            Self::FreeDraw(tool) => tool.preview(),
            Self::Pan(tool) => tool.preview(),
            Self::Selection(tool) => tool.preview(),
            Self::Eraser(tool) => tool.preview(),
        }
    }
}
