use egui::Pos2;
use log::debug;

use super::{Tool, ToolContext};
use crate::command::Command;
use crate::element::{ElementType, Rectangle};
use crate::event::CanvasEvent;

/// Drags out a rectangle from the down point to the pointer
#[derive(Debug, Clone)]
pub struct RectTool {
    /// Document-space corner the gesture started at
    anchor: Pos2,
    element: ElementType,
}

impl RectTool {
    pub fn begin(pos: Pos2, ctx: &mut ToolContext<'_>) -> Self {
        let anchor = ctx.viewport.to_document(pos);
        let mut rect = Rectangle::new(anchor, ctx.color);
        rect.set_line_width(ctx.line_width);
        debug!("Rectangle started at {:?}", anchor);

        Self {
            anchor,
            element: ElementType::Rectangle(rect),
        }
    }
}

impl Tool for RectTool {
    fn name(&self) -> &'static str {
        "rect"
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) {
        if let ElementType::Rectangle(rect) = &mut self.element {
            rect.span(self.anchor, ctx.viewport.to_document(pos));
        }
        ctx.renderer.request_redraw();
    }

    fn on_pointer_up(self, _pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command> {
        let id = ctx.document.push(self.element);
        ctx.changed(CanvasEvent::ElementsChanged);
        debug!("Rectangle {} committed", id);
        Some(Command::Create { id })
    }

    fn preview(&self) -> Option<&ElementType> {
        Some(&self.element)
    }
}
