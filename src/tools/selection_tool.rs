use egui::{Pos2, Vec2};
use log::debug;

use super::{Tool, ToolContext};
use crate::command::Command;
use crate::element::{Element, ElementId};
use crate::event::CanvasEvent;

/// Selects the topmost element under the pointer and drags it
#[derive(Debug, Clone)]
pub struct SelectionTool {
    element: ElementId,
    /// Anchor of the element when the gesture started
    from: Pos2,
    last_pos: Pos2,
}

impl SelectionTool {
    /// Replace the selection with the element under `pos`.
    ///
    /// Only starts a drag gesture when something was hit.
    pub fn begin(pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Self> {
        let previous = ctx.selected.take();
        if let Some(element) = previous.and_then(|id| ctx.document.element_mut(id)) {
            element.set_selected(false);
        }

        let hit = ctx.document.hit_test(pos, ctx.viewport, ctx.screen_size);
        *ctx.selected = hit;
        if previous != hit {
            ctx.changed(CanvasEvent::SelectionChanged(hit));
        }

        let id = hit?;
        let element = ctx.document.element_mut(id)?;
        element.set_selected(true);
        ctx.renderer.request_redraw();
        debug!("Selected {} {}", element.element_type(), id);

        Some(Self {
            element: id,
            from: element.anchor(),
            last_pos: pos,
        })
    }

    fn drag_to(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) {
        let delta = pos - self.last_pos;
        self.last_pos = pos;
        if delta == Vec2::ZERO {
            return;
        }
        if let Some(element) = ctx.document.element_mut(self.element) {
            element.drag(delta);
            ctx.changed(CanvasEvent::ElementsChanged);
        }
    }
}

impl Tool for SelectionTool {
    fn name(&self) -> &'static str {
        "select"
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) {
        self.drag_to(pos, ctx);
    }

    fn on_pointer_up(mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command> {
        // The up position counts as the last move so the recorded delta
        // matches what was applied.
        self.drag_to(pos, ctx);

        let to = ctx.document.element(self.element)?.anchor();
        if to == self.from {
            return None;
        }
        debug!("Moved {} by {:?}", self.element, to - self.from);
        Some(Command::Move {
            id: self.element,
            from: self.from,
            to,
        })
    }
}
