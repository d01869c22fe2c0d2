use egui::{Pos2, Vec2};

use super::{Tool, ToolContext};
use crate::command::Command;
use crate::event::CanvasEvent;

/// Pans the view. View changes never enter the history.
#[derive(Debug, Clone)]
pub struct PanTool {
    last_pos: Pos2,
}

impl PanTool {
    pub fn begin(pos: Pos2) -> Self {
        Self { last_pos: pos }
    }
}

impl Tool for PanTool {
    fn name(&self) -> &'static str {
        "drag"
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) {
        let delta = pos - self.last_pos;
        self.last_pos = pos;
        if delta == Vec2::ZERO {
            return;
        }

        ctx.viewport.pan(delta);
        let event = CanvasEvent::ViewChanged {
            offset: ctx.viewport.offset,
            zoom: ctx.viewport.zoom,
        };
        ctx.changed(event);
    }

    fn on_pointer_up(self, _pos: Pos2, _ctx: &mut ToolContext<'_>) -> Option<Command> {
        None
    }
}
