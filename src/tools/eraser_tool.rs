use egui::Pos2;
use log::debug;

use super::{Tool, ToolContext};
use crate::command::Command;
use crate::document::Removal;
use crate::element::Element;
use crate::event::CanvasEvent;

/// Removes every visible element the pointer passes over.
///
/// Everything erased during one gesture becomes a single delete entry.
#[derive(Debug, Clone, Default)]
pub struct EraserTool {
    removed: Vec<Removal>,
}

impl EraserTool {
    pub fn begin(pos: Pos2, ctx: &mut ToolContext<'_>) -> Self {
        let mut tool = Self::default();
        tool.erase_at(pos, ctx);
        tool
    }

    fn erase_at(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) {
        let viewport = *ctx.viewport;
        let screen_size = ctx.screen_size;
        let removed = ctx.document.remove_where(|element| {
            element.is_on_screen(&viewport, screen_size) && element.check_click(pos, &viewport)
        });

        if !removed.is_empty() {
            debug!("Erased {} element(s) at {:?}", removed.len(), pos);
            self.removed.extend(removed);
            ctx.changed(CanvasEvent::ElementsChanged);
        }
    }

    pub fn removed(&self) -> &[Removal] {
        &self.removed
    }
}

impl Tool for EraserTool {
    fn name(&self) -> &'static str {
        "erase"
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) {
        self.erase_at(pos, ctx);
    }

    fn on_pointer_up(self, _pos: Pos2, _ctx: &mut ToolContext<'_>) -> Option<Command> {
        if self.removed.is_empty() {
            return None;
        }
        Some(Command::Delete {
            removed: self.removed,
        })
    }
}
