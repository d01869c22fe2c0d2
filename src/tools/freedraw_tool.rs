use egui::Pos2;
use log::debug;

use super::{Tool, ToolContext};
use crate::command::Command;
use crate::element::{ElementType, FreeDraw};
use crate::event::CanvasEvent;
use crate::renderer::Segment;

/// Records a freehand stroke, stroking each new segment as it arrives
#[derive(Debug, Clone)]
pub struct FreeDrawTool {
    element: ElementType,
    /// Last local point appended to the stroke
    last_point: Pos2,
    /// Last screen position seen
    last_pos: Pos2,
}

impl FreeDrawTool {
    pub fn begin(pos: Pos2, ctx: &mut ToolContext<'_>) -> Self {
        let start = ctx.viewport.to_document(pos);
        let mut stroke = FreeDraw::new(start, ctx.color);
        stroke.set_line_width(ctx.line_width);
        debug!("Freehand stroke started at {:?}", start);

        ctx.renderer.queue_segment(Segment {
            from: pos,
            to: pos,
            color: ctx.color.to_owned(),
            line_width: ctx.line_width,
        });

        Self {
            element: ElementType::FreeDraw(stroke),
            last_point: Pos2::ZERO,
            last_pos: pos,
        }
    }
}

impl Tool for FreeDrawTool {
    fn name(&self) -> &'static str {
        "freedraw"
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) {
        let ElementType::FreeDraw(stroke) = &mut self.element else {
            return;
        };

        let point = self.last_point + (pos - self.last_pos);
        self.last_pos = pos;
        self.last_point = point;

        if let Some((from, to)) = stroke.add_point(point) {
            ctx.renderer.queue_segment(Segment {
                from: stroke.to_screen(from, ctx.viewport),
                to: stroke.to_screen(to, ctx.viewport),
                color: ctx.color.to_owned(),
                line_width: stroke.line_width(),
            });
        }
    }

    fn on_pointer_up(self, _pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command> {
        let id = ctx.document.push(self.element);
        ctx.changed(CanvasEvent::ElementsChanged);
        debug!("Freehand stroke {} committed", id);
        Some(Command::Create { id })
    }

    fn preview(&self) -> Option<&ElementType> {
        Some(&self.element)
    }
}
