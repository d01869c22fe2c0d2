#![allow(dead_code)]

use eframe_canvas::{Canvas, InputSource, RenderSurface};
use egui::{Pos2, Rect, pos2, vec2};

/// One call made against a `RecordingSurface`
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    StrokeStyle(String),
    FillStyle(String),
    LineWidth(f32),
    StrokeRect(Rect),
    FillRect(Rect),
    ClearRect(Rect),
    BeginPath,
    MoveTo(Pos2),
    LineTo(Pos2),
    Stroke,
}

/// Surface that remembers every call so tests can inspect the output
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn stroked_rects(&self) -> Vec<Rect> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::StrokeRect(rect) => Some(*rect),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: &DrawCall) -> usize {
        self.calls.iter().filter(|call| *call == wanted).count()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl RenderSurface for RecordingSurface {
    fn set_stroke_style(&mut self, color: &str) {
        self.calls.push(DrawCall::StrokeStyle(color.to_owned()));
    }
    fn set_fill_style(&mut self, color: &str) {
        self.calls.push(DrawCall::FillStyle(color.to_owned()));
    }
    fn set_line_width(&mut self, width: f32) {
        self.calls.push(DrawCall::LineWidth(width));
    }
    fn stroke_rect(&mut self, rect: Rect) {
        self.calls.push(DrawCall::StrokeRect(rect));
    }
    fn fill_rect(&mut self, rect: Rect) {
        self.calls.push(DrawCall::FillRect(rect));
    }
    fn clear_rect(&mut self, rect: Rect) {
        self.calls.push(DrawCall::ClearRect(rect));
    }
    fn begin_path(&mut self) {
        self.calls.push(DrawCall::BeginPath);
    }
    fn move_to(&mut self, pos: Pos2) {
        self.calls.push(DrawCall::MoveTo(pos));
    }
    fn line_to(&mut self, pos: Pos2) {
        self.calls.push(DrawCall::LineTo(pos));
    }
    fn stroke(&mut self) {
        self.calls.push(DrawCall::Stroke);
    }
}

/// A canvas with an 800x600 surface so culling keeps ordinary elements
pub fn canvas() -> Canvas {
    let mut canvas = Canvas::new();
    canvas.resize_surface(vec2(800.0, 600.0));
    canvas
}

/// Run a full mouse gesture through the given screen points
pub fn drag(canvas: &mut Canvas, points: &[Pos2]) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    canvas.pointer_down(*first, InputSource::Mouse);
    for point in rest {
        canvas.pointer_move(*point, InputSource::Mouse);
    }
    let last = rest.last().unwrap_or(first);
    canvas.pointer_up(*last, InputSource::Mouse);
}

/// Drag out a rectangle from `from` to `to` in rect mode
pub fn draw_rect(canvas: &mut Canvas, from: Pos2, to: Pos2) {
    canvas.set_mode(eframe_canvas::Mode::Rect);
    drag(canvas, &[from, to]);
}

pub fn p(x: f32, y: f32) -> Pos2 {
    pos2(x, y)
}
