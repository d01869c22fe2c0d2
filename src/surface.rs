use egui::{Color32, Painter, Pos2, Rect, Shape, Stroke, Vec2};
use log::trace;

use crate::color::parse_css_color;
use crate::renderer::RenderSurface;

/// Draws canvas output with an egui `Painter`.
///
/// Canvas coordinates are offset by the top-left corner of the area the
/// painter was allocated for.
pub struct EguiSurface<'a> {
    painter: &'a Painter,
    origin: Vec2,
    background: Color32,
    stroke_color: Color32,
    fill_color: Color32,
    line_width: f32,
    subpaths: Vec<Vec<Pos2>>,
}

impl<'a> EguiSurface<'a> {
    pub fn new(painter: &'a Painter, canvas_rect: Rect, background: &str) -> Self {
        Self {
            painter,
            origin: canvas_rect.min.to_vec2(),
            background: to_color(background),
            stroke_color: Color32::BLACK,
            fill_color: Color32::BLACK,
            line_width: 1.0,
            subpaths: Vec::new(),
        }
    }

    fn to_window(&self, pos: Pos2) -> Pos2 {
        pos + self.origin
    }

    fn to_window_rect(&self, rect: Rect) -> Rect {
        // Canvas rects may come with a negative size
        Rect::from_two_pos(self.to_window(rect.min), self.to_window(rect.max))
    }

    fn stroke_style(&self) -> Stroke {
        Stroke::new(self.line_width, self.stroke_color)
    }
}

fn to_color(css: &str) -> Color32 {
    parse_css_color(css).unwrap_or_else(|| {
        trace!("Unrecognized color {:?}, using black", css);
        Color32::BLACK
    })
}

impl RenderSurface for EguiSurface<'_> {
    fn set_stroke_style(&mut self, color: &str) {
        self.stroke_color = to_color(color);
    }

    fn set_fill_style(&mut self, color: &str) {
        self.fill_color = to_color(color);
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    fn stroke_rect(&mut self, rect: Rect) {
        let rect = self.to_window_rect(rect);
        self.painter.rect_stroke(rect, 0.0, self.stroke_style());
    }

    fn fill_rect(&mut self, rect: Rect) {
        let rect = self.to_window_rect(rect);
        self.painter.rect_filled(rect, 0.0, self.fill_color);
    }

    fn clear_rect(&mut self, rect: Rect) {
        let rect = self.to_window_rect(rect);
        self.painter.rect_filled(rect, 0.0, self.background);
    }

    fn begin_path(&mut self) {
        self.subpaths.clear();
    }

    fn move_to(&mut self, pos: Pos2) {
        let pos = self.to_window(pos);
        self.subpaths.push(vec![pos]);
    }

    fn line_to(&mut self, pos: Pos2) {
        let pos = self.to_window(pos);
        match self.subpaths.last_mut() {
            Some(path) => path.push(pos),
            None => self.subpaths.push(vec![pos]),
        }
    }

    fn stroke(&mut self) {
        let stroke = self.stroke_style();
        for path in &self.subpaths {
            match path.as_slice() {
                [] => {}
                // A zero-length path still leaves a dot, like a round cap would
                [point, ..] if path.iter().all(|p| p == point) => {
                    self.painter
                        .circle_filled(*point, (stroke.width / 2.0).max(0.5), stroke.color);
                }
                _ => {
                    self.painter.add(Shape::line(path.clone(), stroke));
                }
            }
        }
    }
}
