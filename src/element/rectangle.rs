use egui::{Pos2, Rect, Vec2, pos2, vec2};

use super::{Element, ElementError, ElementId, common};
use crate::renderer::RenderSurface;
use crate::viewport::Viewport;

/// Axis-aligned rectangle outline in document space
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    id: ElementId,
    pub x: f32,
    pub y: f32,
    /// May be negative while a gesture is still shaping the rectangle
    pub width: f32,
    pub height: f32,
    color: String,
    line_width: f32,
    selected: bool,
}

impl Rectangle {
    /// Create an empty rectangle at `origin`
    pub fn new(origin: Pos2, color: &str) -> Self {
        Self::from_parts(origin, Vec2::ZERO, color)
    }

    pub fn from_parts(origin: Pos2, size: Vec2, color: &str) -> Self {
        Self {
            id: ElementId::new(),
            x: origin.x,
            y: origin.y,
            width: size.x,
            height: size.y,
            color: color.to_owned(),
            line_width: common::DEFAULT_LINE_WIDTH,
            selected: false,
        }
    }

    /// Reshape so the rectangle spans from `anchor` to `current`, whichever
    /// direction the pointer went.
    pub fn span(&mut self, anchor: Pos2, current: Pos2) {
        self.x = anchor.x.min(current.x);
        self.y = anchor.y.min(current.y);
        self.width = (current.x - anchor.x).abs();
        self.height = (current.y - anchor.y).abs();
    }

    pub fn origin(&self) -> Pos2 {
        pos2(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        vec2(self.width, self.height)
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub fn set_line_width(&mut self, line_width: f32) {
        self.line_width = line_width;
    }
}

impl Element for Rectangle {
    fn id(&self) -> ElementId {
        self.id
    }

    fn element_type(&self) -> &'static str {
        "rectangle"
    }

    fn bounds(&self) -> Rect {
        Rect::from_min_max(self.origin(), self.origin() + self.size())
    }

    fn anchor(&self) -> Pos2 {
        self.origin()
    }

    fn set_anchor(&mut self, anchor: Pos2) {
        self.x = anchor.x;
        self.y = anchor.y;
    }

    fn draw(&self, viewport: &Viewport, surface: &mut dyn RenderSurface) {
        surface.set_stroke_style(&self.color);
        surface.set_line_width(self.line_width);
        surface.stroke_rect(Rect::from_min_size(viewport.to_screen(self.origin()), self.size()));

        if self.selected {
            common::draw_selection_frame(self.bounds(), viewport, surface);
        }
    }

    fn resize(&mut self, _delta: Vec2) -> Result<(), ElementError> {
        Err(ElementError::NotImplemented {
            operation: "resize",
            element: "rectangle",
        })
    }

    fn is_selected(&self) -> bool {
        self.selected
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    fn color(&self) -> &str {
        &self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_in_every_direction() {
        let anchor = pos2(50.0, 50.0);
        let mut rect = Rectangle::new(anchor, "#000");

        rect.span(anchor, pos2(70.0, 80.0));
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (50.0, 50.0, 20.0, 30.0));

        rect.span(anchor, pos2(30.0, 80.0));
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (30.0, 50.0, 20.0, 30.0));

        rect.span(anchor, pos2(30.0, 10.0));
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (30.0, 10.0, 20.0, 40.0));

        rect.span(anchor, pos2(60.0, 45.0));
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (50.0, 45.0, 10.0, 5.0));
    }

    #[test]
    fn test_negative_size_is_never_hit() {
        let mut rect = Rectangle::from_parts(pos2(10.0, 10.0), vec2(-5.0, -5.0), "#000");
        let viewport = Viewport::default();
        assert!(!rect.check_click(pos2(8.0, 8.0), &viewport));

        rect.span(pos2(10.0, 10.0), pos2(5.0, 5.0));
        assert!(rect.check_click(pos2(8.0, 8.0), &viewport));
    }
}
