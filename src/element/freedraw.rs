use egui::{Pos2, Rect, Vec2};

use super::{Element, ElementError, ElementId, common};
use crate::renderer::RenderSurface;
use crate::viewport::Viewport;

/// Freehand polyline.
///
/// Points are stored relative to `start` and the first point is always the
/// local origin. The bounding box covers `points` only and grows as points
/// are appended; dragging moves `start` and leaves the points untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct FreeDraw {
    id: ElementId,
    start: Pos2,
    points: Vec<Pos2>,
    min: Pos2,
    max: Pos2,
    color: String,
    line_width: f32,
    selected: bool,
}

impl FreeDraw {
    /// Start a new stroke anchored at `start`, seeded with the local origin
    pub fn new(start: Pos2, color: &str) -> Self {
        Self {
            id: ElementId::new(),
            start,
            points: vec![Pos2::ZERO],
            min: Pos2::ZERO,
            max: Pos2::ZERO,
            color: color.to_owned(),
            line_width: common::DEFAULT_LINE_WIDTH,
            selected: false,
        }
    }

    /// Rebuild a stroke from stored parts without recomputing its bounds
    pub fn from_parts(start: Pos2, points: Vec<Pos2>, min: Pos2, max: Pos2, color: &str) -> Self {
        Self {
            id: ElementId::new(),
            start,
            points,
            min,
            max,
            color: color.to_owned(),
            line_width: common::DEFAULT_LINE_WIDTH,
            selected: false,
        }
    }

    /// Append a local point, returning the local segment it closes
    pub fn add_point(&mut self, point: Pos2) -> Option<(Pos2, Pos2)> {
        let previous = self.points.last().copied();
        self.points.push(point);

        self.min = self.min.min(point);
        self.max = self.max.max(point);

        previous.map(|previous| (previous, point))
    }

    pub fn start(&self) -> Pos2 {
        self.start
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn min(&self) -> Pos2 {
        self.min
    }

    pub fn max(&self) -> Pos2 {
        self.max
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub fn set_line_width(&mut self, line_width: f32) {
        self.line_width = line_width;
    }

    pub fn local_to_document(&self, point: Pos2) -> Pos2 {
        self.start + point.to_vec2()
    }

    pub fn to_screen(&self, point: Pos2, viewport: &Viewport) -> Pos2 {
        viewport.to_screen(self.local_to_document(point))
    }

    /// Stroke a single local segment, used while the stroke is being drawn
    pub fn draw_segment(&self, from: Pos2, to: Pos2, viewport: &Viewport, surface: &mut dyn RenderSurface) {
        surface.set_line_width(self.line_width);
        surface.set_stroke_style(&self.color);
        surface.begin_path();
        surface.move_to(self.to_screen(from, viewport));
        surface.line_to(self.to_screen(to, viewport));
        surface.stroke();
    }
}

impl Element for FreeDraw {
    fn id(&self) -> ElementId {
        self.id
    }

    fn element_type(&self) -> &'static str {
        "freedraw"
    }

    fn bounds(&self) -> Rect {
        Rect::from_min_max(self.local_to_document(self.min), self.local_to_document(self.max))
    }

    fn anchor(&self) -> Pos2 {
        self.start
    }

    fn set_anchor(&mut self, anchor: Pos2) {
        self.start = anchor;
    }

    fn draw(&self, viewport: &Viewport, surface: &mut dyn RenderSurface) {
        surface.set_line_width(self.line_width);
        surface.set_stroke_style(&self.color);
        surface.begin_path();
        for (i, point) in self.points.iter().enumerate() {
            let screen = self.to_screen(*point, viewport);
            if i == 0 {
                surface.move_to(screen);
            } else {
                surface.line_to(screen);
            }
        }
        surface.stroke();

        if self.selected {
            common::draw_selection_frame(self.bounds(), viewport, surface);
        }
    }

    fn resize(&mut self, _delta: Vec2) -> Result<(), ElementError> {
        Err(ElementError::NotImplemented {
            operation: "resize",
            element: "freedraw",
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
    use egui::{pos2, vec2};

    #[test]
    fn test_bounds_grow_incrementally() {
        let mut stroke = FreeDraw::new(pos2(100.0, 100.0), "#000");
        assert_eq!(stroke.points(), &[Pos2::ZERO]);

        assert_eq!(stroke.add_point(pos2(5.0, -3.0)), Some((Pos2::ZERO, pos2(5.0, -3.0))));
        stroke.add_point(pos2(-2.0, 8.0));

        assert_eq!(stroke.min(), pos2(-2.0, -3.0));
        assert_eq!(stroke.max(), pos2(5.0, 8.0));
        assert_eq!(
            stroke.bounds(),
            Rect::from_min_max(pos2(98.0, 97.0), pos2(105.0, 108.0))
        );
    }

    #[test]
    fn test_drag_moves_start_only() {
        let mut stroke = FreeDraw::new(pos2(10.0, 10.0), "#000");
        stroke.add_point(pos2(4.0, 4.0));
        let points = stroke.points().to_vec();

        stroke.drag(vec2(6.0, -2.0));

        assert_eq!(stroke.start(), pos2(16.0, 8.0));
        assert_eq!(stroke.points(), points.as_slice());
        assert_eq!(stroke.to_screen(pos2(4.0, 4.0), &Viewport::new(vec2(1.0, 1.0))), pos2(21.0, 13.0));
    }

    #[test]
    fn test_resize_is_not_implemented() {
        let mut stroke = FreeDraw::new(Pos2::ZERO, "#000");
        assert_eq!(
            stroke.resize(vec2(1.0, 1.0)),
            Err(ElementError::NotImplemented {
                operation: "resize",
                element: "freedraw",
            })
        );
    }
}
