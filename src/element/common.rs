use egui::{Pos2, Rect, Vec2};

use crate::renderer::RenderSurface;
use crate::viewport::Viewport;

// Common constants for all element types
pub const DEFAULT_COLOR: &str = "hwb(0 0% 100%)";
pub const DEFAULT_LINE_WIDTH: f32 = 1.0;
pub const SELECTION_FRAME_COLOR: &str = "#00f";
pub const SELECTION_FRAME_WIDTH: f32 = 2.0;
pub const SELECTION_FRAME_PADDING: f32 = 2.0;

/// Open-interval test of a screen point against a document-space box.
///
/// Points exactly on an edge are outside.
pub(crate) fn contains_open(bounds: Rect, viewport: &Viewport, pos: Pos2) -> bool {
    let min = viewport.to_screen(bounds.min);
    let max = viewport.to_screen(bounds.max);
    max.x > pos.x && max.y > pos.y && min.x < pos.x && min.y < pos.y
}

/// Open-interval overlap of a document-space box with the `[0, size]` screen area
pub(crate) fn overlaps_screen(bounds: Rect, viewport: &Viewport, screen_size: Vec2) -> bool {
    let min = viewport.to_screen(bounds.min);
    let max = viewport.to_screen(bounds.max);
    max.x > 0.0 && max.y > 0.0 && min.x < screen_size.x && min.y < screen_size.y
}

/// Draw the outset frame marking a selected element
pub(crate) fn draw_selection_frame(bounds: Rect, viewport: &Viewport, surface: &mut dyn RenderSurface) {
    let min = viewport.to_screen(bounds.min);
    let pad = Vec2::splat(SELECTION_FRAME_PADDING);

    surface.set_stroke_style(SELECTION_FRAME_COLOR);
    surface.set_line_width(SELECTION_FRAME_WIDTH);
    surface.stroke_rect(Rect::from_min_size(min - pad, bounds.size() + pad * 2.0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    #[test]
    fn test_edges_are_excluded() {
        let bounds = Rect::from_min_max(pos2(10.0, 10.0), pos2(20.0, 20.0));
        let viewport = Viewport::default();

        assert!(contains_open(bounds, &viewport, pos2(15.0, 15.0)));
        assert!(!contains_open(bounds, &viewport, pos2(10.0, 15.0)));
        assert!(!contains_open(bounds, &viewport, pos2(15.0, 20.0)));
    }

    #[test]
    fn test_offset_applies_to_both_tests() {
        let bounds = Rect::from_min_max(pos2(-50.0, -50.0), pos2(-40.0, -40.0));
        let screen = vec2(100.0, 100.0);

        assert!(!overlaps_screen(bounds, &Viewport::default(), screen));

        let panned = Viewport::new(vec2(45.0, 45.0));
        assert!(overlaps_screen(bounds, &panned, screen));
        assert!(contains_open(bounds, &panned, pos2(2.0, 2.0)));
    }
}
