// src/renderer.rs
use egui::{Pos2, Rect, Vec2};
use log::debug;

use crate::document::Document;
use crate::element::{Element, ElementType};
use crate::viewport::Viewport;

/// Immediate-mode 2D drawing target.
///
/// Colors are CSS color strings, coordinates are screen space.
pub trait RenderSurface {
    fn set_stroke_style(&mut self, color: &str);
    fn set_fill_style(&mut self, color: &str);
    fn set_line_width(&mut self, width: f32);
    fn stroke_rect(&mut self, rect: Rect);
    fn fill_rect(&mut self, rect: Rect);
    fn clear_rect(&mut self, rect: Rect);
    fn begin_path(&mut self);
    fn move_to(&mut self, pos: Pos2);
    fn line_to(&mut self, pos: Pos2);
    fn stroke(&mut self);
}

/// A screen-space line segment queued for incremental drawing
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub from: Pos2,
    pub to: Pos2,
    pub color: String,
    pub line_width: f32,
}

/// Redraw bookkeeping for the canvas.
///
/// Every mutating entry point marks the renderer dirty; the next `render`
/// clears the surface and draws the visible elements in z-order. When nothing
/// is dirty only queued freehand segments are stroked.
#[derive(Debug)]
pub struct Renderer {
    dirty: bool,
    pending_segments: Vec<Segment>,
    frames: u64,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            dirty: true,
            pending_segments: Vec::new(),
            frames: 0,
        }
    }

    pub fn request_redraw(&mut self) {
        self.dirty = true;
    }

    pub fn needs_redraw(&self) -> bool {
        self.dirty
    }

    pub fn queue_segment(&mut self, segment: Segment) {
        self.pending_segments.push(segment);
    }

    pub fn pending_segments(&self) -> &[Segment] {
        &self.pending_segments
    }

    /// Number of full redraws performed so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Draw whatever changed since the last call.
    ///
    /// Returns true if a full redraw happened.
    pub fn render(
        &mut self,
        surface: &mut dyn RenderSurface,
        document: &Document,
        viewport: &Viewport,
        screen_size: Vec2,
        preview: Option<&ElementType>,
    ) -> bool {
        if self.dirty {
            self.render_all(surface, document, viewport, screen_size, preview);
            return true;
        }

        for segment in self.pending_segments.drain(..) {
            surface.set_line_width(segment.line_width);
            surface.set_stroke_style(&segment.color);
            surface.begin_path();
            surface.move_to(segment.from);
            surface.line_to(segment.to);
            surface.stroke();
        }
        false
    }

    /// Clear the surface and redraw every visible element, then the preview
    pub fn render_all(
        &mut self,
        surface: &mut dyn RenderSurface,
        document: &Document,
        viewport: &Viewport,
        screen_size: Vec2,
        preview: Option<&ElementType>,
    ) {
        surface.clear_rect(Rect::from_min_size(Pos2::ZERO, screen_size));

        let mut drawn = 0;
        for element in document.visible(viewport, screen_size) {
            element.draw(viewport, surface);
            drawn += 1;
        }
        if let Some(preview) = preview {
            preview.draw(viewport, surface);
        }

        self.dirty = false;
        self.pending_segments.clear();
        self.frames += 1;
        debug!("Redrew canvas: {} of {} elements visible", drawn, document.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::factory;
    use egui::{pos2, vec2};

    #[derive(Default)]
    struct CountingSurface {
        clears: usize,
        rects: usize,
        strokes: usize,
    }

    impl RenderSurface for CountingSurface {
        fn set_stroke_style(&mut self, _color: &str) {}
        fn set_fill_style(&mut self, _color: &str) {}
        fn set_line_width(&mut self, _width: f32) {}
        fn stroke_rect(&mut self, _rect: Rect) {
            self.rects += 1;
        }
        fn fill_rect(&mut self, _rect: Rect) {}
        fn clear_rect(&mut self, _rect: Rect) {
            self.clears += 1;
        }
        fn begin_path(&mut self) {}
        fn move_to(&mut self, _pos: Pos2) {}
        fn line_to(&mut self, _pos: Pos2) {}
        fn stroke(&mut self) {
            self.strokes += 1;
        }
    }

    #[test]
    fn test_renderer_starts_dirty() {
        let renderer = Renderer::new();
        assert!(renderer.needs_redraw());
        assert_eq!(renderer.frames(), 0);
    }

    #[test]
    fn test_render_culls_offscreen_elements() {
        let mut document = Document::new();
        document.push(factory::create_rectangle(pos2(10.0, 10.0), vec2(20.0, 20.0), "#000"));
        document.push(factory::create_rectangle(pos2(500.0, 500.0), vec2(20.0, 20.0), "#000"));

        let mut renderer = Renderer::new();
        let mut surface = CountingSurface::default();
        let full = renderer.render(&mut surface, &document, &Viewport::default(), vec2(100.0, 100.0), None);

        assert!(full);
        assert_eq!(surface.clears, 1);
        assert_eq!(surface.rects, 1);
        assert!(!renderer.needs_redraw());
    }

    #[test]
    fn test_clean_render_only_strokes_segments() {
        let document = Document::new();
        let mut renderer = Renderer::new();
        let mut surface = CountingSurface::default();
        renderer.render(&mut surface, &document, &Viewport::default(), vec2(100.0, 100.0), None);

        renderer.queue_segment(Segment {
            from: pos2(1.0, 1.0),
            to: pos2(2.0, 2.0),
            color: "#000".to_owned(),
            line_width: 1.0,
        });
        let full = renderer.render(&mut surface, &document, &Viewport::default(), vec2(100.0, 100.0), None);

        assert!(!full);
        assert_eq!(surface.clears, 1);
        assert_eq!(surface.strokes, 1);
        assert!(renderer.pending_segments().is_empty());
    }
}
