use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

/// Pan offset and zoom mapping document space to screen space.
///
/// `zoom` is carried along but not applied to coordinates yet; every mapping
/// is a pure translation by `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub offset: Vec2,
    pub zoom: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(offset: Vec2) -> Self {
        Self { offset, zoom: 1.0 }
    }

    /// Map a document-space point to screen space
    pub fn to_screen(&self, pos: Pos2) -> Pos2 {
        pos + self.offset
    }

    /// Map a screen-space point to document space
    pub fn to_document(&self, pos: Pos2) -> Pos2 {
        pos - self.offset
    }

    /// Shift the view by a screen-space delta
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    #[test]
    fn test_mapping_is_inverse() {
        let viewport = Viewport::new(vec2(30.0, -12.0));
        let doc = pos2(5.0, 7.0);
        let screen = viewport.to_screen(doc);
        assert_eq!(screen, pos2(35.0, -5.0));
        assert_eq!(viewport.to_document(screen), doc);
    }

    #[test]
    fn test_pan_and_reset() {
        let mut viewport = Viewport::default();
        viewport.pan(vec2(10.0, 4.0));
        viewport.pan(vec2(-3.0, 1.0));
        assert_eq!(viewport.offset, vec2(7.0, 5.0));

        viewport.reset();
        assert_eq!(viewport, Viewport::default());
        assert_eq!(viewport.zoom, 1.0);
    }
}
