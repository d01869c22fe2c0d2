use egui::{Pos2, Rect, Vec2};
use thiserror::Error;
use uuid::Uuid;

use crate::renderer::RenderSurface;
use crate::viewport::Viewport;

mod common;
pub(crate) mod freedraw;
pub(crate) mod rectangle;

pub use common::{
    DEFAULT_COLOR, DEFAULT_LINE_WIDTH, SELECTION_FRAME_COLOR, SELECTION_FRAME_PADDING,
    SELECTION_FRAME_WIDTH,
};
pub use freedraw::FreeDraw;
pub use rectangle::Rectangle;

/// Stable handle for an element, independent of its position in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(Uuid);

impl ElementId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors raised by element operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ElementError {
    #[error("{operation} is not implemented for {element} elements")]
    NotImplemented {
        operation: &'static str,
        element: &'static str,
    },
}

/// Common trait that all drawable elements implement
pub trait Element {
    /// Get the unique identifier for this element
    fn id(&self) -> ElementId;

    /// Get the element type as a string
    fn element_type(&self) -> &'static str;

    /// Document-space box used for selection, hit testing and culling
    fn bounds(&self) -> Rect;

    /// The document-space origin that `drag` moves
    fn anchor(&self) -> Pos2;

    fn set_anchor(&mut self, anchor: Pos2);

    /// Draw the element, including its selection frame when selected
    fn draw(&self, viewport: &Viewport, surface: &mut dyn RenderSurface);

    /// Translate the element by the given delta
    fn drag(&mut self, delta: Vec2) {
        self.set_anchor(self.anchor() + delta);
    }

    /// Interactive resize. Neither variant supports it yet.
    fn resize(&mut self, delta: Vec2) -> Result<(), ElementError>;

    fn is_selected(&self) -> bool;

    fn set_selected(&mut self, selected: bool);

    fn color(&self) -> &str;

    /// True when the bounds overlap the `[0, size]` screen area
    fn is_on_screen(&self, viewport: &Viewport, screen_size: Vec2) -> bool {
        common::overlaps_screen(self.bounds(), viewport, screen_size)
    }

    /// True when the screen point lies strictly inside the bounds
    fn check_click(&self, pos: Pos2, viewport: &Viewport) -> bool {
        common::contains_open(self.bounds(), viewport, pos)
    }
}

/// Enumeration of all element types in the document
#[derive(Debug, Clone, PartialEq)]
pub enum ElementType {
    Rectangle(Rectangle),
    FreeDraw(FreeDraw),
}

impl Element for ElementType {
    fn id(&self) -> ElementId {
        match self {
            ElementType::Rectangle(r) => r.id(),
            ElementType::FreeDraw(f) => f.id(),
        }
    }

    fn element_type(&self) -> &'static str {
        match self {
            ElementType::Rectangle(r) => r.element_type(),
            ElementType::FreeDraw(f) => f.element_type(),
        }
    }

    fn bounds(&self) -> Rect {
        match self {
            ElementType::Rectangle(r) => r.bounds(),
            ElementType::FreeDraw(f) => f.bounds(),
        }
    }

    fn anchor(&self) -> Pos2 {
        match self {
            ElementType::Rectangle(r) => r.anchor(),
            ElementType::FreeDraw(f) => f.anchor(),
        }
    }

    fn set_anchor(&mut self, anchor: Pos2) {
        match self {
            ElementType::Rectangle(r) => r.set_anchor(anchor),
            ElementType::FreeDraw(f) => f.set_anchor(anchor),
        }
    }

    fn draw(&self, viewport: &Viewport, surface: &mut dyn RenderSurface) {
        match self {
            ElementType::Rectangle(r) => r.draw(viewport, surface),
            ElementType::FreeDraw(f) => f.draw(viewport, surface),
        }
    }

    fn resize(&mut self, delta: Vec2) -> Result<(), ElementError> {
        match self {
            ElementType::Rectangle(r) => r.resize(delta),
            ElementType::FreeDraw(f) => f.resize(delta),
        }
    }

    fn is_selected(&self) -> bool {
        match self {
            ElementType::Rectangle(r) => r.is_selected(),
            ElementType::FreeDraw(f) => f.is_selected(),
        }
    }

    fn set_selected(&mut self, selected: bool) {
        match self {
            ElementType::Rectangle(r) => r.set_selected(selected),
            ElementType::FreeDraw(f) => f.set_selected(selected),
        }
    }

    fn color(&self) -> &str {
        match self {
            ElementType::Rectangle(r) => r.color(),
            ElementType::FreeDraw(f) => f.color(),
        }
    }
}

impl From<Rectangle> for ElementType {
    fn from(rect: Rectangle) -> Self {
        ElementType::Rectangle(rect)
    }
}

impl From<FreeDraw> for ElementType {
    fn from(free_draw: FreeDraw) -> Self {
        ElementType::FreeDraw(free_draw)
    }
}

/// Factory functions for creating elements
pub mod factory {
    use super::*;

    /// Create a rectangle spanning `origin .. origin + size`
    pub fn create_rectangle(origin: Pos2, size: Vec2, color: &str) -> ElementType {
        ElementType::Rectangle(Rectangle::from_parts(origin, size, color))
    }

    /// Create a freehand stroke from points relative to `start`.
    /// A leading origin point is the anchor itself and is not re-added; any
    /// other first point is kept as the first segment.
    pub fn create_freedraw(start: Pos2, points: &[Pos2], color: &str) -> ElementType {
        let mut free_draw = FreeDraw::new(start, color);
        let rest = match points.split_first() {
            Some((first, rest)) if *first == Pos2::ZERO => rest,
            _ => points,
        };
        for point in rest {
            free_draw.add_point(*point);
        }
        ElementType::FreeDraw(free_draw)
    }
}
