use std::collections::HashMap;

use egui::{Pos2, Vec2};
use log::debug;

use crate::element::{Element, ElementId, ElementType};
use crate::viewport::Viewport;

/// Where an element sat when it was taken out of the z-order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Removal {
    pub id: ElementId,
    pub index: usize,
}

/// Owns every element of the drawing.
///
/// Live elements are kept in z-order (later is drawn on top). Elements removed
/// by erase or undo stay in a detached store so history entries can bring
/// them back by id.
#[derive(Debug, Default)]
pub struct Document {
    elements: Vec<ElementType>,
    detached: HashMap<ElementId, ElementType>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element on top of the z-order
    pub fn push(&mut self, element: ElementType) -> ElementId {
        let id = element.id();
        self.elements.push(element);
        id
    }

    /// Detach the topmost element
    pub fn pop(&mut self) -> Option<ElementId> {
        let element = self.elements.pop()?;
        let id = element.id();
        self.detached.insert(id, element);
        Some(id)
    }

    /// Detach a live element, returning the index it occupied
    pub fn detach(&mut self, id: ElementId) -> Option<usize> {
        let index = self.index_of(id)?;
        self.remove_at(index);
        Some(index)
    }

    /// Re-append a detached element on top of the z-order
    pub fn attach(&mut self, id: ElementId) -> bool {
        match self.detached.remove(&id) {
            Some(element) => {
                self.elements.push(element);
                true
            }
            None => false,
        }
    }

    /// Re-insert a detached element at `index`
    pub fn insert_at(&mut self, id: ElementId, index: usize) -> bool {
        if index > self.elements.len() {
            return false;
        }
        match self.detached.remove(&id) {
            Some(element) => {
                self.elements.insert(index, element);
                true
            }
            None => false,
        }
    }

    /// Detach the element at `index`
    pub fn remove_at(&mut self, index: usize) -> Option<ElementId> {
        if index >= self.elements.len() {
            return None;
        }
        let element = self.elements.remove(index);
        let id = element.id();
        self.detached.insert(id, element);
        Some(id)
    }

    /// Detach every live element matching `predicate`, in z-order.
    ///
    /// Each removal records the index at the moment it was taken out, so
    /// replaying the list backwards with `insert_at` restores the old order.
    pub fn remove_where<F>(&mut self, mut predicate: F) -> Vec<Removal>
    where
        F: FnMut(&ElementType) -> bool,
    {
        let mut removed = Vec::new();
        let mut index = 0;
        while index < self.elements.len() {
            if predicate(&self.elements[index]) {
                if let Some(id) = self.remove_at(index) {
                    removed.push(Removal { id, index });
                }
            } else {
                index += 1;
            }
        }
        removed
    }

    /// Look up a live element
    pub fn element(&self, id: ElementId) -> Option<&ElementType> {
        self.elements.iter().find(|element| element.id() == id)
    }

    /// Look up an element whether it is live or detached
    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut ElementType> {
        if let Some(index) = self.index_of(id) {
            return self.elements.get_mut(index);
        }
        self.detached.get_mut(&id)
    }

    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|element| element.id() == id)
    }

    pub fn is_detached(&self, id: ElementId) -> bool {
        self.detached.contains_key(&id)
    }

    pub fn elements(&self) -> &[ElementType] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn detached_len(&self) -> usize {
        self.detached.len()
    }

    /// Live elements overlapping the screen, in z-order
    pub fn visible<'a>(
        &'a self,
        viewport: &'a Viewport,
        screen_size: Vec2,
    ) -> impl Iterator<Item = &'a ElementType> + 'a {
        self.elements
            .iter()
            .filter(move |element| element.is_on_screen(viewport, screen_size))
    }

    /// Topmost visible element under a screen point
    pub fn hit_test(&self, pos: Pos2, viewport: &Viewport, screen_size: Vec2) -> Option<ElementId> {
        self.visible(viewport, screen_size)
            .filter(|element| element.check_click(pos, viewport))
            .last()
            .map(|element| element.id())
    }

    /// Drop a detached element for good
    pub fn purge(&mut self, id: ElementId) -> bool {
        let purged = self.detached.remove(&id).is_some();
        if purged {
            debug!("Purged detached element {}", id);
        }
        purged
    }

    pub fn clear(&mut self) {
        self.elements.clear();
        self.detached.clear();
    }

    /// Swap in a freshly loaded set of elements
    pub fn replace_all(&mut self, elements: Vec<ElementType>) {
        self.detached.clear();
        self.elements = elements;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::factory;
    use egui::{pos2, vec2};

    fn square(x: f32) -> ElementType {
        factory::create_rectangle(pos2(x, 0.0), vec2(10.0, 10.0), "#000")
    }

    #[test]
    fn test_pop_and_attach_round_trip() {
        let mut document = Document::new();
        let a = document.push(square(0.0));
        let b = document.push(square(20.0));

        assert_eq!(document.pop(), Some(b));
        assert!(document.is_detached(b));
        assert_eq!(document.len(), 1);

        assert!(document.attach(b));
        assert_eq!(document.index_of(a), Some(0));
        assert_eq!(document.index_of(b), Some(1));
        assert!(!document.attach(b));
    }

    #[test]
    fn test_remove_where_restores_in_reverse() {
        let mut document = Document::new();
        let ids: Vec<_> = (0..5).map(|i| document.push(square(i as f32 * 20.0))).collect();

        let removed = document.remove_where(|element| {
            let id = element.id();
            id == ids[1] || id == ids[3]
        });
        assert_eq!(
            removed,
            vec![Removal { id: ids[1], index: 1 }, Removal { id: ids[3], index: 2 }]
        );

        for removal in removed.iter().rev() {
            assert!(document.insert_at(removal.id, removal.index));
        }
        let order: Vec<_> = document.elements().iter().map(|e| e.id()).collect();
        assert_eq!(order, ids);
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let mut document = Document::new();
        let _below = document.push(factory::create_rectangle(pos2(0.0, 0.0), vec2(50.0, 50.0), "#000"));
        let above = document.push(factory::create_rectangle(pos2(10.0, 10.0), vec2(50.0, 50.0), "#000"));

        let hit = document.hit_test(pos2(20.0, 20.0), &Viewport::default(), vec2(100.0, 100.0));
        assert_eq!(hit, Some(above));
        assert_eq!(document.hit_test(pos2(90.0, 90.0), &Viewport::default(), vec2(100.0, 100.0)), None);
    }

    #[test]
    fn test_element_mut_reaches_detached() {
        let mut document = Document::new();
        let id = document.push(square(0.0));
        document.detach(id);

        assert!(document.element(id).is_none());
        assert!(document.element_mut(id).is_some());
        assert!(document.purge(id));
        assert!(document.element_mut(id).is_none());
    }
}
