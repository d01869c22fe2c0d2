use egui::{Pos2, Vec2};

use super::{CommandError, CommandResult};
use crate::document::{Document, Removal};
use crate::element::{Element, ElementId};

/// A reversible action recorded after it has been applied to the document.
///
/// Entries refer to elements by id; the document keeps ownership.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// An element was appended on top of the z-order
    Create { id: ElementId },

    /// Elements were erased, listed in the order they were removed
    Delete { removed: Vec<Removal> },

    /// An element's anchor moved from `from` to `to`
    Move { id: ElementId, from: Pos2, to: Pos2 },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Create { .. } => "create",
            Command::Delete { .. } => "delete",
            Command::Move { .. } => "move",
        }
    }

    /// Net translation of a move entry
    pub fn delta(&self) -> Option<Vec2> {
        match self {
            Command::Move { from, to, .. } => Some(*to - *from),
            _ => None,
        }
    }

    /// Id of the element a create entry brought into existence
    pub(crate) fn created(&self) -> Option<ElementId> {
        match self {
            Command::Create { id } => Some(*id),
            _ => None,
        }
    }

    /// Revert the entry's effect on the document
    pub fn undo(&self, document: &mut Document) -> CommandResult {
        match self {
            Command::Create { id } => {
                document.detach(*id).ok_or(CommandError::ElementNotFound(*id))?;
            }
            Command::Delete { removed } => {
                // Check every removal first so a bad entry leaves the document untouched
                let len = document.len();
                for (restored, removal) in removed.iter().rev().enumerate() {
                    if !document.is_detached(removal.id) {
                        return Err(CommandError::ElementNotFound(removal.id));
                    }
                    if removal.index > len + restored {
                        return Err(CommandError::IndexOutOfBounds {
                            id: removal.id,
                            index: removal.index,
                        });
                    }
                }
                for removal in removed.iter().rev() {
                    if !document.insert_at(removal.id, removal.index) {
                        return Err(CommandError::IndexOutOfBounds {
                            id: removal.id,
                            index: removal.index,
                        });
                    }
                }
            }
            Command::Move { id, from, .. } => {
                let element = document.element_mut(*id).ok_or(CommandError::ElementNotFound(*id))?;
                element.set_anchor(*from);
            }
        }
        Ok(())
    }

    /// Re-apply the entry after it was undone
    pub fn redo(&self, document: &mut Document) -> CommandResult {
        match self {
            Command::Create { id } => {
                if !document.attach(*id) {
                    return Err(CommandError::ElementNotFound(*id));
                }
            }
            Command::Delete { removed } => {
                if let Some(missing) = removed.iter().find(|r| document.index_of(r.id).is_none()) {
                    return Err(CommandError::ElementNotFound(missing.id));
                }
                for removal in removed {
                    document
                        .detach(removal.id)
                        .ok_or(CommandError::ElementNotFound(removal.id))?;
                }
            }
            Command::Move { id, to, .. } => {
                let element = document.element_mut(*id).ok_or(CommandError::ElementNotFound(*id))?;
                element.set_anchor(*to);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementType, factory};
    use egui::{pos2, vec2};

    fn square(x: f32) -> ElementType {
        factory::create_rectangle(pos2(x, 0.0), vec2(10.0, 10.0), "#000")
    }

    fn document_of(count: usize) -> (Document, Vec<ElementId>) {
        let mut document = Document::new();
        let ids = (0..count).map(|i| document.push(square(i as f32 * 20.0))).collect();
        (document, ids)
    }

    #[test]
    fn test_failed_delete_undo_changes_nothing() {
        let (mut document, ids) = document_of(3);
        document.detach(ids[0]);
        document.detach(ids[1]);

        // The later removal would be restored first and succeed on its own
        let command = Command::Delete {
            removed: vec![
                Removal { id: ids[0], index: 5 },
                Removal { id: ids[1], index: 0 },
            ],
        };
        assert_eq!(
            command.undo(&mut document),
            Err(CommandError::IndexOutOfBounds { id: ids[0], index: 5 })
        );
        assert_eq!(document.len(), 1);
        assert!(document.is_detached(ids[0]));
        assert!(document.is_detached(ids[1]));
    }

    #[test]
    fn test_failed_delete_redo_changes_nothing() {
        let (mut document, ids) = document_of(2);
        document.detach(ids[1]);

        let command = Command::Delete {
            removed: vec![
                Removal { id: ids[0], index: 0 },
                Removal { id: ids[1], index: 0 },
            ],
        };
        assert_eq!(command.redo(&mut document), Err(CommandError::ElementNotFound(ids[1])));
        assert_eq!(document.index_of(ids[0]), Some(0));
    }

    #[test]
    fn test_move_undo_restores_anchor() {
        let (mut document, ids) = document_of(1);
        let command = Command::Move {
            id: ids[0],
            from: pos2(0.0, 0.0),
            to: pos2(7.5, -3.25),
        };
        command.redo(&mut document).unwrap();
        assert_eq!(document.element(ids[0]).map(|e| e.anchor()), Some(pos2(7.5, -3.25)));
        command.undo(&mut document).unwrap();
        assert_eq!(document.element(ids[0]).map(|e| e.anchor()), Some(pos2(0.0, 0.0)));
        assert_eq!(command.delta(), Some(vec2(7.5, -3.25)));
    }
}
