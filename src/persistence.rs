use std::fs;
use std::path::Path;

use egui::{Pos2, pos2, vec2};
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::element::{Element, ElementType, FreeDraw, Rectangle};

/// Errors that can occur while saving or loading a drawing
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to parse drawing: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to access drawing file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid element at index {index}: {reason}")]
    InvalidElement { index: usize, reason: String },
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// On-disk form of one element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SavedElement {
    Rectangle {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: String,
    },
    #[serde(rename_all = "camelCase")]
    FreeDraw {
        start: Pos2,
        points: Vec<Pos2>,
        min_x: f32,
        min_y: f32,
        max_x: f32,
        max_y: f32,
        color: String,
    },
}

impl From<&ElementType> for SavedElement {
    fn from(element: &ElementType) -> Self {
        match element {
            ElementType::Rectangle(rect) => SavedElement::Rectangle {
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
                color: rect.color().to_owned(),
            },
            ElementType::FreeDraw(stroke) => SavedElement::FreeDraw {
                start: stroke.start(),
                points: stroke.points().to_vec(),
                min_x: stroke.min().x,
                min_y: stroke.min().y,
                max_x: stroke.max().x,
                max_y: stroke.max().y,
                color: stroke.color().to_owned(),
            },
        }
    }
}

impl SavedElement {
    /// Rebuild the element, checking what the editor relies on
    pub fn into_element(self, index: usize) -> PersistenceResult<ElementType> {
        match self {
            SavedElement::Rectangle {
                x,
                y,
                width,
                height,
                color,
            } => Ok(Rectangle::from_parts(pos2(x, y), vec2(width, height), &color).into()),
            SavedElement::FreeDraw {
                start,
                points,
                min_x,
                min_y,
                max_x,
                max_y,
                color,
            } => {
                match points.first() {
                    None => {
                        return Err(PersistenceError::InvalidElement {
                            index,
                            reason: "freedraw element has no points".to_owned(),
                        });
                    }
                    Some(first) if *first != Pos2::ZERO => {
                        return Err(PersistenceError::InvalidElement {
                            index,
                            reason: format!("freedraw must start at the local origin, got {:?}", first),
                        });
                    }
                    Some(_) => {}
                }
                let stroke = FreeDraw::from_parts(
                    start,
                    points,
                    pos2(min_x, min_y),
                    pos2(max_x, max_y),
                    &color,
                );
                Ok(stroke.into())
            }
        }
    }
}

/// Serialize elements to the JSON array format
pub fn to_json(elements: &[ElementType]) -> PersistenceResult<String> {
    let saved: Vec<SavedElement> = elements.iter().map(SavedElement::from).collect();
    Ok(serde_json::to_string(&saved)?)
}

/// Parse a JSON array of elements. Fails without partial results.
pub fn from_json(json: &str) -> PersistenceResult<Vec<ElementType>> {
    let saved: Vec<SavedElement> = serde_json::from_str(json)?;
    saved
        .into_iter()
        .enumerate()
        .map(|(index, element)| element.into_element(index))
        .collect()
}

pub fn save_to_path(path: &Path, elements: &[ElementType]) -> PersistenceResult<()> {
    let json = to_json(elements)?;
    fs::write(path, json)?;
    info!("Saved {} elements to {}", elements.len(), path.display());
    Ok(())
}

pub fn load_from_path(path: &Path) -> PersistenceResult<Vec<ElementType>> {
    let json = fs::read_to_string(path)?;
    let elements = from_json(&json)?;
    info!("Read {} elements from {}", elements.len(), path.display());
    Ok(elements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_format() {
        let rect: ElementType = Rectangle::from_parts(pos2(10.0, 10.0), vec2(50.0, 30.0), "#000").into();
        let json = to_json(&[rect]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["type"], "rectangle");
        assert_eq!(value[0]["width"], 50.0);
        assert_eq!(value[0]["color"], "#000");
    }

    #[test]
    fn test_freedraw_keys_are_camel_case() {
        let json = r##"[{"type":"freedraw","start":{"x":40,"y":40},"points":[{"x":0,"y":0},{"x":5,"y":5}],"minX":0,"minY":0,"maxX":5,"maxY":5,"color":"#000"}]"##;
        let elements = from_json(json).unwrap();
        let ElementType::FreeDraw(stroke) = &elements[0] else {
            panic!("expected a freedraw element");
        };
        assert_eq!(stroke.start(), pos2(40.0, 40.0));
        assert_eq!(stroke.max(), pos2(5.0, 5.0));

        let value: serde_json::Value = serde_json::from_str(&to_json(&elements).unwrap()).unwrap();
        assert_eq!(value[0]["maxX"], 5.0);
        assert!(value[0].get("max_x").is_none());
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert!(matches!(from_json(r#"{"type":"rectangle"}"#), Err(PersistenceError::Json(_))));
        assert!(matches!(from_json(r#"[{"type":"circle"}]"#), Err(PersistenceError::Json(_))));
        assert!(matches!(
            from_json(r##"[{"type":"freedraw","start":{"x":0,"y":0},"points":[],"minX":0,"minY":0,"maxX":0,"maxY":0,"color":"#000"}]"##),
            Err(PersistenceError::InvalidElement { index: 0, .. })
        ));
    }
}
