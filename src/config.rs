use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::element::{DEFAULT_COLOR, DEFAULT_LINE_WIDTH};
use crate::tools::Mode;

/// User-adjustable defaults for a canvas session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct CanvasConfig {
    /// Stroke color for new elements, and the color a load resets to
    pub default_color: String,
    pub line_width: f32,
    /// Mode a fresh or freshly loaded session starts in
    pub default_mode: Mode,
    /// File used by the save and load buttons
    pub save_path: PathBuf,
    pub background: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            default_color: DEFAULT_COLOR.to_owned(),
            line_width: DEFAULT_LINE_WIDTH,
            default_mode: Mode::Rect,
            save_path: PathBuf::from("data.json"),
            background: "#fff".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: CanvasConfig = serde_json::from_str(r#"{ "line_width": 3.0 }"#).unwrap();
        assert_eq!(config.line_width, 3.0);
        assert_eq!(config.default_color, DEFAULT_COLOR);
        assert_eq!(config.default_mode, Mode::Rect);
    }

    #[test]
    fn test_mode_serializes_lowercase() {
        let config = CanvasConfig {
            default_mode: Mode::FreeDraw,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""default_mode":"freedraw""#));
    }
}
