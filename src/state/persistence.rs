use egui::{Color32, Vec2};
use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Configuration;
use crate::style::Style;

/// Errors that can occur while encoding or decoding a configuration snapshot
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize configuration: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Serializable copy of the configuration.
///
/// Only tool and style state is kept; figure geometry is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigSnapshot {
    pub tool: Option<String>,
    pub pen_color: [u8; 4],
    pub brush_color: [u8; 4],
    pub pen_width: u32,
    pub radius: u32,
    pub canvas_size: [f32; 2],
}

impl Default for ConfigSnapshot {
    fn default() -> Self {
        Configuration::new().snapshot()
    }
}

impl ConfigSnapshot {
    pub fn to_json(&self) -> PersistenceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> PersistenceResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn color_from(rgba: [u8; 4]) -> Color32 {
    let [r, g, b, a] = rgba;
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

impl Configuration {
    pub fn snapshot(&self) -> ConfigSnapshot {
        let style: Style = self.style();
        let size = self.canvas_size();
        ConfigSnapshot {
            tool: self.active_tool().map(|kind| kind.name().to_string()),
            pen_color: style.pen_color.to_srgba_unmultiplied(),
            brush_color: style.brush_color.to_srgba_unmultiplied(),
            pen_width: style.pen_width,
            radius: style.radius,
            canvas_size: [size.x, size.y],
        }
    }

    /// Apply a snapshot field by field through the regular setters.
    ///
    /// Malformed fields are skipped and the rest still apply.
    pub fn apply_snapshot(&self, snapshot: &ConfigSnapshot) {
        match snapshot.tool.as_deref() {
            Some(name) => {
                if let Err(err) = self.set_active_tool_by_name(name) {
                    warn!("Skipping stored tool: {}", err);
                }
            }
            None => self.set_active_tool(None),
        }
        self.set_pen_color(color_from(snapshot.pen_color));
        self.set_brush_color(color_from(snapshot.brush_color));
        self.set_pen_width(snapshot.pen_width);
        self.set_radius(snapshot.radius);
        let [w, h] = snapshot.canvas_size;
        self.set_canvas_size(Vec2::new(w, h));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::FigureKind;

    #[test]
    fn test_snapshot_restores_configuration() {
        let config = Configuration::new();
        config.set_active_tool(Some(FigureKind::Triangle));
        config.set_pen_color(Color32::RED);
        config.set_pen_width(7);
        config.set_canvas_size(Vec2::new(320.0, 240.0));

        let json = config.snapshot().to_json().unwrap();
        let restored = Configuration::new();
        restored.apply_snapshot(&ConfigSnapshot::from_json(&json).unwrap());

        assert_eq!(restored.active_tool(), Some(FigureKind::Triangle));
        assert_eq!(restored.style().pen_color, Color32::RED);
        assert_eq!(restored.style().pen_width, 7);
        assert_eq!(restored.canvas_size(), Vec2::new(320.0, 240.0));
    }

    #[test]
    fn test_malformed_fields_are_skipped() {
        let json = r#"{ "tool": "hexagon", "pen_width": 0, "canvas_size": [0.0, 10.0], "radius": 9 }"#;
        let snapshot = ConfigSnapshot::from_json(json).unwrap();

        let config = Configuration::new();
        config.set_active_tool(Some(FigureKind::Line));
        config.apply_snapshot(&snapshot);

        assert_eq!(config.active_tool(), Some(FigureKind::Line));
        assert_eq!(config.style().pen_width, Style::default().pen_width);
        assert_eq!(config.style().radius, 9);
        assert_eq!(config.canvas_size(), crate::state::DEFAULT_CANVAS_SIZE);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let result = ConfigSnapshot::from_json("{ not json");
        assert!(matches!(result, Err(PersistenceError::SerializationError(_))));
    }
}
