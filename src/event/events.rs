use egui::{Color32, Vec2};

use crate::figure::FigureKind;

/// Per-field change notifications published by the configuration.
///
/// Each carries the new value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigEvent {
    ToolChanged(Option<FigureKind>),
    PenColorChanged(Color32),
    BrushColorChanged(Color32),
    PenWidthChanged(u32),
    RadiusChanged(u32),
    CanvasSizeChanged(Vec2),
}

/// Notifications published by the figure storage
#[derive(Debug, Clone, PartialEq)]
pub enum StorageEvent {
    /// Figures or the selection changed; the canvas needs a repaint
    Changed,
    /// Something the user should be told about
    Notice(String),
}
