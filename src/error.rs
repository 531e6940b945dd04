use egui::Vec2;
use thiserror::Error;

/// Errors surfaced to the user by the drawing surface.
///
/// None of these are fatal: each one leaves the figures and the configuration
/// exactly as they were before the failing call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FigureError {
    /// The tool name does not map to any figure kind
    #[error("Unknown tool: {0:?}")]
    UnknownTool(String),

    /// A finished figure would no longer fit inside the requested canvas
    #[error("Canvas cannot shrink to {requested:?}: a figure would fall outside (keeping {kept:?})")]
    ResizeRejected { requested: Vec2, kept: Vec2 },
}

pub type FigureResult<T> = Result<T, FigureError>;
