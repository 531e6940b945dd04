use egui::{Color32, Stroke as EguiStroke};

/// Pen color while a figure is selected.
pub const HIGHLIGHT_PEN: Color32 = Color32::from_rgb(30, 144, 255);
/// Translucent brush color while a figure is selected (premultiplied alpha).
pub const HIGHLIGHT_BRUSH: Color32 = Color32::from_rgba_premultiplied(8, 36, 64, 64);

pub const DEFAULT_PEN_WIDTH: u32 = 2;
pub const DEFAULT_RADIUS: u32 = 3;

/// Drawing attributes owned by a single figure.
///
/// Figures copy the configuration's defaults when they are created and never
/// share a `Style` afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub pen_color: Color32,
    pub brush_color: Color32,
    pub pen_width: u32,
    pub radius: u32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            pen_color: Color32::BLACK,
            brush_color: Color32::TRANSPARENT,
            pen_width: DEFAULT_PEN_WIDTH,
            radius: DEFAULT_RADIUS,
        }
    }
}

impl Style {
    pub fn new(pen_color: Color32, brush_color: Color32, pen_width: u32, radius: u32) -> Self {
        Self {
            pen_color,
            brush_color,
            pen_width: pen_width.max(1),
            radius: radius.max(1),
        }
    }

    /// Outline stroke for the surface
    pub fn pen(&self) -> EguiStroke {
        EguiStroke::new(self.pen_width as f32, self.pen_color)
    }

    /// Fill color, or `None` when the brush is fully transparent
    pub fn brush(&self) -> Option<Color32> {
        (self.brush_color.a() > 0).then_some(self.brush_color)
    }

    pub fn is_highlighted(&self) -> bool {
        self.pen_color == HIGHLIGHT_PEN && self.brush_color == HIGHLIGHT_BRUSH
    }
}
