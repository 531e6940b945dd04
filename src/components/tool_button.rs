use egui::{Align2, Color32, FontId, Response, Sense, Stroke, Ui, vec2};

use crate::figure::FigureKind;

/// Square toggle button showing a figure kind's glyph
pub struct ToolButton {
    pub kind: FigureKind,
    pub selected: bool,
}

impl ToolButton {
    pub fn new(kind: FigureKind, selected: bool) -> Self {
        Self { kind, selected }
    }

    fn icon(&self) -> &'static str {
        match self.kind {
            FigureKind::Point => "•",
            FigureKind::Line => "╱",
            FigureKind::Rectangle => "▭",
            FigureKind::Square => "□",
            FigureKind::Circle => "○",
            FigureKind::Ellipse => "⬭",
            FigureKind::Triangle => "△",
        }
    }

    pub fn show(&self, ui: &mut Ui) -> Response {
        let button_size = vec2(32.0, 32.0);
        let (rect, response) = ui.allocate_exact_size(button_size, Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                Color32::from_rgb(100, 181, 246) // Light blue when selected
            } else if response.hovered() {
                Color32::from_gray(70)
            } else {
                Color32::from_gray(50)
            };
            ui.painter().rect_filled(rect, 4.0, bg_color);

            let text_color = if self.selected {
                Color32::BLACK
            } else {
                Color32::WHITE
            };
            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                self.icon(),
                FontId::proportional(20.0),
                text_color,
            );

            if self.selected {
                ui.painter()
                    .rect_stroke(rect, 4.0, Stroke::new(2.0, Color32::from_rgb(33, 150, 243)));
            }
        }

        response.on_hover_text(self.kind.name())
    }
}
