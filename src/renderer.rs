use egui::{Color32, Painter, Pos2, Rect, Shape, Stroke, Vec2};

use crate::figure::Figure;
use crate::state::Storage;

/// Primitive drawing calls figures are painted with.
///
/// `pen` strokes the outline; `brush` fills the interior, `None` meaning
/// outline only. Coordinates are canvas-local.
pub trait Surface {
    fn line(&mut self, from: Pos2, to: Pos2, pen: Stroke);

    fn rect(&mut self, rect: Rect, pen: Stroke, brush: Option<Color32>);

    /// Axis-aligned ellipse with separate x and y radii
    fn ellipse(&mut self, center: Pos2, radius: Vec2, pen: Stroke, brush: Option<Color32>);

    /// Closed convex polygon
    fn polygon(&mut self, points: Vec<Pos2>, pen: Stroke, brush: Option<Color32>);
}

/// [`Surface`] over an egui painter, offset to where the canvas sits on screen
pub struct CanvasPainter<'a> {
    painter: &'a Painter,
    origin: Vec2,
}

impl<'a> CanvasPainter<'a> {
    pub fn new(painter: &'a Painter, canvas_rect: Rect) -> Self {
        Self {
            painter,
            origin: canvas_rect.min.to_vec2(),
        }
    }
}

impl Surface for CanvasPainter<'_> {
    fn line(&mut self, from: Pos2, to: Pos2, pen: Stroke) {
        self.painter.line_segment([from + self.origin, to + self.origin], pen);
    }

    fn rect(&mut self, rect: Rect, pen: Stroke, brush: Option<Color32>) {
        self.painter.rect(
            rect.translate(self.origin),
            0.0,
            brush.unwrap_or(Color32::TRANSPARENT),
            pen,
        );
    }

    fn ellipse(&mut self, center: Pos2, radius: Vec2, pen: Stroke, brush: Option<Color32>) {
        let center = center + self.origin;
        if let Some(fill) = brush {
            self.painter.add(Shape::ellipse_filled(center, radius, fill));
        }
        self.painter.add(Shape::ellipse_stroke(center, radius, pen));
    }

    fn polygon(&mut self, points: Vec<Pos2>, pen: Stroke, brush: Option<Color32>) {
        let points = points.into_iter().map(|p| p + self.origin).collect();
        self.painter.add(Shape::convex_polygon(
            points,
            brush.unwrap_or(Color32::TRANSPARENT),
            pen,
        ));
    }
}

/// Paints the canvas background and every stored figure
#[derive(Debug, Clone)]
pub struct Renderer {
    background: Color32,
    frame: Stroke,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            background: Color32::WHITE,
            frame: Stroke::new(1.0, Color32::from_gray(160)),
        }
    }

    /// Renders the storage into `canvas_rect`, in storage order
    pub fn render(&self, painter: &Painter, canvas_rect: Rect, storage: &Storage) {
        painter.rect(canvas_rect, 0.0, self.background, self.frame);

        let mut surface = CanvasPainter::new(painter, canvas_rect);
        self.draw_figures(&mut surface, storage);
    }

    pub fn draw_figures(&self, surface: &mut dyn Surface, storage: &Storage) {
        for figure in storage.figures() {
            figure.draw(surface);
        }
    }
}
