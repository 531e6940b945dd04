use egui::{Pos2, Rect, Vec2};

use super::common::{self, ControlPoints, FigureCore};
use super::{Figure, FigureKind};
use crate::renderer::Surface;
use crate::style::Style;

/// Straight segment between two clicked points
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    core: FigureCore,
    points: ControlPoints<2>,
}

impl Line {
    /// Build a line from optional endpoints; it is finished when both are set
    pub fn new(style: Style, points: [Option<Pos2>; 2]) -> Self {
        let points = ControlPoints::from_slots(points);
        Self {
            core: FigureCore::new(style, points.is_full()),
            points,
        }
    }
}

impl Figure for Line {
    core_accessors!();

    fn kind(&self) -> FigureKind {
        FigureKind::Line
    }

    fn points(&self) -> Vec<Pos2> {
        self.points.set()
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if !self.core.finished {
            return;
        }
        if let (Some(from), Some(to)) = (self.points.get(0), self.points.get(1)) {
            surface.line(from, to, self.core.style.pen());
        }
    }

    fn bounds(&self) -> Rect {
        common::calculate_bounds(&self.points.set(), common::stroke_padding(&self.core.style))
    }

    fn continue_with_point(&mut self, pos: Pos2) {
        if self.points.push(pos) {
            self.core.finished = true;
        }
    }

    fn change_position(&mut self, delta: Vec2, container: Rect) -> bool {
        self.points.try_translate(delta, container)
    }
}
