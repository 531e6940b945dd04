use egui::{Pos2, Rect, Vec2};

use super::common::{self, ControlPoints, FigureCore};
use super::{Figure, FigureKind};
use crate::renderer::Surface;
use crate::style::Style;

/// Triangle through three clicked vertices
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    core: FigureCore,
    vertices: ControlPoints<3>,
}

impl Triangle {
    pub fn new(style: Style, vertices: [Option<Pos2>; 3]) -> Self {
        let vertices = ControlPoints::from_slots(vertices);
        Self {
            core: FigureCore::new(style, vertices.is_full()),
            vertices,
        }
    }
}

impl Figure for Triangle {
    core_accessors!();

    fn kind(&self) -> FigureKind {
        FigureKind::Triangle
    }

    fn points(&self) -> Vec<Pos2> {
        self.vertices.set()
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if !self.core.finished {
            return;
        }
        let style = &self.core.style;
        surface.polygon(self.vertices.set(), style.pen(), style.brush());
    }

    fn bounds(&self) -> Rect {
        common::calculate_bounds(&self.vertices.set(), common::stroke_padding(&self.core.style))
    }

    fn continue_with_point(&mut self, pos: Pos2) {
        if self.vertices.push(pos) {
            self.core.finished = true;
        }
    }

    fn change_position(&mut self, delta: Vec2, container: Rect) -> bool {
        self.vertices.try_translate(delta, container)
    }
}
