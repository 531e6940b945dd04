use egui::{Pos2, Rect, Vec2};

use super::common::{self, FigureCore, TOLERANCE};
use super::{Figure, FigureKind};
use crate::renderer::Surface;
use crate::style::Style;

/// A single dot. Finished as soon as it is placed.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    core: FigureCore,
    pos: Pos2,
}

impl Point {
    pub fn new(style: Style, pos: Pos2) -> Self {
        Self {
            core: FigureCore::new(style, true),
            pos,
        }
    }

    pub fn pos(&self) -> Pos2 {
        self.pos
    }

    fn box_radius(&self) -> u32 {
        let style = &self.core.style;
        1.max(style.pen_width).max(TOLERANCE)
    }
}

impl Figure for Point {
    core_accessors!();

    fn kind(&self) -> FigureKind {
        FigureKind::Point
    }

    fn points(&self) -> Vec<Pos2> {
        vec![self.pos]
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let style = &self.core.style;
        let radius = Vec2::splat(style.radius as f32);
        surface.ellipse(self.pos, radius, style.pen(), Some(style.pen_color));
    }

    fn bounds(&self) -> Rect {
        common::point_box(self.pos, self.box_radius() as f32)
    }

    fn continue_with_point(&mut self, _pos: Pos2) {}

    fn change_position(&mut self, delta: Vec2, container: Rect) -> bool {
        if !common::fits_after_translate(&[self.pos], delta, container) {
            return false;
        }
        self.pos += delta;
        true
    }

    fn radius(&self) -> Option<u32> {
        Some(self.core.style.radius)
    }

    fn set_radius(&mut self, radius: u32) {
        self.core.style.radius = radius.max(1);
    }
}
