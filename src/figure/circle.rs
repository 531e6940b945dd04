use egui::{Pos2, Rect, Vec2};

use super::common::{self, ControlPoints, FigureCore, TOLERANCE};
use super::{Figure, FigureKind};
use crate::renderer::Surface;
use crate::style::Style;

/// Center plus a rim point, shared by circles and ellipses.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Radial {
    points: ControlPoints<2>,
}

impl Radial {
    fn new(points: [Option<Pos2>; 2]) -> Self {
        Self {
            points: ControlPoints::from_slots(points),
        }
    }

    fn center(&self) -> Option<Pos2> {
        self.points.get(0)
    }

    fn rim(&self) -> Option<Pos2> {
        self.points.get(1)
    }

    /// Distance from center to rim, zero until the rim is set
    fn distance(&self) -> f32 {
        match (self.center(), self.rim()) {
            (Some(center), Some(rim)) => center.distance(rim),
            _ => 0.0,
        }
    }

    fn bounds(&self, style: &Style) -> Rect {
        let Some(center) = self.center() else {
            return Rect::NOTHING;
        };
        let r = self
            .distance()
            .max(style.pen_width as f32)
            .max(TOLERANCE as f32);
        common::point_box(center, r)
    }
}

/// Circle around the first click passing through the second
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    core: FigureCore,
    radial: Radial,
}

impl Circle {
    pub fn new(style: Style, points: [Option<Pos2>; 2]) -> Self {
        let radial = Radial::new(points);
        Self {
            core: FigureCore::new(style, radial.points.is_full()),
            radial,
        }
    }
}

impl Figure for Circle {
    core_accessors!();

    fn kind(&self) -> FigureKind {
        FigureKind::Circle
    }

    fn points(&self) -> Vec<Pos2> {
        self.radial.points.set()
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if !self.core.finished {
            return;
        }
        if let Some(center) = self.radial.center() {
            let style = &self.core.style;
            let radius = Vec2::splat(self.radial.distance());
            surface.ellipse(center, radius, style.pen(), style.brush());
        }
    }

    fn bounds(&self) -> Rect {
        self.radial.bounds(&self.core.style)
    }

    fn continue_with_point(&mut self, pos: Pos2) {
        if self.radial.points.push(pos) {
            self.core.finished = true;
        }
    }

    fn change_position(&mut self, delta: Vec2, container: Rect) -> bool {
        self.radial.points.try_translate(delta, container)
    }
}

/// Axis-aligned ellipse; the rim point's offsets give the two radii.
///
/// Bounds and movement follow the circle through the same rim point.
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    core: FigureCore,
    radial: Radial,
}

impl Ellipse {
    pub fn new(style: Style, points: [Option<Pos2>; 2]) -> Self {
        let radial = Radial::new(points);
        Self {
            core: FigureCore::new(style, radial.points.is_full()),
            radial,
        }
    }

    pub fn radii(&self) -> Option<Vec2> {
        let offset = self.radial.rim()? - self.radial.center()?;
        Some(Vec2::new(offset.x.abs(), offset.y.abs()))
    }
}

impl Figure for Ellipse {
    core_accessors!();

    fn kind(&self) -> FigureKind {
        FigureKind::Ellipse
    }

    fn points(&self) -> Vec<Pos2> {
        self.radial.points.set()
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if !self.core.finished {
            return;
        }
        if let (Some(center), Some(radii)) = (self.radial.center(), self.radii()) {
            let style = &self.core.style;
            surface.ellipse(center, radii, style.pen(), style.brush());
        }
    }

    fn bounds(&self) -> Rect {
        self.radial.bounds(&self.core.style)
    }

    fn continue_with_point(&mut self, pos: Pos2) {
        if self.radial.points.push(pos) {
            self.core.finished = true;
        }
    }

    fn change_position(&mut self, delta: Vec2, container: Rect) -> bool {
        self.radial.points.try_translate(delta, container)
    }
}
