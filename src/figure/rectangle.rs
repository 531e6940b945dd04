use egui::{Pos2, Rect, Vec2};

use super::common::{self, ControlPoints, FigureCore};
use super::{Figure, FigureKind};
use crate::renderer::Surface;
use crate::style::Style;

/// Two opposite corners shared by rectangles and squares.
///
/// Holds the construction protocol, bounds and movement; the owning figure
/// only decides how the corners are drawn.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Corners {
    points: ControlPoints<2>,
}

impl Corners {
    fn new(points: [Option<Pos2>; 2]) -> Self {
        Self {
            points: ControlPoints::from_slots(points),
        }
    }

    fn is_full(&self) -> bool {
        self.points.is_full()
    }

    fn pair(&self) -> Option<(Pos2, Pos2)> {
        Some((self.points.get(0)?, self.points.get(1)?))
    }

    fn set(&self) -> Vec<Pos2> {
        self.points.set()
    }

    fn bounds(&self, style: &Style) -> Rect {
        common::calculate_bounds(&self.points.set(), common::stroke_padding(style))
    }

    /// Returns true when this point completed the pair
    fn push(&mut self, pos: Pos2) -> bool {
        self.points.push(pos)
    }

    fn try_translate(&mut self, delta: Vec2, container: Rect) -> bool {
        self.points.try_translate(delta, container)
    }
}

/// Axis-aligned rectangle spanned by two clicks
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    core: FigureCore,
    corners: Corners,
}

impl Rectangle {
    pub fn new(style: Style, corners: [Option<Pos2>; 2]) -> Self {
        let corners = Corners::new(corners);
        Self {
            core: FigureCore::new(style, corners.is_full()),
            corners,
        }
    }
}

impl Figure for Rectangle {
    core_accessors!();

    fn kind(&self) -> FigureKind {
        FigureKind::Rectangle
    }

    fn points(&self) -> Vec<Pos2> {
        self.corners.set()
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if !self.core.finished {
            return;
        }
        if let Some((a, b)) = self.corners.pair() {
            let style = &self.core.style;
            surface.rect(Rect::from_two_pos(a, b), style.pen(), style.brush());
        }
    }

    fn bounds(&self) -> Rect {
        self.corners.bounds(&self.core.style)
    }

    fn continue_with_point(&mut self, pos: Pos2) {
        if self.corners.push(pos) {
            self.core.finished = true;
        }
    }

    fn change_position(&mut self, delta: Vec2, container: Rect) -> bool {
        self.corners.try_translate(delta, container)
    }
}

/// Square anchored at the first corner, growing toward the second.
///
/// The side is the larger of the two spans between the corners.
#[derive(Debug, Clone, PartialEq)]
pub struct Square {
    core: FigureCore,
    corners: Corners,
}

impl Square {
    pub fn new(style: Style, corners: [Option<Pos2>; 2]) -> Self {
        let corners = Corners::new(corners);
        Self {
            core: FigureCore::new(style, corners.is_full()),
            corners,
        }
    }

    /// Corner opposite the anchor once both clicks are in
    pub fn far_corner(&self) -> Option<Pos2> {
        let (anchor, toward) = self.corners.pair()?;
        let delta = toward - anchor;
        let side = delta.x.abs().max(delta.y.abs());
        let sign = |v: f32| if v < 0.0 { -1.0 } else { 1.0 };
        Some(Pos2::new(
            anchor.x + side * sign(delta.x),
            anchor.y + side * sign(delta.y),
        ))
    }
}

impl Figure for Square {
    core_accessors!();

    fn kind(&self) -> FigureKind {
        FigureKind::Square
    }

    fn points(&self) -> Vec<Pos2> {
        self.corners.set()
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if !self.core.finished {
            return;
        }
        if let (Some((anchor, _)), Some(far)) = (self.corners.pair(), self.far_corner()) {
            let style = &self.core.style;
            surface.rect(Rect::from_two_pos(anchor, far), style.pen(), style.brush());
        }
    }

    fn bounds(&self) -> Rect {
        self.corners.bounds(&self.core.style)
    }

    fn continue_with_point(&mut self, pos: Pos2) {
        if self.corners.push(pos) {
            self.core.finished = true;
        }
    }

    fn change_position(&mut self, delta: Vec2, container: Rect) -> bool {
        self.corners.try_translate(delta, container)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_grows_away_from_anchor() {
        let square = Square::new(
            Style::default(),
            [Some(Pos2::new(50.0, 50.0)), Some(Pos2::new(40.0, 80.0))],
        );
        assert_eq!(square.far_corner(), Some(Pos2::new(20.0, 80.0)));
    }

    #[test]
    fn test_square_shares_rectangle_bounds() {
        let corners = [Some(Pos2::new(10.0, 10.0)), Some(Pos2::new(30.0, 60.0))];
        let rectangle = Rectangle::new(Style::default(), corners);
        let square = Square::new(Style::default(), corners);
        assert_eq!(rectangle.bounds(), square.bounds());
    }

    #[test]
    fn test_unfinished_square_has_no_far_corner() {
        let square = Square::new(Style::default(), [Some(Pos2::new(1.0, 1.0)), None]);
        assert!(!square.is_finished());
        assert_eq!(square.far_corner(), None);
    }

    #[test]
    fn test_rectangle_bounds_pad_by_pen_width_when_wider() {
        let mut style = Style::default();
        style.pen_width = 7;
        let rectangle = Rectangle::new(
            style,
            [Some(Pos2::new(20.0, 20.0)), Some(Pos2::new(40.0, 30.0))],
        );
        let bounds = rectangle.bounds();
        assert_eq!(bounds.min, Pos2::new(13.0, 13.0));
        assert_eq!(bounds.max, Pos2::new(48.0, 38.0));
    }
}
