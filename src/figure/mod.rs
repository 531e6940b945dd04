use std::fmt;
use std::str::FromStr;

use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::FigureError;
use crate::id_generator::FigureId;
use crate::renderer::Surface;
use crate::style::Style;

/// Accessors every figure answers straight from its `core` field.
macro_rules! core_accessors {
    () => {
        fn id(&self) -> crate::id_generator::FigureId {
            self.core.id
        }

        fn style(&self) -> &crate::style::Style {
            &self.core.style
        }

        fn style_mut(&mut self) -> &mut crate::style::Style {
            &mut self.core.style
        }

        fn is_finished(&self) -> bool {
            self.core.finished
        }

        fn is_selected(&self) -> bool {
            self.core.is_selected()
        }

        fn set_selected(&mut self, selected: bool) {
            self.core.set_selected(selected)
        }
    };
}

mod common;
pub(crate) mod circle;
pub(crate) mod line;
pub(crate) mod point;
pub(crate) mod rectangle;
pub(crate) mod triangle;

pub use circle::{Circle, Ellipse};
pub use common::TOLERANCE;
pub use line::Line;
pub use point::Point;
pub use rectangle::{Rectangle, Square};
pub use triangle::Triangle;

/// The kinds of figure a tool can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FigureKind {
    Point,
    Line,
    Rectangle,
    Square,
    Circle,
    Ellipse,
    Triangle,
}

impl FigureKind {
    pub const ALL: [FigureKind; 7] = [
        FigureKind::Point,
        FigureKind::Line,
        FigureKind::Rectangle,
        FigureKind::Square,
        FigureKind::Circle,
        FigureKind::Ellipse,
        FigureKind::Triangle,
    ];

    /// Lowercase tool name
    pub fn name(self) -> &'static str {
        match self {
            FigureKind::Point => "point",
            FigureKind::Line => "line",
            FigureKind::Rectangle => "rectangle",
            FigureKind::Square => "square",
            FigureKind::Circle => "circle",
            FigureKind::Ellipse => "ellipse",
            FigureKind::Triangle => "triangle",
        }
    }

    /// Number of clicks needed before a figure of this kind is finished
    pub fn required_points(self) -> usize {
        match self {
            FigureKind::Point => 1,
            FigureKind::Line
            | FigureKind::Rectangle
            | FigureKind::Square
            | FigureKind::Circle
            | FigureKind::Ellipse => 2,
            FigureKind::Triangle => 3,
        }
    }
}

impl fmt::Display for FigureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FigureKind {
    type Err = FigureError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        FigureKind::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| FigureError::UnknownTool(name.to_string()))
    }
}

/// Common behavior of every figure on the canvas.
pub trait Figure {
    fn id(&self) -> FigureId;

    fn kind(&self) -> FigureKind;

    fn style(&self) -> &Style;

    fn style_mut(&mut self) -> &mut Style;

    /// True once every construction point has been supplied
    fn is_finished(&self) -> bool;

    fn is_selected(&self) -> bool;

    /// Select or deselect; selecting swaps in the highlight colors
    fn set_selected(&mut self, selected: bool);

    /// The construction points set so far, in order
    fn points(&self) -> Vec<Pos2>;

    /// The first construction point, carried by throwaway click figures
    fn first_point(&self) -> Option<Pos2> {
        self.points().first().copied()
    }

    /// Draw onto the surface. Unfinished figures draw nothing.
    fn draw(&self, surface: &mut dyn Surface);

    /// Padded bounding box, `Rect::NOTHING` when no point is set
    fn bounds(&self) -> Rect;

    /// Fill the next unset point; the figure finishes when the last one is set
    fn continue_with_point(&mut self, pos: Pos2);

    /// Translate by `delta` if every moved point stays inside `container`.
    ///
    /// Returns whether the figure moved. A rejected move leaves every point
    /// untouched.
    fn change_position(&mut self, delta: Vec2, container: Rect) -> bool;

    /// Bounding-box hit test, the same box used for selection
    fn hit_test(&self, pos: Pos2) -> bool {
        common::contains_probe(self.bounds(), pos)
    }

    /// Dot radius, for figures that have one
    fn radius(&self) -> Option<u32> {
        None
    }

    fn set_radius(&mut self, _radius: u32) {}
}

/// Enumeration of all figure variants stored on the canvas
#[derive(Debug, Clone, PartialEq)]
pub enum FigureType {
    Point(Point),
    Line(Line),
    Rectangle(Rectangle),
    Square(Square),
    Circle(Circle),
    Ellipse(Ellipse),
    Triangle(Triangle),
}

impl FigureType {
    fn inner(&self) -> &dyn Figure {
        match self {
            FigureType::Point(f) => f,
            FigureType::Line(f) => f,
            FigureType::Rectangle(f) => f,
            FigureType::Square(f) => f,
            FigureType::Circle(f) => f,
            FigureType::Ellipse(f) => f,
            FigureType::Triangle(f) => f,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Figure {
        match self {
            FigureType::Point(f) => f,
            FigureType::Line(f) => f,
            FigureType::Rectangle(f) => f,
            FigureType::Square(f) => f,
            FigureType::Circle(f) => f,
            FigureType::Ellipse(f) => f,
            FigureType::Triangle(f) => f,
        }
    }
}

impl Figure for FigureType {
    fn id(&self) -> FigureId {
        self.inner().id()
    }

    fn kind(&self) -> FigureKind {
        self.inner().kind()
    }

    fn style(&self) -> &Style {
        self.inner().style()
    }

    fn style_mut(&mut self) -> &mut Style {
        self.inner_mut().style_mut()
    }

    fn is_finished(&self) -> bool {
        self.inner().is_finished()
    }

    fn is_selected(&self) -> bool {
        self.inner().is_selected()
    }

    fn set_selected(&mut self, selected: bool) {
        self.inner_mut().set_selected(selected)
    }

    fn points(&self) -> Vec<Pos2> {
        self.inner().points()
    }

    fn first_point(&self) -> Option<Pos2> {
        self.inner().first_point()
    }

    fn draw(&self, surface: &mut dyn Surface) {
        self.inner().draw(surface)
    }

    fn bounds(&self) -> Rect {
        self.inner().bounds()
    }

    fn continue_with_point(&mut self, pos: Pos2) {
        self.inner_mut().continue_with_point(pos)
    }

    fn change_position(&mut self, delta: Vec2, container: Rect) -> bool {
        self.inner_mut().change_position(delta, container)
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        self.inner().hit_test(pos)
    }

    fn radius(&self) -> Option<u32> {
        self.inner().radius()
    }

    fn set_radius(&mut self, radius: u32) {
        self.inner_mut().set_radius(radius)
    }
}

/// Factory functions for creating figures from a placement click
pub mod factory {
    use super::*;

    /// Create a figure of `kind` whose first point is `pos`.
    ///
    /// The style is copied; the figure never aliases the caller's value.
    pub fn create(kind: FigureKind, pos: Pos2, style: Style) -> FigureType {
        match kind {
            FigureKind::Point => FigureType::Point(Point::new(style, pos)),
            FigureKind::Line => FigureType::Line(Line::new(style, [Some(pos), None])),
            FigureKind::Rectangle => {
                FigureType::Rectangle(Rectangle::new(style, [Some(pos), None]))
            }
            FigureKind::Square => FigureType::Square(Square::new(style, [Some(pos), None])),
            FigureKind::Circle => FigureType::Circle(Circle::new(style, [Some(pos), None])),
            FigureKind::Ellipse => FigureType::Ellipse(Ellipse::new(style, [Some(pos), None])),
            FigureKind::Triangle => {
                FigureType::Triangle(Triangle::new(style, [Some(pos), None, None]))
            }
        }
    }

    /// Create a figure from a lowercase tool name
    pub fn create_by_name(name: &str, pos: Pos2, style: Style) -> Result<FigureType, FigureError> {
        let kind = name.parse::<FigureKind>()?;
        Ok(create(kind, pos, style))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in FigureKind::ALL {
            assert_eq!(kind.name().parse::<FigureKind>(), Ok(kind));
        }
        assert_eq!(
            "hexagon".parse::<FigureKind>(),
            Err(FigureError::UnknownTool("hexagon".to_string()))
        );
    }

    #[test]
    fn test_factory_sets_first_point() {
        let pos = Pos2::new(40.0, 30.0);
        for kind in FigureKind::ALL {
            let figure = factory::create(kind, pos, Style::default());
            assert_eq!(figure.kind(), kind);
            assert_eq!(figure.first_point(), Some(pos));
            assert_eq!(figure.is_finished(), kind.required_points() == 1);
        }
    }

    #[test]
    fn test_clicks_finish_figure() {
        for kind in FigureKind::ALL {
            let mut figure = factory::create(kind, Pos2::new(10.0, 10.0), Style::default());
            for i in 1..kind.required_points() {
                assert!(!figure.is_finished());
                figure.continue_with_point(Pos2::new(20.0 + i as f32 * 10.0, 40.0));
            }
            assert!(figure.is_finished(), "{kind} should be finished");
            assert_eq!(figure.points().len(), kind.required_points());
        }
    }

    #[test]
    fn test_create_by_name_unknown() {
        let result = factory::create_by_name("star", Pos2::ZERO, Style::default());
        assert!(matches!(result, Err(FigureError::UnknownTool(name)) if name == "star"));
    }

    #[test]
    fn test_figures_get_distinct_ids() {
        let a = factory::create(FigureKind::Point, Pos2::ZERO, Style::default());
        let b = factory::create(FigureKind::Point, Pos2::ZERO, Style::default());
        assert_ne!(a.id(), b.id());
    }
}
