use egui::{Color32, Pos2, Rect, Vec2};
use log::debug;

use crate::id_generator::{FigureId, generate_id};
use crate::style::{HIGHLIGHT_BRUSH, HIGHLIGHT_PEN, Style};

/// Padding applied to bounding boxes for hit-testing and move checks
pub const TOLERANCE: u32 = 5;

/// Padding for polygonal figures: the larger of pen width and tolerance
pub(crate) fn stroke_padding(style: &Style) -> f32 {
    style.pen_width.max(TOLERANCE) as f32
}

/// Pixel box of radius `r` around `center`, side `2r + 1`
pub(crate) fn point_box(center: Pos2, r: f32) -> Rect {
    Rect::from_min_max(
        Pos2::new(center.x - r, center.y - r),
        Pos2::new(center.x + r + 1.0, center.y + r + 1.0),
    )
}

/// Calculate the padded bounding box for a set of points
pub(crate) fn calculate_bounds(points: &[Pos2], padding: f32) -> Rect {
    if points.is_empty() {
        return Rect::NOTHING;
    }

    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;

    for point in points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    Rect::from_min_max(
        Pos2::new(min_x - padding, min_y - padding),
        Pos2::new(max_x + padding + 1.0, max_y + padding + 1.0),
    )
}

/// Probe used for hit-testing: a 1x1 box at `pos`
pub(crate) fn contains_probe(bounds: Rect, pos: Pos2) -> bool {
    bounds.is_positive() && bounds.contains_rect(Rect::from_min_size(pos, Vec2::splat(1.0)))
}

/// True when every translated point keeps its tolerance box inside `container`
pub(crate) fn fits_after_translate(points: &[Pos2], delta: Vec2, container: Rect) -> bool {
    points
        .iter()
        .all(|p| container.contains_rect(point_box(*p + delta, TOLERANCE as f32)))
}

/// Fixed-size list of construction points filled strictly in order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ControlPoints<const N: usize> {
    slots: [Option<Pos2>; N],
}

impl<const N: usize> ControlPoints<N> {
    pub(crate) fn new(first: Pos2) -> Self {
        let mut slots = [None; N];
        slots[0] = Some(first);
        Self { slots }
    }

    pub(crate) fn from_slots(slots: [Option<Pos2>; N]) -> Self {
        Self { slots }
    }

    /// Fill the first unset slot. Returns true when that slot was the last one.
    pub(crate) fn push(&mut self, pos: Pos2) -> bool {
        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(pos);
                self.is_full()
            }
            None => false,
        }
    }

    pub(crate) fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub(crate) fn set(&self) -> Vec<Pos2> {
        self.slots.iter().flatten().copied().collect()
    }

    pub(crate) fn get(&self, index: usize) -> Option<Pos2> {
        self.slots.get(index).copied().flatten()
    }

    pub(crate) fn first(&self) -> Option<Pos2> {
        self.slots.iter().flatten().next().copied()
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        for slot in self.slots.iter_mut().flatten() {
            *slot += delta;
        }
    }

    /// Translate only if every set point stays inside `container`
    pub(crate) fn try_translate(&mut self, delta: Vec2, container: Rect) -> bool {
        if !fits_after_translate(&self.set(), delta, container) {
            return false;
        }
        self.translate(delta);
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SavedColors {
    pen: Color32,
    brush: Color32,
}

/// State every figure carries next to its geometry: identity, style, finish
/// and selection flags.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FigureCore {
    pub(crate) id: FigureId,
    pub(crate) style: Style,
    pub(crate) finished: bool,
    selected: bool,
    saved: Option<SavedColors>,
}

impl FigureCore {
    pub(crate) fn new(style: Style, finished: bool) -> Self {
        Self {
            id: generate_id(),
            style,
            finished,
            selected: false,
            saved: None,
        }
    }

    pub(crate) fn is_selected(&self) -> bool {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        if self.selected == selected {
            return;
        }
        self.selected = selected;

        if selected {
            self.saved = Some(SavedColors {
                pen: self.style.pen_color,
                brush: self.style.brush_color,
            });
            self.style.pen_color = HIGHLIGHT_PEN;
            self.style.brush_color = HIGHLIGHT_BRUSH;
        } else if let Some(saved) = self.saved.take() {
            // A color edited while selected wins over the snapshot
            if self.style.pen_color == HIGHLIGHT_PEN {
                self.style.pen_color = saved.pen;
            }
            if self.style.brush_color == HIGHLIGHT_BRUSH {
                self.style.brush_color = saved.brush;
            }
        }
        debug!("Figure {} selected={}", self.id, selected);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_box_side() {
        let rect = point_box(Pos2::new(10.0, 10.0), 5.0);
        assert_eq!(rect.min, Pos2::new(5.0, 5.0));
        assert_eq!(rect.width(), 11.0);
        assert_eq!(rect.height(), 11.0);
    }

    #[test]
    fn test_calculate_bounds_empty() {
        assert_eq!(calculate_bounds(&[], 5.0), Rect::NOTHING);
        assert!(!contains_probe(Rect::NOTHING, Pos2::ZERO));
    }

    #[test]
    fn test_control_points_fill_in_order() {
        let mut points = ControlPoints::<3>::new(Pos2::new(1.0, 1.0));
        assert!(!points.push(Pos2::new(2.0, 2.0)));
        assert_eq!(points.get(2), None);
        assert!(points.push(Pos2::new(3.0, 3.0)));
        assert!(points.is_full());
        // Full lists ignore further points
        assert!(!points.push(Pos2::new(4.0, 4.0)));
        assert_eq!(points.set().len(), 3);
    }

    #[test]
    fn test_selection_round_trip_restores_colors() {
        let style = Style::new(Color32::RED, Color32::GREEN, 2, 3);
        let mut core = FigureCore::new(style, true);

        core.set_selected(true);
        assert!(core.style.is_highlighted());
        core.set_selected(true);
        assert!(core.style.is_highlighted());

        core.set_selected(false);
        assert_eq!(core.style, style);
        core.set_selected(false);
        assert_eq!(core.style, style);
    }

    #[test]
    fn test_color_changed_while_selected_is_kept() {
        let mut core = FigureCore::new(Style::new(Color32::RED, Color32::GREEN, 2, 3), true);
        core.set_selected(true);
        core.style.pen_color = Color32::YELLOW;
        core.set_selected(false);

        assert_eq!(core.style.pen_color, Color32::YELLOW);
        // The untouched brush must not keep the highlight
        assert_eq!(core.style.brush_color, Color32::GREEN);
    }
}
