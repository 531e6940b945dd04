use std::cell::{Cell, RefCell};
use std::rc::Rc;

use egui::{Pos2, Rect, Vec2};
use log::{debug, info, warn};

use crate::event::{ConfigEvent, EventBus, EventHandler, StorageEvent};
use crate::figure::{Figure, FigureType};
use crate::id_generator::FigureId;

use super::Configuration;

/// Owns every figure on the canvas, in paint order.
///
/// Later figures paint over earlier ones and win hit tests. At most one
/// figure is unfinished at any time; [`Storage::add`] keeps it that way.
///
/// The storage listens to the [`Configuration`] so that style edits made while
/// figures are selected restyle those figures. The only configuration changes
/// it skips are the ones it writes itself from [`Storage::adjust_size_selected`].
/// A configuration change arriving while the storage is borrowed elsewhere is
/// lost and logged as a warning, so do not edit the configuration while
/// holding a storage borrow. Handlers subscribed to the storage run while it
/// is mutably borrowed and must not borrow it again.
#[derive(Debug)]
pub struct Storage {
    figures: Vec<FigureType>,
    config: Rc<Configuration>,
    events: EventBus<StorageEvent>,
    /// Set while sizes are being written back to the configuration
    mirroring: Rc<Cell<bool>>,
}

impl Storage {
    /// Create an empty storage subscribed to `config`.
    ///
    /// The subscription holds a weak reference, so dropping the storage
    /// silences it.
    pub fn new(config: Rc<Configuration>) -> Rc<RefCell<Self>> {
        let mirroring = Rc::new(Cell::new(false));
        let storage = Rc::new(RefCell::new(Self {
            figures: Vec::new(),
            config: Rc::clone(&config),
            events: EventBus::new(),
            mirroring: Rc::clone(&mirroring),
        }));

        let weak = Rc::downgrade(&storage);
        config.subscribe(move |event: &ConfigEvent| {
            if mirroring.get() {
                debug!("Not re-applying mirrored {:?}", event);
                return;
            }
            let Some(storage) = weak.upgrade() else {
                return;
            };
            match storage.try_borrow_mut() {
                Ok(mut storage) => storage.apply_config_event(event),
                Err(_) => warn!("Storage borrowed, dropping {:?}", event),
            }
        });

        storage
    }

    pub fn subscribe(&self, handler: impl EventHandler<StorageEvent> + 'static) {
        self.events.subscribe(handler);
    }

    pub fn config(&self) -> &Rc<Configuration> {
        &self.config
    }

    pub fn figures(&self) -> &[FigureType] {
        &self.figures
    }

    pub fn len(&self) -> usize {
        self.figures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    pub fn get(&self, id: FigureId) -> Option<&FigureType> {
        self.figures.iter().find(|figure| figure.id() == id)
    }

    /// The figure still waiting for construction points, if any
    pub fn incomplete(&self) -> Option<&FigureType> {
        self.figures.iter().find(|figure| !figure.is_finished())
    }

    fn incomplete_index(&self) -> Option<usize> {
        self.figures.iter().position(|figure| !figure.is_finished())
    }

    /// Add a figure, or feed it into the figure under construction.
    ///
    /// A candidate of the same kind as the unfinished figure only carries its
    /// first point into it and is then dropped. A candidate of another kind
    /// aborts the unfinished figure before being inserted itself.
    pub fn add(&mut self, candidate: FigureType) {
        if let Some(index) = self.incomplete_index() {
            if self.figures[index].kind() == candidate.kind() {
                if let Some(pos) = candidate.first_point() {
                    self.figures[index].continue_with_point(pos);
                    debug!(
                        "Continued {} {} at {:?}",
                        self.figures[index].kind(),
                        self.figures[index].id(),
                        pos
                    );
                }
                self.emit_changed();
                return;
            }

            let stale = self.figures.remove(index);
            warn!(
                "Discarding unfinished {} {} for a new {}",
                stale.kind(),
                stale.id(),
                candidate.kind()
            );
            self.events.emit(StorageEvent::Notice(format!(
                "Unfinished {} was discarded",
                stale.kind()
            )));
        }

        info!("Added {} {}", candidate.kind(), candidate.id());
        self.figures.push(candidate);
        self.emit_changed();
    }

    /// Drop the figure under construction, telling the user about it
    pub fn discard_incomplete(&mut self) -> bool {
        let Some(index) = self.incomplete_index() else {
            return false;
        };
        let stale = self.figures.remove(index);
        warn!("Discarding unfinished {} {}", stale.kind(), stale.id());
        self.events.emit(StorageEvent::Notice(format!(
            "Unfinished {} was discarded",
            stale.kind()
        )));
        self.emit_changed();
        true
    }

    /// Selected figures in storage order
    pub fn get_selected(&self) -> Vec<&FigureType> {
        self.figures.iter().filter(|figure| figure.is_selected()).collect()
    }

    pub fn selected_ids(&self) -> Vec<FigureId> {
        self.get_selected().iter().map(|figure| figure.id()).collect()
    }

    /// Topmost finished figure whose bounds contain `pos`
    pub fn figure_at(&self, pos: Pos2) -> Option<FigureId> {
        self.figures
            .iter()
            .rev()
            .find(|figure| figure.is_finished() && figure.hit_test(pos))
            .map(|figure| figure.id())
    }

    /// Make `id` the only selected figure
    pub fn select_only(&mut self, id: FigureId) {
        let mut changed = false;
        for figure in &mut self.figures {
            let selected = figure.id() == id;
            if figure.is_selected() != selected {
                figure.set_selected(selected);
                changed = true;
            }
        }
        if changed {
            self.emit_changed();
        }
    }

    pub fn toggle_selected(&mut self, id: FigureId) {
        if let Some(figure) = self.figures.iter_mut().find(|figure| figure.id() == id) {
            let selected = !figure.is_selected();
            figure.set_selected(selected);
            self.emit_changed();
        }
    }

    pub fn deselect_all(&mut self) {
        let mut changed = false;
        for figure in self.figures.iter_mut().filter(|figure| figure.is_selected()) {
            figure.set_selected(false);
            changed = true;
        }
        if changed {
            self.emit_changed();
        }
    }

    pub fn delete(&mut self, id: FigureId) -> bool {
        self.remove_where(|figure| figure.id() == id) > 0
    }

    pub fn delete_selected(&mut self) -> usize {
        self.remove_where(|figure| figure.is_selected())
    }

    pub fn clear_all(&mut self) -> usize {
        self.remove_where(|_| true)
    }

    fn remove_where(&mut self, remove: impl Fn(&FigureType) -> bool) -> usize {
        let before = self.figures.len();
        self.figures.retain(|figure| !remove(figure));
        let removed = before - self.figures.len();
        if removed > 0 {
            info!("Removed {} figure(s)", removed);
            self.emit_changed();
        }
        removed
    }

    /// Move every selected figure by `delta`.
    ///
    /// Each figure is checked against `container` on its own; one that would
    /// leave it stays put without stopping the others. Returns how many moved.
    pub fn move_selected(&mut self, delta: Vec2, container: Rect) -> usize {
        let moved = self
            .figures
            .iter_mut()
            .filter(|figure| figure.is_selected())
            .map(|figure| figure.change_position(delta, container))
            .filter(|moved| *moved)
            .count();
        if moved > 0 {
            self.emit_changed();
        }
        moved
    }

    /// Grow or shrink the pen width (and radius) of every selected figure.
    ///
    /// Sizes never drop below 1. The last adjusted values are written back to
    /// the configuration so the style panel shows them.
    pub fn adjust_size_selected(&mut self, delta: i32) {
        let mut last_width = None;
        let mut last_radius = None;

        for figure in self.figures.iter_mut().filter(|figure| figure.is_selected()) {
            let style = figure.style_mut();
            style.pen_width = style.pen_width.saturating_add_signed(delta).max(1);
            last_width = Some(style.pen_width);

            if let Some(radius) = figure.radius() {
                figure.set_radius(radius.saturating_add_signed(delta).max(1));
                last_radius = figure.radius();
            }
        }

        let Some(width) = last_width else {
            return;
        };
        self.emit_changed();
        self.mirroring.set(true);
        self.config.set_pen_width(width);
        if let Some(radius) = last_radius {
            self.config.set_radius(radius);
        }
        self.mirroring.set(false);
    }

    /// True when some finished figure inside `current` would stick out of
    /// `requested`. Figures already sticking out of `current` are ignored.
    pub fn clipped_by_resize(&self, current: Rect, requested: Rect) -> bool {
        self.figures
            .iter()
            .filter(|figure| figure.is_finished())
            .map(|figure| figure.bounds())
            .any(|bounds| current.contains_rect(bounds) && !requested.contains_rect(bounds))
    }

    /// Push a configuration style change onto the selected figures
    fn apply_config_event(&mut self, event: &ConfigEvent) {
        let apply: Box<dyn Fn(&mut FigureType)> = match *event {
            ConfigEvent::PenColorChanged(color) => {
                Box::new(move |figure: &mut FigureType| figure.style_mut().pen_color = color)
            }
            ConfigEvent::BrushColorChanged(color) => {
                Box::new(move |figure: &mut FigureType| figure.style_mut().brush_color = color)
            }
            ConfigEvent::PenWidthChanged(width) => {
                Box::new(move |figure: &mut FigureType| figure.style_mut().pen_width = width)
            }
            ConfigEvent::RadiusChanged(radius) => Box::new(move |figure: &mut FigureType| {
                if figure.radius().is_some() {
                    figure.set_radius(radius);
                }
            }),
            ConfigEvent::ToolChanged(_) | ConfigEvent::CanvasSizeChanged(_) => return,
        };

        let mut touched = 0;
        for figure in self.figures.iter_mut().filter(|figure| figure.is_selected()) {
            apply(figure);
            touched += 1;
        }
        if touched > 0 {
            debug!("Applied {:?} to {} selected figure(s)", event, touched);
            self.emit_changed();
        }
    }

    fn emit_changed(&self) {
        self.events.emit(StorageEvent::Changed);
    }
}
