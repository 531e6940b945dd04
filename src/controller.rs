use std::cell::RefCell;
use std::rc::Rc;

use egui::{Key, Modifiers, PointerButton, Pos2, Rect, Vec2};
use log::{debug, info};

use crate::error::{FigureError, FigureResult};
use crate::figure::{Figure, factory};
use crate::id_generator::FigureId;
use crate::input::InputEvent;
use crate::state::{Configuration, Storage};

/// Turns canvas input into storage mutations.
///
/// Clicks place figures with the active tool, select and drag existing
/// figures, or clear the selection. Keys delete, resize and deselect.
#[derive(Debug)]
pub struct CanvasController {
    config: Rc<Configuration>,
    storage: Rc<RefCell<Storage>>,
    last_pointer: Option<Pos2>,
    dragging: bool,
    /// Figure pressed without moving; becomes the sole selection on release
    pending_click: Option<FigureId>,
}

/// Shift or Ctrl/Cmd extends the selection instead of replacing it
fn is_toggle(modifiers: Modifiers) -> bool {
    modifiers.shift || modifiers.command
}

impl CanvasController {
    pub fn new(config: Rc<Configuration>, storage: Rc<RefCell<Storage>>) -> Self {
        Self {
            config,
            storage,
            last_pointer: None,
            dragging: false,
            pending_click: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Dispatch one input event
    pub fn handle_event(&mut self, event: &InputEvent) -> FigureResult<()> {
        match event {
            InputEvent::PointerDown {
                pos,
                button: PointerButton::Primary,
                modifiers,
            } => self.on_pointer_down(*pos, *modifiers),
            InputEvent::PointerMove { pos, held_buttons } => {
                self.on_pointer_move(*pos, held_buttons.contains(&PointerButton::Primary))
            }
            InputEvent::PointerUp {
                button: PointerButton::Primary,
                ..
            } => self.on_pointer_up(),
            InputEvent::KeyDown { key, .. } => self.on_key(*key),
            InputEvent::Resized { size } => return self.on_resize(*size),
            _ => {}
        }
        Ok(())
    }

    pub fn on_pointer_down(&mut self, pos: Pos2, modifiers: Modifiers) {
        self.last_pointer = Some(pos);
        self.pending_click = None;

        let under_construction = self.storage.borrow().incomplete().is_some();
        if under_construction {
            if self.config.active_tool().is_some() {
                self.place(pos);
                return;
            }
            // Without a tool the construction cannot go on
            self.storage.borrow_mut().discard_incomplete();
        }

        let hit = self.storage.borrow().figure_at(pos);
        match hit {
            Some(id) if is_toggle(modifiers) => {
                self.storage.borrow_mut().toggle_selected(id);
            }
            Some(id) => {
                let selected = self
                    .storage
                    .borrow()
                    .get(id)
                    .is_some_and(|figure| figure.is_selected());
                if selected {
                    // Keep a multi-selection for dragging until we know this is a click
                    self.pending_click = Some(id);
                } else {
                    self.storage.borrow_mut().select_only(id);
                }
                self.dragging = true;
            }
            None if is_toggle(modifiers) => {}
            None => {
                let has_selection = !self.storage.borrow().get_selected().is_empty();
                if has_selection {
                    self.storage.borrow_mut().deselect_all();
                } else {
                    self.place(pos);
                }
            }
        }
    }

    pub fn on_pointer_move(&mut self, pos: Pos2, primary_held: bool) {
        let last = self.last_pointer.replace(pos);
        if !(self.dragging && primary_held) {
            return;
        }
        let Some(last) = last else {
            return;
        };
        let delta = pos - last;
        if delta == Vec2::ZERO {
            return;
        }
        self.pending_click = None;
        let container = self.config.canvas_rect();
        self.storage.borrow_mut().move_selected(delta, container);
    }

    pub fn on_pointer_up(&mut self) {
        self.dragging = false;
        if let Some(id) = self.pending_click.take() {
            self.storage.borrow_mut().select_only(id);
        }
    }

    pub fn on_key(&mut self, key: Key) {
        let mut storage = self.storage.borrow_mut();
        match key {
            Key::Delete | Key::Backspace => {
                storage.delete_selected();
            }
            Key::Plus | Key::Equals => storage.adjust_size_selected(1),
            Key::Minus => storage.adjust_size_selected(-1),
            Key::Escape => storage.deselect_all(),
            _ => {}
        }
    }

    /// Accept a new canvas size unless a finished figure that fits the
    /// current canvas would no longer fit.
    ///
    /// On rejection the configuration keeps the previous size, which the
    /// error carries so the caller can restore the view.
    pub fn on_resize(&mut self, size: Vec2) -> FigureResult<()> {
        let requested = Rect::from_min_size(Pos2::ZERO, size);
        let current = self.config.canvas_rect();
        if self.storage.borrow().clipped_by_resize(current, requested) {
            let kept = self.config.canvas_size();
            info!("Rejected canvas resize to {:?}, keeping {:?}", size, kept);
            return Err(FigureError::ResizeRejected {
                requested: size,
                kept,
            });
        }
        self.config.set_canvas_size(size);
        Ok(())
    }

    /// Instantiate the active tool's figure at `pos` and hand it to storage
    fn place(&mut self, pos: Pos2) {
        let Some(kind) = self.config.active_tool() else {
            debug!("No active tool, ignoring click at {:?}", pos);
            return;
        };
        let figure = factory::create(kind, pos, self.config.style());
        self.storage.borrow_mut().add(figure);
    }
}
