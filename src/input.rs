use egui::{Context, Key, Modifiers, PointerButton, Pos2, Rect, Vec2};

/// Input the canvas controller reacts to, in canvas-local coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse button was pressed over the canvas
    PointerDown {
        pos: Pos2,
        button: PointerButton,
        modifiers: Modifiers,
    },
    /// Mouse moved (with or without buttons pressed)
    PointerMove {
        pos: Pos2,
        /// Buttons that are currently held down
        held_buttons: Vec<PointerButton>,
    },
    /// Mouse button was released
    PointerUp { pos: Pos2, button: PointerButton },
    /// Key was pressed
    KeyDown { key: Key, modifiers: Modifiers },
    /// The canvas area changed size
    Resized { size: Vec2 },
}

const BUTTONS: [PointerButton; 3] = [
    PointerButton::Primary,
    PointerButton::Secondary,
    PointerButton::Middle,
];

/// Handles converting raw egui input into canvas [`InputEvent`]s
#[derive(Debug)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
    reported_size: Option<Vec2>,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect,
            reported_size: None,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    fn to_local(&self, pos: Pos2) -> Pos2 {
        pos - self.canvas_rect.min.to_vec2()
    }

    /// Process raw egui input and generate our InputEvents
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();

        let size = self.canvas_rect.size();
        if self.reported_size != Some(size) {
            self.reported_size = Some(size);
            events.push(InputEvent::Resized { size });
        }

        let wants_keyboard = ctx.wants_keyboard_input();
        // Presses over windows floating above the canvas belong to them
        let over_canvas = ctx
            .pointer_hover_pos()
            .and_then(|pos| ctx.layer_id_at(pos))
            .is_none_or(|layer| layer.order == egui::Order::Background);
        ctx.input(|input| {
            if let Some(pos) = input.pointer.hover_pos() {
                if Some(pos) != self.last_pointer_pos {
                    let held_buttons = BUTTONS
                        .into_iter()
                        .filter(|button| input.pointer.button_down(*button))
                        .collect();
                    events.push(InputEvent::PointerMove {
                        pos: self.to_local(pos),
                        held_buttons,
                    });
                }
                self.last_pointer_pos = Some(pos);

                for button in BUTTONS {
                    if input.pointer.button_pressed(button)
                        && over_canvas
                        && self.canvas_rect.contains(pos)
                    {
                        events.push(InputEvent::PointerDown {
                            pos: self.to_local(pos),
                            button,
                            modifiers: input.modifiers,
                        });
                    }
                    if input.pointer.button_released(button) {
                        events.push(InputEvent::PointerUp {
                            pos: self.to_local(pos),
                            button,
                        });
                    }
                }
            } else {
                self.last_pointer_pos = None;
            }

            if wants_keyboard {
                return;
            }
            for event in &input.raw.events {
                if let egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } = event
                {
                    events.push(InputEvent::KeyDown {
                        key: *key,
                        modifiers: *modifiers,
                    });
                }
            }
        });

        events
    }
}
