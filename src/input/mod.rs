use egui::{Context, PointerButton, Pos2, Rect};

mod router;
mod shortcuts;

pub use router::{route_event, InteractionState};
pub use shortcuts::shortcut_command;

/// Pointer events on the canvas, in canvas-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button was pressed inside the canvas
    PointerDown { position: Pos2 },
    /// Pointer moved while over the canvas
    PointerMove { position: Pos2 },
    /// Primary button was released
    PointerUp { position: Pos2 },
    /// Pointer left the canvas (or the window)
    PointerLeave,
}

/// Converts raw egui pointer input into canvas [`InputEvent`]s.
#[derive(Debug)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect,
        }
    }

    /// Update the canvas rectangle (e.g. if the layout moved it)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    fn to_canvas(&self, pos: Pos2) -> Pos2 {
        (pos - self.canvas_rect.min).to_pos2()
    }

    /// Process raw egui input and generate canvas events.
    ///
    /// `pointer_blocked` is set when another widget (a window or popup)
    /// covers the pointer; presses are then ignored but releases still pass.
    pub fn process_input(&mut self, ctx: &Context, pointer_blocked: bool) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            let inside = input
                .pointer
                .hover_pos()
                .filter(|pos| self.canvas_rect.contains(*pos));

            match (self.last_pointer_pos, inside) {
                (_, Some(pos)) if Some(pos) != self.last_pointer_pos => {
                    events.push(InputEvent::PointerMove {
                        position: self.to_canvas(pos),
                    });
                }
                (Some(_), None) => events.push(InputEvent::PointerLeave),
                _ => {}
            }
            self.last_pointer_pos = inside;

            if input.pointer.button_pressed(PointerButton::Primary) && !pointer_blocked {
                if let Some(pos) = inside {
                    events.push(InputEvent::PointerDown {
                        position: self.to_canvas(pos),
                    });
                }
            }
            if input.pointer.button_released(PointerButton::Primary) {
                if let Some(pos) = input.pointer.hover_pos() {
                    events.push(InputEvent::PointerUp {
                        position: self.to_canvas(pos),
                    });
                }
            }
        });

        events
    }
}
