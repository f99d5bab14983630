use egui::{Context, PointerButton, Pos2, Rect, Vec2};

mod router;
pub use router::route_event;

/// Pointer input already translated into surface-local logical coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed over the canvas
    PointerDown { position: Pos2 },
    /// Pointer moved while the press that started on the canvas is held
    PointerMove { position: Pos2 },
    /// Primary button released after a press on the canvas
    PointerUp { position: Pos2 },
}

/// Maps a screen position into the logical coordinate space of a canvas
/// displayed in `canvas_rect`.
pub fn to_canvas_local(screen: Pos2, canvas_rect: Rect, logical_size: Vec2) -> Pos2 {
    let scale_x = if canvas_rect.width() > 0.0 {
        logical_size.x / canvas_rect.width()
    } else {
        1.0
    };
    let scale_y = if canvas_rect.height() > 0.0 {
        logical_size.y / canvas_rect.height()
    } else {
        1.0
    };
    Pos2::new(
        (screen.x - canvas_rect.min.x) * scale_x,
        (screen.y - canvas_rect.min.y) * scale_y,
    )
}

/// Turns raw egui pointer state into canvas `InputEvent`s.
///
/// Only presses that begin over the canvas produce events; the drag that
/// follows is tracked until release even if it leaves the canvas.
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    pressed_on_canvas: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_tracking(&self) -> bool {
        self.pressed_on_canvas
    }

    /// Process this frame's pointer input for a canvas shown in `canvas_rect`
    pub fn process_input(&mut self, ctx: &Context, canvas_rect: Rect, logical_size: Vec2) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let local = |pos: Pos2| to_canvas_local(pos, canvas_rect, logical_size);

        ctx.input(|input| {
            let pointer_pos = input.pointer.interact_pos();

            let pressed_at = pointer_pos
                .filter(|_| input.pointer.button_pressed(PointerButton::Primary))
                .filter(|pos| canvas_rect.contains(*pos));
            if let Some(pos) = pressed_at {
                self.pressed_on_canvas = true;
                self.last_pointer_pos = Some(pos);
                events.push(InputEvent::PointerDown { position: local(pos) });
            }

            if !self.pressed_on_canvas {
                return;
            }

            let moved_to = pointer_pos
                .filter(|_| input.pointer.primary_down())
                .filter(|pos| Some(*pos) != self.last_pointer_pos);
            if let Some(pos) = moved_to {
                self.last_pointer_pos = Some(pos);
                events.push(InputEvent::PointerMove { position: local(pos) });
            }

            if input.pointer.button_released(PointerButton::Primary) {
                let pos = pointer_pos
                    .or(self.last_pointer_pos)
                    .unwrap_or(canvas_rect.min);
                events.push(InputEvent::PointerUp { position: local(pos) });
                self.pressed_on_canvas = false;
                self.last_pointer_pos = None;
            }
        });

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Event, Modifiers, RawInput};

    fn button(pos: Pos2, pressed: bool) -> Event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::default(),
        }
    }

    fn frame(
        ctx: &Context,
        handler: &mut InputHandler,
        canvas_rect: Rect,
        events: Vec<Event>,
    ) -> Vec<InputEvent> {
        let mut produced = Vec::new();
        let input = RawInput {
            events,
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| {
            produced = handler.process_input(ctx, canvas_rect, canvas_rect.size());
        });
        produced
    }

    #[test]
    fn tracks_a_drag_that_starts_on_the_canvas() {
        let ctx = Context::default();
        let rect = Rect::from_min_size(Pos2::new(10.0, 10.0), Vec2::new(100.0, 100.0));
        let mut handler = InputHandler::new();

        let start = Pos2::new(20.0, 30.0);
        let down = frame(&ctx, &mut handler, rect, vec![Event::PointerMoved(start), button(start, true)]);
        assert_eq!(down, vec![InputEvent::PointerDown { position: Pos2::new(10.0, 20.0) }]);
        assert!(handler.is_tracking());

        let next = Pos2::new(50.0, 40.0);
        let moved = frame(&ctx, &mut handler, rect, vec![Event::PointerMoved(next)]);
        assert_eq!(moved, vec![InputEvent::PointerMove { position: Pos2::new(40.0, 30.0) }]);

        let up = frame(&ctx, &mut handler, rect, vec![button(next, false)]);
        assert_eq!(up, vec![InputEvent::PointerUp { position: Pos2::new(40.0, 30.0) }]);
        assert!(!handler.is_tracking());
    }

    #[test]
    fn ignores_presses_outside_the_canvas() {
        let ctx = Context::default();
        let rect = Rect::from_min_size(Pos2::new(10.0, 10.0), Vec2::new(100.0, 100.0));
        let mut handler = InputHandler::new();

        let outside = Pos2::new(300.0, 300.0);
        let events = frame(&ctx, &mut handler, rect, vec![Event::PointerMoved(outside), button(outside, true)]);

        assert!(events.is_empty());
        assert!(!handler.is_tracking());
    }

    #[test]
    fn maps_screen_to_logical_coordinates() {
        let rect = Rect::from_min_size(Pos2::new(100.0, 50.0), Vec2::new(300.0, 200.0));
        let logical = Vec2::new(600.0, 400.0);
        assert_eq!(to_canvas_local(Pos2::new(100.0, 50.0), rect, logical), Pos2::ZERO);
        assert_eq!(
            to_canvas_local(Pos2::new(250.0, 150.0), rect, logical),
            Pos2::new(300.0, 200.0)
        );
    }

    #[test]
    fn degenerate_rect_uses_unit_scale() {
        let rect = Rect::from_min_size(Pos2::new(10.0, 10.0), Vec2::ZERO);
        assert_eq!(
            to_canvas_local(Pos2::new(15.0, 12.0), rect, Vec2::new(100.0, 100.0)),
            Pos2::new(5.0, 2.0)
        );
    }
}
