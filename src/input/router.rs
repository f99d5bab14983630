use crate::engine::PaintEngine;
use super::InputEvent;

/// Routes a canvas input event to the engine according to the active tool.
///
/// Pen and eraser turn down/move/up into the stroke lifecycle; the bucket
/// fills on press. Returns whether the event did anything.
pub fn route_event(event: &InputEvent, engine: &mut PaintEngine) -> bool {
    let settings = engine.settings().clone();

    match (*event, settings.tool.stroke_mode()) {
        (InputEvent::PointerDown { position }, Some(mode)) => {
            engine.start_stroke(position, settings.color, settings.brush_size, mode)
        }
        (InputEvent::PointerMove { position }, Some(_)) => engine.extend_stroke(position),
        (InputEvent::PointerUp { .. }, Some(_)) => engine.end_stroke().is_some(),
        (InputEvent::PointerDown { position }, None) => {
            engine.fill_at(position, settings.color).changed()
        }
        (InputEvent::PointerMove { .. } | InputEvent::PointerUp { .. }, None) => false,
    }
}
