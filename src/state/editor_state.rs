//! Editor state machine for a canvas session.
//!
//! ```text
//! ┌──────────┐  start_stroke   ┌─────────────┐
//! │          ├─────────────────►             │
//! │   Idle   │                 │   Drawing   │
//! │          ◄─────────────────┤             │
//! └──────────┘   end_stroke    └─────────────┘
//! ```
//!
//! Only `Idle` permits snapshot capture; fills, clears and history
//! navigation commit any in-progress stroke first.
use crate::stroke::MutableStroke;

/// The possible states of a canvas session.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditorState {
    /// No pending stroke
    #[default]
    Idle,
    /// A stroke is in progress
    Drawing {
        stroke: MutableStroke,
    },
}

impl EditorState {
    /// Validates whether a transition to the new state is allowed
    pub fn can_transition_to(&self, new_state: &EditorState) -> bool {
        matches!(
            (self, new_state),
            (EditorState::Idle, EditorState::Drawing { .. })
                | (EditorState::Drawing { .. }, EditorState::Idle)
        )
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, EditorState::Idle)
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self, EditorState::Drawing { .. })
    }

    /// The in-progress stroke, if any
    pub fn stroke(&self) -> Option<&MutableStroke> {
        match self {
            EditorState::Drawing { stroke } => Some(stroke),
            EditorState::Idle => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EditorState::Idle => "Idle",
            EditorState::Drawing { .. } => "Drawing",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba8;
    use crate::stroke::StrokeMode;
    use egui::Pos2;

    fn drawing() -> EditorState {
        EditorState::Drawing {
            stroke: MutableStroke::new(Pos2::ZERO, Rgba8::BLACK, 5.0, StrokeMode::Paint),
        }
    }

    #[test]
    fn idle_and_drawing_alternate() {
        assert!(EditorState::Idle.can_transition_to(&drawing()));
        assert!(drawing().can_transition_to(&EditorState::Idle));
    }

    #[test]
    fn self_transitions_are_rejected() {
        assert!(!EditorState::Idle.can_transition_to(&EditorState::Idle));
        assert!(!drawing().can_transition_to(&drawing()));
    }
}
