use std::fmt;

/// Errors that can occur during editor state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// Attempted to transition between incompatible states
    InvalidStateTransition {
        from: &'static str,
        to: &'static str,
    },
    /// A history snapshot was requested while a stroke is still in progress
    CaptureWhileDrawing,
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStateTransition { from, to } =>
                write!(f, "Cannot transition from {} to {}", from, to),
            Self::CaptureWhileDrawing =>
                write!(f, "Cannot capture a snapshot while a stroke is in progress"),
        }
    }
}

impl std::error::Error for TransitionError {}
