mod commands;
mod history;
mod snapshot;

use crate::error::TransitionError;
use thiserror::Error;

pub use commands::Command;
pub use history::{DEFAULT_HISTORY_DEPTH, SnapshotHistory};
pub use snapshot::Snapshot;

/// Result type for history and surface operations
pub type CommandResult<T = ()> = Result<T, CommandError>;

/// Reasons an edit or history step did not happen.
///
/// None of these are fatal: the engine turns them into logged no-ops.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Bucket fill seeded outside the surface
    #[error("fill seed ({x}, {y}) is outside the surface")]
    OutOfBoundsSeed { x: i64, y: i64 },

    /// Undo or redo without enough history
    #[error("not enough history to {0}")]
    EmptyHistory(&'static str),

    /// The editor state does not allow the operation
    #[error(transparent)]
    StateTransition(#[from] TransitionError),
}
