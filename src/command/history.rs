use super::{Command, CommandError, CommandResult, Snapshot};
use crate::surface::RasterSurface;
use std::collections::VecDeque;

/// Number of snapshots kept when no depth is configured.
pub const DEFAULT_HISTORY_DEPTH: usize = 5;

/// Bounded snapshot-based undo/redo.
///
/// The tail of the undo stack is always the state currently on the surface,
/// so the oldest entry left after eviction acts as the floor that undo never
/// goes below.
#[derive(Debug, Clone)]
pub struct SnapshotHistory {
    /// Snapshots that can be returned to, oldest first
    undo_stack: VecDeque<Snapshot>,
    /// Snapshots that were undone, most recently undone last
    redo_stack: Vec<Snapshot>,
    max_depth: usize,
}

impl Default for SnapshotHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH)
    }
}

impl SnapshotHistory {
    /// Creates an empty history retaining at most `max_depth` snapshots (at least one).
    pub fn new(max_depth: usize) -> Self {
        let max_depth = max_depth.max(1);
        Self {
            undo_stack: VecDeque::with_capacity(max_depth + 1),
            redo_stack: Vec::new(),
            max_depth,
        }
    }

    /// Records the surface as the new current state, evicting the oldest
    /// snapshot beyond the depth limit and discarding the redo branch.
    pub fn capture(&mut self, surface: &RasterSurface, command: Command) -> &Snapshot {
        self.undo_stack.push_back(Snapshot::capture(surface, command));
        while self.undo_stack.len() > self.max_depth {
            self.undo_stack.pop_front();
        }
        self.redo_stack.clear();

        log::debug!(
            "Captured {} snapshot (undo: {}, redo: 0)",
            command.name(),
            self.undo_stack.len()
        );
        &self.undo_stack[self.undo_stack.len() - 1]
    }

    /// Steps back one snapshot and returns the one the surface should now show.
    pub fn undo(&mut self) -> CommandResult<&Snapshot> {
        if self.undo_stack.len() <= 1 {
            return Err(CommandError::EmptyHistory("undo"));
        }

        if let Some(current) = self.undo_stack.pop_back() {
            self.redo_stack.push(current);
        }
        self.undo_stack
            .back()
            .ok_or(CommandError::EmptyHistory("undo"))
    }

    /// Re-applies the most recently undone snapshot and returns it.
    pub fn redo(&mut self) -> CommandResult<&Snapshot> {
        let next = self
            .redo_stack
            .pop()
            .ok_or(CommandError::EmptyHistory("redo"))?;
        self.undo_stack.push_back(next);
        self.undo_stack
            .back()
            .ok_or(CommandError::EmptyHistory("redo"))
    }

    /// The snapshot matching the surface, if any has been captured
    pub fn current(&self) -> Option<&Snapshot> {
        self.undo_stack.back()
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_stack(&self) -> &VecDeque<Snapshot> {
        &self.undo_stack
    }

    pub fn redo_stack(&self) -> &[Snapshot] {
        &self.redo_stack
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba8;

    #[test]
    fn zero_depth_keeps_one_snapshot() {
        let surface = RasterSurface::with_physical_size(2, 2);
        let mut history = SnapshotHistory::new(0);
        history.capture(&surface, Command::Initial);
        history.capture(&surface, Command::Clear);
        assert_eq!(history.max_depth(), 1);
        assert_eq!(history.undo_stack().len(), 1);
        assert_eq!(history.current().map(Snapshot::command), Some(Command::Clear));
    }

    #[test]
    fn undo_then_capture_discards_redo_branch() {
        let mut surface = RasterSurface::with_physical_size(2, 2);
        let mut history = SnapshotHistory::default();
        history.capture(&surface, Command::Initial);
        surface.set_pixel(0, 0, Rgba8::BLACK);
        history.capture(&surface, Command::Fill { pixels: 1 });

        assert!(history.undo().is_ok());
        assert!(history.can_redo());

        history.capture(&surface, Command::Clear);
        assert!(!history.can_redo());
        assert_eq!(history.redo(), Err(CommandError::EmptyHistory("redo")));
    }

    #[test]
    fn empty_history_cannot_undo() {
        let mut history = SnapshotHistory::default();
        assert!(history.current().is_none());
        assert_eq!(history.undo(), Err(CommandError::EmptyHistory("undo")));
    }
}
