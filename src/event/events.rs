use crate::stroke::StrokeMode;

/// Notifications broadcast by a paint session
#[derive(Debug, Clone, PartialEq)]
pub enum PaintEvent {
    StateChanged {
        old: &'static str,
        new: &'static str,
    },
    StrokeStarted {
        mode: StrokeMode,
    },
    StrokeCompleted {
        mode: StrokeMode,
        points: usize,
    },
    Filled {
        pixels: usize,
    },
    Cleared,
    Undone,
    Redone,
    Restored,
    Resized {
        width: u32,
        height: u32,
    },
    SnapshotCaptured {
        depth: usize,
    },
}

impl PaintEvent {
    /// True for events after which the surface content differs from the last saved draft
    pub fn modifies_surface(&self) -> bool {
        matches!(
            self,
            PaintEvent::StrokeCompleted { .. }
                | PaintEvent::Filled { .. }
                | PaintEvent::Cleared
                | PaintEvent::Undone
                | PaintEvent::Redone
                | PaintEvent::Restored
        )
    }
}
