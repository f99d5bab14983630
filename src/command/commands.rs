use crate::stroke::StrokeMode;
use serde::{Deserialize, Serialize};

/// The edit that produced a history snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// The blank surface a session starts from
    Initial,
    /// A completed pen or eraser stroke
    Stroke { mode: StrokeMode, points: usize },
    /// A bucket fill
    Fill { pixels: usize },
    /// The surface was cleared
    Clear,
    /// A saved drawing was loaded onto the surface
    Restore,
    /// The surface was resized, content rescaled
    Resize { width: u32, height: u32 },
}

impl Command {
    /// Short label for history listings
    pub fn name(&self) -> &'static str {
        match self {
            Command::Initial => "Blank Canvas",
            Command::Stroke { mode: StrokeMode::Paint, .. } => "Pen Stroke",
            Command::Stroke { mode: StrokeMode::Erase, .. } => "Eraser Stroke",
            Command::Fill { .. } => "Bucket Fill",
            Command::Clear => "Clear",
            Command::Restore => "Restore Draft",
            Command::Resize { .. } => "Resize",
        }
    }
}
