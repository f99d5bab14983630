use crate::color::Rgba8;
use egui::Pos2;
use serde::{Deserialize, Serialize};

/// How a stroke composes onto the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StrokeMode {
    /// Replace covered pixels with the stroke color
    #[default]
    Paint,
    /// Clear covered pixels to transparent
    Erase,
}

// Completed stroke, kept for event reporting and replay
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    points: Vec<Pos2>,
    color: Rgba8,
    width: f32,
    mode: StrokeMode,
}

// Stroke being drawn while the pointer is held down
#[derive(Debug, Clone, PartialEq)]
pub struct MutableStroke {
    points: Vec<Pos2>,
    color: Rgba8,
    width: f32,
    mode: StrokeMode,
}

impl Stroke {
    pub fn new(color: Rgba8, width: f32, mode: StrokeMode, points: Vec<Pos2>) -> Self {
        Self {
            points,
            color,
            width,
            mode,
        }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Rgba8 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn mode(&self) -> StrokeMode {
        self.mode
    }
}

impl MutableStroke {
    /// Begins a stroke at `start`.
    pub fn new(start: Pos2, color: Rgba8, width: f32, mode: StrokeMode) -> Self {
        Self {
            points: vec![start],
            color,
            width,
            mode,
        }
    }

    pub fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    pub fn last_point(&self) -> Option<Pos2> {
        self.points.last().copied()
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Rgba8 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn mode(&self) -> StrokeMode {
        self.mode
    }

    pub fn into_stroke(self) -> Stroke {
        Stroke::new(self.color, self.width, self.mode, self.points)
    }
}
