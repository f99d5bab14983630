use crate::color::Rgba8;
use crate::config::EngineConfig;
use crate::stroke::StrokeMode;
use serde::{Deserialize, Serialize};

/// The canvas tools a pointer press can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    Pen,
    Eraser,
    Fill,
}

impl Tool {
    pub const ALL: [Tool; 3] = [Tool::Pen, Tool::Eraser, Tool::Fill];

    pub fn name(&self) -> &'static str {
        match self {
            Tool::Pen => "Pen",
            Tool::Eraser => "Eraser",
            Tool::Fill => "Fill",
        }
    }

    /// Stroke composition for stroke-based tools; `None` for the bucket
    pub fn stroke_mode(&self) -> Option<StrokeMode> {
        match self {
            Tool::Pen => Some(StrokeMode::Paint),
            Tool::Eraser => Some(StrokeMode::Erase),
            Tool::Fill => None,
        }
    }
}

/// Per-canvas tool selection, persisted by the host between runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    pub tool: Tool,
    pub color: Rgba8,
    pub brush_size: f32,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl ToolSettings {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            tool: Tool::Pen,
            color: config.default_color,
            brush_size: config.default_brush_size,
        }
    }

    /// Picking a color switches back to the pen.
    pub fn select_color(&mut self, color: Rgba8) {
        self.color = color;
        self.tool = Tool::Pen;
    }

    /// Clamps the brush into `min..=max`; non-finite sizes are ignored.
    pub fn set_brush_size(&mut self, size: f32, min: f32, max: f32) {
        if size.is_finite() {
            self.brush_size = clamp_brush_size(size, min, max);
        }
    }
}

/// Like `f32::clamp` but never panics: an inverted or NaN range resolves
/// towards `max`.
pub fn clamp_brush_size(size: f32, min: f32, max: f32) -> f32 {
    size.max(min).min(max)
}
