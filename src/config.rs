use crate::color::Rgba8;
use crate::command::DEFAULT_HISTORY_DEPTH;
use crate::fill::DEFAULT_FILL_TOLERANCE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Tunables of a paint session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Per-channel color distance still treated as the same region by the bucket
    pub fill_tolerance: u8,
    /// Maximum number of retained history snapshots
    pub history_depth: usize,
    pub default_brush_size: f32,
    pub min_brush_size: f32,
    pub max_brush_size: f32,
    pub default_color: Rgba8,
    /// Quiet period after the last edit before a draft is written
    pub autosave_delay_secs: f64,
    /// Publish size used when no template image is available
    pub fallback_template_size: [u32; 2],
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fill_tolerance: DEFAULT_FILL_TOLERANCE,
            history_depth: DEFAULT_HISTORY_DEPTH,
            default_brush_size: 5.0,
            min_brush_size: 1.0,
            max_brush_size: 50.0,
            default_color: Rgba8::BLACK,
            autosave_delay_secs: 2.0,
            fallback_template_size: [600, 400],
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_depth == 0 {
            return Err(ConfigError::Invalid("history_depth must be at least 1".into()));
        }
        if !(self.min_brush_size > 0.0 && self.min_brush_size <= self.max_brush_size) {
            return Err(ConfigError::Invalid(format!(
                "brush size range {}..={} is empty",
                self.min_brush_size, self.max_brush_size
            )));
        }
        if !(self.min_brush_size..=self.max_brush_size).contains(&self.default_brush_size) {
            return Err(ConfigError::Invalid(format!(
                "default_brush_size {} is outside {}..={}",
                self.default_brush_size, self.min_brush_size, self.max_brush_size
            )));
        }
        if !(self.autosave_delay_secs.is_finite() && self.autosave_delay_secs >= 0.0) {
            return Err(ConfigError::Invalid("autosave_delay_secs must be non-negative".into()));
        }
        if self.fallback_template_size.contains(&0) {
            return Err(ConfigError::Invalid("fallback_template_size must be non-zero".into()));
        }
        Ok(())
    }
}

/// Host application settings, read from a JSON file at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    /// Logical canvas size used when no template image is loaded
    pub canvas_size: [f32; 2],
    /// Image drawn under the canvas and composited into exports
    pub template_path: Option<PathBuf>,
    /// Directory for the autosaved draft
    pub draft_dir: Option<PathBuf>,
    /// Where "Export" writes the composited PNG
    pub export_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            canvas_size: [600.0, 400.0],
            template_path: None,
            draft_dir: Some(PathBuf::from("drafts")),
            export_path: PathBuf::from("drawing.png"),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Loads `path` if it exists; falls back to defaults (with a warning) otherwise.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        if !self.canvas_size.iter().all(|v| v.is_finite() && *v > 0.0) {
            return Err(ConfigError::Invalid("canvas_size must be positive".into()));
        }
        Ok(())
    }
}
