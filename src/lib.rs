#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod color;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod export;
pub mod fill;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod state;
pub mod stroke;
pub mod surface;
pub mod texture_manager;
pub mod tools;
pub mod util;

pub use app::PaintApp;
pub use color::Rgba8;
pub use command::{Command, CommandError, SnapshotHistory};
pub use config::{AppConfig, EngineConfig};
pub use engine::{CanvasId, PaintEngine};
pub use error::TransitionError;
pub use event::{EventHandler, PaintEvent};
pub use export::ExportError;
pub use fill::{DEFAULT_FILL_TOLERANCE, FillOutcome};
pub use input::{InputEvent, InputHandler};
pub use renderer::StrokeRenderer;
pub use state::{DraftStore, EditorState};
pub use stroke::{Stroke, StrokeMode};
pub use surface::RasterSurface;
pub use tools::{Tool, ToolSettings};
