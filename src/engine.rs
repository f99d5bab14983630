//! The per-canvas paint session.
//!
//! `PaintEngine` owns the raster surface and everything that mutates it:
//! the stroke renderer, the bucket fill and the snapshot history. Host code
//! drives it with logical pointer coordinates; none of the editing
//! operations fail, they report whether anything changed.
use crate::color::Rgba8;
use crate::command::{Command, CommandError, CommandResult, SnapshotHistory};
use crate::config::EngineConfig;
use crate::error::TransitionError;
use crate::event::{EventBus, EventHandler, PaintEvent};
use crate::export::{self, ExportError};
use crate::fill::{self, FillOutcome};
use crate::renderer::StrokeRenderer;
use crate::state::EditorState;
use crate::stroke::{MutableStroke, Stroke, StrokeMode};
use crate::surface::RasterSurface;
use crate::tools::{ToolSettings, clamp_brush_size};
use egui::Pos2;
use image::RgbaImage;
use std::fmt;
use uuid::Uuid;

/// Identifies one canvas instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanvasId(Uuid);

impl CanvasId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CanvasId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CanvasId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug)]
pub struct PaintEngine {
    id: CanvasId,
    config: EngineConfig,
    surface: RasterSurface,
    history: SnapshotHistory,
    state: EditorState,
    settings: ToolSettings,
    event_bus: EventBus,
    /// Bumped on every pixel change so hosts know when to re-upload
    revision: u64,
}

impl PaintEngine {
    /// Creates a blank session and records the blank surface as the first snapshot.
    ///
    /// An invalid `config` is replaced by the defaults.
    pub fn new(logical_width: f32, logical_height: f32, device_pixel_ratio: f32, config: EngineConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("Invalid engine config ({}), using defaults", e);
                EngineConfig::default()
            }
        };
        let surface = RasterSurface::new(logical_width, logical_height, device_pixel_ratio);
        let mut history = SnapshotHistory::new(config.history_depth);
        history.capture(&surface, Command::Initial);

        let engine = Self {
            id: CanvasId::new(),
            settings: ToolSettings::from_config(&config),
            config,
            surface,
            history,
            state: EditorState::Idle,
            event_bus: EventBus::new(),
            revision: 0,
        };
        log::info!(
            "Canvas {} created: {}x{} physical pixels (dpr {})",
            engine.id,
            engine.surface.width(),
            engine.surface.height(),
            engine.surface.device_pixel_ratio()
        );
        engine
    }

    /// A session with default configuration at pixel ratio 1.
    pub fn with_size(logical_width: f32, logical_height: f32) -> Self {
        Self::new(logical_width, logical_height, 1.0, EngineConfig::default())
    }

    pub fn id(&self) -> CanvasId {
        self.id
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut ToolSettings {
        &mut self.settings
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.event_bus.subscribe(handler);
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Brush size within the configured bounds
    pub fn set_brush_size(&mut self, size: f32) {
        let (min, max) = (self.config.min_brush_size, self.config.max_brush_size);
        self.settings.set_brush_size(size, min, max);
    }

    pub fn increase_brush_size(&mut self) {
        self.set_brush_size(self.settings.brush_size + 1.0);
    }

    pub fn decrease_brush_size(&mut self) {
        self.set_brush_size(self.settings.brush_size - 1.0);
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    fn transition_to(&mut self, new_state: EditorState) -> Result<(), TransitionError> {
        if !self.state.can_transition_to(&new_state) {
            return Err(TransitionError::InvalidStateTransition {
                from: self.state.name(),
                to: new_state.name(),
            });
        }

        let old = self.state.name();
        self.state = new_state;
        self.event_bus.emit(PaintEvent::StateChanged {
            old,
            new: self.state.name(),
        });
        Ok(())
    }

    /// Appends the surface to the history. Refused while a stroke is in progress.
    fn capture(&mut self, command: Command) -> CommandResult {
        if !self.state.is_idle() {
            return Err(TransitionError::CaptureWhileDrawing.into());
        }
        self.history.capture(&self.surface, command);
        self.event_bus.emit(PaintEvent::SnapshotCaptured {
            depth: self.history.undo_stack().len(),
        });
        Ok(())
    }

    fn capture_or_log(&mut self, command: Command) {
        if let Err(e) = self.capture(command) {
            log::warn!("Skipped {} snapshot: {}", command.name(), e);
        }
    }

    /// Commits the in-progress stroke, if any.
    fn commit_pending_stroke(&mut self) {
        if self.state.is_drawing() {
            self.end_stroke();
        }
    }

    /// Begins a stroke at `point` and renders its round starting dot.
    ///
    /// A stroke already in progress is committed first.
    pub fn start_stroke(&mut self, point: Pos2, color: Rgba8, width: f32, mode: StrokeMode) -> bool {
        self.commit_pending_stroke();

        let width = clamp_brush_size(width, self.config.min_brush_size, self.config.max_brush_size);
        let stroke = MutableStroke::new(point, color, width, mode);
        if let Err(e) = self.transition_to(EditorState::Drawing { stroke }) {
            log::warn!("Cannot start stroke: {}", e);
            return false;
        }

        StrokeRenderer::render_segment(&mut self.surface, point, point, color, width, mode);
        self.touch();
        self.event_bus.emit(PaintEvent::StrokeStarted { mode });
        true
    }

    /// Draws a segment from the last stroke point to `point`. No-op when idle.
    pub fn extend_stroke(&mut self, point: Pos2) -> bool {
        let EditorState::Drawing { stroke } = &mut self.state else {
            return false;
        };

        let from = stroke.last_point().unwrap_or(point);
        stroke.add_point(point);
        StrokeRenderer::render_segment(
            &mut self.surface,
            from,
            point,
            stroke.color(),
            stroke.width(),
            stroke.mode(),
        );
        self.touch();
        true
    }

    /// Finishes the stroke and snapshots the result. Returns the finished stroke.
    pub fn end_stroke(&mut self) -> Option<Stroke> {
        let EditorState::Drawing { stroke } = std::mem::take(&mut self.state) else {
            return None;
        };
        self.event_bus.emit(PaintEvent::StateChanged {
            old: "Drawing",
            new: self.state.name(),
        });

        let stroke = stroke.into_stroke();
        let command = Command::Stroke {
            mode: stroke.mode(),
            points: stroke.points().len(),
        };
        self.capture_or_log(command);
        self.event_bus.emit(PaintEvent::StrokeCompleted {
            mode: stroke.mode(),
            points: stroke.points().len(),
        });
        Some(stroke)
    }

    /// Bucket-fills the region under the logical `point` with `color`.
    pub fn fill_at(&mut self, point: Pos2, color: Rgba8) -> FillOutcome {
        self.commit_pending_stroke();

        let (x, y) = self.surface.physical_pixel_at(point);
        let outcome = fill::flood_fill(&mut self.surface, x, y, color, self.config.fill_tolerance);

        match outcome {
            FillOutcome::Filled { pixels } => {
                self.touch();
                self.capture_or_log(Command::Fill { pixels });
                self.event_bus.emit(PaintEvent::Filled { pixels });
            }
            FillOutcome::OutOfBounds => {
                log::debug!("{}", CommandError::OutOfBoundsSeed { x, y });
            }
            FillOutcome::AlreadyFilled => {
                log::debug!("Fill at ({x}, {y}) skipped: region already {color}");
            }
        }
        outcome
    }

    /// Resets the surface to transparent and snapshots it.
    pub fn clear(&mut self) {
        self.commit_pending_stroke();
        self.surface.clear();
        self.touch();
        self.capture_or_log(Command::Clear);
        self.event_bus.emit(PaintEvent::Cleared);
    }

    /// Steps back one snapshot. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.commit_pending_stroke();

        match self.history.undo() {
            Ok(snapshot) => {
                snapshot.restore_into(&mut self.surface);
                self.touch();
                self.event_bus.emit(PaintEvent::Undone);
                true
            }
            Err(e) => {
                log::debug!("Undo ignored: {}", e);
                false
            }
        }
    }

    /// Re-applies the last undone snapshot. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.commit_pending_stroke();

        match self.history.redo() {
            Ok(snapshot) => {
                snapshot.restore_into(&mut self.surface);
                self.touch();
                self.event_bus.emit(PaintEvent::Redone);
                true
            }
            Err(e) => {
                log::debug!("Redo ignored: {}", e);
                false
            }
        }
    }

    /// PNG encoding of the current surface.
    pub fn export_image(&self) -> Result<Vec<u8>, ExportError> {
        export::encode_png(&self.surface.to_rgba_image())
    }

    /// PNG of the drawing composited over a white background and the template.
    pub fn export_composite(&self, template: Option<&RgbaImage>) -> Result<Vec<u8>, ExportError> {
        let composite = export::composite(&self.surface, template, self.config.fallback_template_size);
        export::encode_png(&composite)
    }

    /// Changes the logical size or pixel ratio, rescaling the current content.
    pub fn resize(&mut self, logical_width: f32, logical_height: f32, device_pixel_ratio: f32) {
        self.commit_pending_stroke();

        self.surface = self.surface.resized(logical_width, logical_height, device_pixel_ratio);
        self.touch();
        let (width, height) = (self.surface.width(), self.surface.height());
        log::info!("Canvas {} resized to {}x{} physical pixels", self.id, width, height);

        self.capture_or_log(Command::Resize { width, height });
        self.event_bus.emit(PaintEvent::Resized { width, height });
    }

    /// Replaces the surface with a saved drawing stretched to fit, then snapshots it.
    pub fn restore_image(&mut self, image: &RgbaImage) {
        self.commit_pending_stroke();

        self.surface.draw_image_scaled(image);
        self.touch();
        self.capture_or_log(Command::Restore);
        self.event_bus.emit(PaintEvent::Restored);
    }
}
