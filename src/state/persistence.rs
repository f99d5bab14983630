use serde::{Serialize, Deserialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use image::RgbaImage;
use crate::export::{self, ExportError};
use crate::surface::RasterSurface;
use crate::util::time;

/// Errors that can occur during draft persistence operations
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize draft metadata: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to access draft files: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to encode or decode draft image: {0}")]
    ImageError(#[from] ExportError),

    #[error("Invalid draft data: {0}")]
    InvalidDraft(String),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Metadata stored next to the draft image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftMeta {
    pub title: String,
    pub tags: String,
    /// Seconds since the UNIX epoch
    pub timestamp: u64,
    /// Logical canvas size at save time
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Version of the application that wrote the draft
    pub version: String,
}

/// A draft read back from disk
#[derive(Debug, Clone)]
pub struct Draft {
    pub meta: DraftMeta,
    pub image: RgbaImage,
}

/// Stores the unpublished drawing so it survives restarts.
///
/// One draft per store: `<name>.json` holds the metadata and `<name>.png`
/// the pixels.
#[derive(Debug, Clone)]
pub struct DraftStore {
    dir: PathBuf,
    name: String,
}

impl DraftStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_name(dir, "guest_drawing")
    }

    pub fn with_name(dir: impl Into<PathBuf>, name: &str) -> Self {
        Self {
            dir: dir.into(),
            name: name.to_owned(),
        }
    }

    fn meta_path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.name))
    }

    fn image_path(&self) -> PathBuf {
        self.dir.join(format!("{}.png", self.name))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn exists(&self) -> bool {
        self.meta_path().is_file() && self.image_path().is_file()
    }

    /// Saves the surface. Blank surfaces are not saved; returns whether a draft was written.
    pub fn save(&self, surface: &RasterSurface, title: &str, tags: &str) -> PersistenceResult<bool> {
        if surface.width() == 0 || surface.height() == 0 {
            log::debug!("Canvas has no pixels, skipping draft save");
            return Ok(false);
        }
        if surface.is_blank() {
            log::debug!("Canvas is empty, not saving draft");
            return Ok(false);
        }

        fs::create_dir_all(&self.dir)?;

        let png = export::encode_png(&surface.to_rgba_image())?;
        fs::write(self.image_path(), &png)?;

        let logical = surface.logical_size();
        let meta = DraftMeta {
            title: title.to_owned(),
            tags: tags.to_owned(),
            timestamp: time::timestamp_secs(),
            canvas_width: logical.x,
            canvas_height: logical.y,
            version: env!("CARGO_PKG_VERSION").to_string(),
        };
        fs::write(self.meta_path(), serde_json::to_string_pretty(&meta)?)?;

        log::info!(
            "Draft saved to {} ({} painted pixels, {} bytes)",
            self.image_path().display(),
            surface.painted_pixel_count(),
            png.len()
        );
        Ok(true)
    }

    /// Reads the draft back, `None` if there is none.
    pub fn load(&self) -> PersistenceResult<Option<Draft>> {
        let json = match fs::read_to_string(self.meta_path()) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let meta: DraftMeta = serde_json::from_str(&json)?;

        if meta.version != env!("CARGO_PKG_VERSION") {
            log::warn!(
                "Draft version {} differs from current version {}",
                meta.version,
                env!("CARGO_PKG_VERSION")
            );
        }

        let bytes = match fs::read(self.image_path()) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(PersistenceError::InvalidDraft(format!(
                    "metadata present but {} is missing",
                    self.image_path().display()
                )));
            }
            Err(e) => return Err(e.into()),
        };
        let image = export::decode_png(&bytes)?;

        log::info!("Draft loaded ({}x{}, saved at {})", image.width(), image.height(), meta.timestamp);
        Ok(Some(Draft { meta, image }))
    }

    /// Removes the draft; a missing draft is not an error.
    pub fn delete(&self) -> PersistenceResult<()> {
        for path in [self.meta_path(), self.image_path()] {
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        log::info!("Draft removed from {}", self.dir.display());
        Ok(())
    }
}

/// Debounces draft saves: a save becomes due once the canvas has been quiet
/// for `delay_secs` after the last change.
#[derive(Debug, Clone)]
pub struct Autosave {
    delay_secs: f64,
    last_change: Option<f64>,
}

impl Autosave {
    pub fn new(delay_secs: f64) -> Self {
        Self {
            delay_secs: delay_secs.max(0.0),
            last_change: None,
        }
    }

    pub fn delay_secs(&self) -> f64 {
        self.delay_secs
    }

    /// Restarts the quiet period
    pub fn mark_dirty(&mut self, now: f64) {
        self.last_change = Some(now);
    }

    pub fn is_pending(&self) -> bool {
        self.last_change.is_some()
    }

    pub fn is_due(&self, now: f64) -> bool {
        self.last_change
            .is_some_and(|changed| now - changed >= self.delay_secs)
    }

    /// Drops any pending save, e.g. once the draft has been published or deleted.
    pub fn cancel(&mut self) {
        self.last_change = None;
    }

    /// Returns true once per quiet period and resets.
    pub fn take_due(&mut self, now: f64) -> bool {
        if self.is_due(now) {
            self.last_change = None;
            true
        } else {
            false
        }
    }
}
