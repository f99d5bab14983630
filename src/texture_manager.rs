use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};
use image::RgbaImage;
use thiserror::Error;
use crate::engine::PaintEngine;

/// Errors that can occur during texture generation
#[derive(Error, Debug)]
pub enum TextureGenerationError {
    #[error("Invalid texture dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Keeps the GPU copies of the canvas surface and the template image.
///
/// The surface texture is re-uploaded only when the engine revision changes.
#[derive(Default)]
pub struct TextureManager {
    surface: Option<(u64, TextureHandle)>,
    template: Option<TextureHandle>,
}

impl std::fmt::Debug for TextureManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureManager")
            .field("surface_revision", &self.surface.as_ref().map(|(rev, _)| *rev))
            .field("has_template", &self.template.is_some())
            .finish()
    }
}

impl TextureManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texture for the engine's surface, uploading it if it changed
    pub fn surface_texture(
        &mut self,
        ctx: &Context,
        engine: &PaintEngine,
    ) -> Result<TextureId, TextureGenerationError> {
        let surface = engine.surface();
        if surface.width() == 0 || surface.height() == 0 {
            return Err(TextureGenerationError::InvalidDimensions {
                width: surface.width(),
                height: surface.height(),
            });
        }

        let revision = engine.revision();
        match &mut self.surface {
            Some((cached, handle)) if *cached == revision => return Ok(handle.id()),
            Some((cached, handle)) => {
                handle.set(surface.to_color_image(), TextureOptions::LINEAR);
                *cached = revision;
                return Ok(handle.id());
            }
            None => {}
        }

        let name = format!("canvas_{}", engine.id());
        let handle = ctx.load_texture(name, surface.to_color_image(), TextureOptions::LINEAR);
        let id = handle.id();
        self.surface = Some((revision, handle));
        Ok(id)
    }

    /// Uploads the template image once
    pub fn set_template(&mut self, ctx: &Context, template: &RgbaImage) -> Result<TextureId, TextureGenerationError> {
        let (width, height) = template.dimensions();
        if width == 0 || height == 0 {
            return Err(TextureGenerationError::InvalidDimensions { width, height });
        }
        let image = ColorImage::from_rgba_unmultiplied([width as usize, height as usize], template.as_raw());
        let handle = ctx.load_texture("template", image, TextureOptions::LINEAR);
        let id = handle.id();
        self.template = Some(handle);
        Ok(id)
    }

    pub fn template_texture(&self) -> Option<TextureId> {
        self.template.as_ref().map(TextureHandle::id)
    }
}
