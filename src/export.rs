use crate::surface::RasterSurface;
use image::{ImageFormat, Rgba, RgbaImage, imageops};
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while encoding or compositing images
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot export an empty {width}x{height} surface")]
    EmptySurface { width: u32, height: u32 },
}

/// PNG-encodes an image
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(ExportError::EmptySurface {
            width: image.width(),
            height: image.height(),
        });
    }
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Decodes PNG bytes into straight RGBA
pub fn decode_png(bytes: &[u8]) -> Result<RgbaImage, ExportError> {
    Ok(image::load_from_memory_with_format(bytes, ImageFormat::Png)?.to_rgba8())
}

/// Loads the template picture drawn underneath the canvas
pub fn load_template(path: impl AsRef<Path>) -> Result<RgbaImage, ExportError> {
    let path = path.as_ref();
    let template = image::open(path)?.to_rgba8();
    log::info!(
        "Loaded template {} ({}x{})",
        path.display(),
        template.width(),
        template.height()
    );
    Ok(template)
}

/// Builds the publishable picture: white background, then the template, then
/// the drawing stretched to the template's natural size (or `fallback_size`
/// when there is no template).
pub fn composite(surface: &RasterSurface, template: Option<&RgbaImage>, fallback_size: [u32; 2]) -> RgbaImage {
    let (width, height) = template
        .map(|t| t.dimensions())
        .filter(|&(w, h)| w > 0 && h > 0)
        .unwrap_or((fallback_size[0].max(1), fallback_size[1].max(1)));

    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));

    if let Some(template) = template.filter(|t| t.dimensions() == (width, height)) {
        imageops::overlay(&mut canvas, template, 0, 0);
    }

    if surface.width() > 0 && surface.height() > 0 {
        let drawing = surface.to_rgba_image();
        if drawing.dimensions() == (width, height) {
            imageops::overlay(&mut canvas, &drawing, 0, 0);
        } else {
            let scaled = imageops::resize(&drawing, width, height, imageops::FilterType::Triangle);
            imageops::overlay(&mut canvas, &scaled, 0, 0);
        }
    }

    canvas
}

/// Writes PNG bytes to disk
pub fn write_png(path: impl AsRef<Path>, bytes: &[u8]) -> Result<(), ExportError> {
    std::fs::write(path.as_ref(), bytes)?;
    log::info!("Wrote {} bytes to {}", bytes.len(), path.as_ref().display());
    Ok(())
}
