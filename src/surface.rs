use crate::color::Rgba8;
use egui::{ColorImage, Pos2, Vec2};
use image::{RgbaImage, imageops};

/// The pixel grid being edited.
///
/// Pixels are straight RGBA, row-major, sized in physical pixels. The surface
/// remembers the logical size and device pixel ratio it was created for so
/// that pointer coordinates (logical) can be mapped onto it.
#[derive(Clone, PartialEq)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    device_pixel_ratio: f32,
    logical_size: Vec2,
    pixels: Vec<u8>,
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("device_pixel_ratio", &self.device_pixel_ratio)
            .field("logical_size", &self.logical_size)
            .field("pixels", &format!("<{} bytes>", self.pixels.len()))
            .finish()
    }
}

impl RasterSurface {
    /// Creates a fully transparent surface of `ceil(logical * dpr)` physical pixels.
    pub fn new(logical_width: f32, logical_height: f32, device_pixel_ratio: f32) -> Self {
        let dpr = sanitize_ratio(device_pixel_ratio);
        let logical_size = Vec2::new(logical_width.max(0.0), logical_height.max(0.0));
        let width = (logical_size.x * dpr).ceil() as u32;
        let height = (logical_size.y * dpr).ceil() as u32;

        Self {
            width,
            height,
            device_pixel_ratio: dpr,
            logical_size,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    /// A surface whose logical and physical sizes coincide.
    pub fn with_physical_size(width: u32, height: u32) -> Self {
        Self::new(width as f32, height as f32, 1.0)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn device_pixel_ratio(&self) -> f32 {
        self.device_pixel_ratio
    }

    pub fn logical_size(&self) -> Vec2 {
        self.logical_size
    }

    /// Raw RGBA bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height)
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        Some(Rgba8::new(
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ))
    }

    /// Writes one pixel; writes outside the surface are dropped.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba8) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let i = self.offset(x, y);
        self.pixels[i..i + 4].copy_from_slice(&color.to_array());
        true
    }

    /// Resets every pixel to fully transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.chunks_exact(4).all(|px| px[3] == 0)
    }

    /// Number of pixels with non-zero alpha.
    pub fn painted_pixel_count(&self) -> usize {
        self.pixels.chunks_exact(4).filter(|px| px[3] > 0).count()
    }

    /// Maps a logical (pointer) position onto physical pixel space.
    pub fn to_physical(&self, logical: Pos2) -> Pos2 {
        Pos2::new(
            logical.x * self.device_pixel_ratio,
            logical.y * self.device_pixel_ratio,
        )
    }

    /// The physical pixel containing a logical position, which may lie outside the surface.
    pub fn physical_pixel_at(&self, logical: Pos2) -> (i64, i64) {
        let p = self.to_physical(logical);
        (p.x.floor() as i64, p.y.floor() as i64)
    }

    /// Overwrites the pixel data with a buffer of identical dimensions.
    pub(crate) fn copy_from_bytes(&mut self, bytes: &[u8]) -> bool {
        if bytes.len() != self.pixels.len() {
            return false;
        }
        self.pixels.copy_from_slice(bytes);
        true
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }

    /// Replaces the contents with `image`, stretched to cover the whole surface.
    pub fn draw_image_scaled(&mut self, image: &RgbaImage) {
        if self.width == 0 || self.height == 0 || image.width() == 0 || image.height() == 0 {
            self.clear();
            return;
        }

        if image.dimensions() == (self.width, self.height) {
            self.pixels.copy_from_slice(image.as_raw());
        } else {
            let scaled = imageops::resize(image, self.width, self.height, imageops::FilterType::Triangle);
            self.pixels.copy_from_slice(scaled.as_raw());
        }
    }

    /// A new surface for a different logical size or pixel ratio carrying this
    /// surface's content, rescaled to fit.
    pub fn resized(&self, logical_width: f32, logical_height: f32, device_pixel_ratio: f32) -> Self {
        let mut resized = Self::new(logical_width, logical_height, device_pixel_ratio);
        if !self.is_blank() {
            resized.draw_image_scaled(&self.to_rgba_image());
        }
        resized
    }

    /// Converts to an egui image for texture upload.
    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgba_unmultiplied([self.width as usize, self.height as usize], &self.pixels)
    }
}

fn sanitize_ratio(ratio: f32) -> f32 {
    if ratio.is_finite() && ratio > 0.0 { ratio } else { 1.0 }
}
