use super::Command;
use crate::surface::RasterSurface;
use image::RgbaImage;
use uuid::Uuid;

/// A full copy of the surface pixels at one point in time
#[derive(Clone, PartialEq)]
pub struct Snapshot {
    id: Uuid,
    command: Command,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("id", &self.id)
            .field("command", &self.command)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl Snapshot {
    pub fn capture(surface: &RasterSurface, command: Command) -> Self {
        Self {
            id: Uuid::new_v4(),
            command,
            width: surface.width(),
            height: surface.height(),
            pixels: surface.as_bytes().to_vec(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn command(&self) -> Command {
        self.command
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Re-renders the surface from this snapshot. A snapshot taken at another
    /// size is stretched to the current surface.
    pub fn restore_into(&self, surface: &mut RasterSurface) {
        if self.dimensions() == (surface.width(), surface.height())
            && surface.copy_from_bytes(&self.pixels)
        {
            return;
        }

        match RgbaImage::from_raw(self.width, self.height, self.pixels.clone()) {
            Some(image) => surface.draw_image_scaled(&image),
            None => {
                log::warn!("Snapshot {} has a malformed pixel buffer, clearing surface", self.id);
                surface.clear();
            }
        }
    }
}
