use crate::color::Rgba8;
use crate::surface::RasterSurface;
use std::collections::VecDeque;

/// Per-channel tolerance that lets anti-aliased boundary pixels join the region.
pub const DEFAULT_FILL_TOLERANCE: u8 = 10;

/// What a bucket fill did to the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    /// `pixels` pixels were set to the fill color
    Filled { pixels: usize },
    /// The seed pixel already had exactly the fill color
    AlreadyFilled,
    /// The seed was outside the surface
    OutOfBounds,
}

impl FillOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, FillOutcome::Filled { .. })
    }
}

/// 4-connected breadth-first bucket fill from the physical pixel `(x, y)`.
///
/// The region is every pixel reachable from the seed through up/down/left/right
/// neighbors whose color is within `tolerance` (per channel) of the seed's
/// original color. The fill color is always written opaque.
pub fn flood_fill(surface: &mut RasterSurface, x: i64, y: i64, color: Rgba8, tolerance: u8) -> FillOutcome {
    if !surface.contains(x, y) {
        return FillOutcome::OutOfBounds;
    }
    let (seed_x, seed_y) = (x as u32, y as u32);

    let Some(target) = surface.pixel(seed_x, seed_y) else {
        return FillOutcome::OutOfBounds;
    };
    let fill = color.with_alpha(255);

    if target == fill {
        return FillOutcome::AlreadyFilled;
    }

    let width = surface.width();
    let height = surface.height();
    let mut visited = vec![false; width as usize * height as usize];
    let mut queue = VecDeque::with_capacity(1024);
    queue.push_back((seed_x, seed_y));

    let mut pixels = 0;
    while let Some((cx, cy)) = queue.pop_front() {
        let idx = cy as usize * width as usize + cx as usize;
        if visited[idx] {
            continue;
        }
        visited[idx] = true;

        let matches = surface
            .pixel(cx, cy)
            .is_some_and(|current| current.matches(target, tolerance));
        if !matches {
            continue;
        }

        surface.set_pixel(cx, cy, fill);
        pixels += 1;

        if cx + 1 < width {
            queue.push_back((cx + 1, cy));
        }
        if cx > 0 {
            queue.push_back((cx - 1, cy));
        }
        if cy + 1 < height {
            queue.push_back((cx, cy + 1));
        }
        if cy > 0 {
            queue.push_back((cx, cy - 1));
        }
    }

    log::debug!("Flood fill from ({seed_x}, {seed_y}) with {fill} covered {pixels} pixels");
    FillOutcome::Filled { pixels }
}
