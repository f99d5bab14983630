use crate::color::Rgba8;
use crate::stroke::{Stroke, StrokeMode};
use crate::surface::RasterSurface;
use egui::Pos2;

/// Any point inside a pixel is within this distance of the pixel's center,
/// so a cap radius of at least this much always covers the pixel under the pointer.
const MIN_CAP_RADIUS: f32 = std::f32::consts::FRAC_1_SQRT_2;

/// Rasterizes pen and eraser strokes onto a surface.
///
/// Each segment is drawn as a capsule: every physical pixel whose center lies
/// within `width / 2` of the segment is covered. This gives round caps and
/// round joins between consecutive segments, and a round dot for a
/// zero-length segment.
#[derive(Debug, Default, Clone, Copy)]
pub struct StrokeRenderer;

impl StrokeRenderer {
    /// Draws one segment between two logical points. Returns the number of pixels written.
    pub fn render_segment(
        surface: &mut RasterSurface,
        from: Pos2,
        to: Pos2,
        color: Rgba8,
        width: f32,
        mode: StrokeMode,
    ) -> usize {
        let ink = match mode {
            StrokeMode::Paint => color,
            StrokeMode::Erase => Rgba8::TRANSPARENT,
        };

        let a = surface.to_physical(from);
        let b = surface.to_physical(to);
        let radius = (width.max(0.0) * surface.device_pixel_ratio() / 2.0).max(MIN_CAP_RADIUS);

        let Some((x0, y0, x1, y1)) = clipped_bounds(surface, a, b, radius) else {
            return 0;
        };

        let ab = b - a;
        let len_sq = ab.length_sq();
        let mut written = 0;

        for y in y0..=y1 {
            for x in x0..=x1 {
                let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                let t = if len_sq > 0.0 {
                    ((center - a).dot(ab) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let nearest = a + ab * t;
                if (center - nearest).length() <= radius && surface.set_pixel(x, y, ink) {
                    written += 1;
                }
            }
        }

        written
    }

    /// Replays a whole stroke: a dot at the first point, then every segment.
    pub fn render_stroke(surface: &mut RasterSurface, stroke: &Stroke) -> usize {
        let Some(&first) = stroke.points().first() else {
            return 0;
        };

        let mut written =
            Self::render_segment(surface, first, first, stroke.color(), stroke.width(), stroke.mode());
        for pair in stroke.points().windows(2) {
            written += Self::render_segment(
                surface,
                pair[0],
                pair[1],
                stroke.color(),
                stroke.width(),
                stroke.mode(),
            );
        }
        written
    }
}

/// Inclusive physical pixel bounds of the capsule, clipped to the surface.
fn clipped_bounds(surface: &RasterSurface, a: Pos2, b: Pos2, radius: f32) -> Option<(u32, u32, u32, u32)> {
    if surface.width() == 0 || surface.height() == 0 {
        return None;
    }

    let min_x = (a.x.min(b.x) - radius).floor();
    let min_y = (a.y.min(b.y) - radius).floor();
    let max_x = (a.x.max(b.x) + radius).ceil();
    let max_y = (a.y.max(b.y) + radius).ceil();

    let last_x = (surface.width() - 1) as f32;
    let last_y = (surface.height() - 1) as f32;
    if max_x < 0.0 || max_y < 0.0 || min_x > last_x || min_y > last_y {
        return None;
    }

    Some((
        min_x.max(0.0) as u32,
        min_y.max(0.0) as u32,
        max_x.min(last_x) as u32,
        max_y.min(last_y) as u32,
    ))
}
