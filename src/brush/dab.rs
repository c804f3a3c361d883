//! Dab rasterization - round stamps with flat or radial-gradient falloff
//!
//! Pixels are sampled at their centers (`x + 0.5`, `y + 0.5`). Each stamp
//! walks only the bounding box of its radius, clipped to the surface.

use image::Rgba;

use crate::surface::{CompositeMode, RasterSurface};

/// Falloff profile of a round dab
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DabShape {
    /// Solid disk with a one pixel anti-aliased rim
    Flat,
    /// Radial gradient: opaque to `1 - softness` of the radius, then linear to zero
    Gradient { hardness: f32 },
}

impl DabShape {
    /// Coverage in [0, 1] at `dist` from the dab center
    #[inline]
    pub fn coverage(&self, dist: f32, radius: f32) -> f32 {
        match *self {
            DabShape::Flat => flat_coverage(dist, radius),
            DabShape::Gradient { hardness } => {
                let softness = (100.0 - hardness) / 100.0;
                gradient_alpha(dist, radius, softness)
            }
        }
    }
}

#[inline]
fn flat_coverage(dist: f32, radius: f32) -> f32 {
    (radius + 0.5 - dist).clamp(0.0, 1.0)
}

/// Three-stop radial gradient evaluated at `dist`.
///
/// Stops: 1.0 at the center, 1.0 at `(1 - softness) * radius`, 0.0 at the
/// radius. With `softness <= 0` the gradient degenerates to a hard disk.
#[inline]
pub fn gradient_alpha(dist: f32, radius: f32, softness: f32) -> f32 {
    if softness <= 0.0 {
        return flat_coverage(dist, radius);
    }
    if dist >= radius {
        return 0.0;
    }

    let inner = radius * (1.0 - softness.min(1.0));
    if dist <= inner {
        1.0
    } else {
        1.0 - (dist - inner) / (radius - inner)
    }
}

/// Stamp a round dab centered at (`cx`, `cy`).
///
/// `alpha` is the peak source alpha (opacity times color alpha).
/// Returns the number of pixels touched.
#[allow(clippy::too_many_arguments)]
pub fn stamp_disk(
    surface: &mut RasterSurface,
    cx: f32,
    cy: f32,
    radius: f32,
    shape: DabShape,
    color: Rgba<u8>,
    alpha: f32,
    mode: CompositeMode,
) -> usize {
    if radius.is_nan() || radius <= 0.0 || alpha <= 0.0 {
        return 0;
    }

    // One extra pixel for the anti-aliased rim
    let extent = radius + 1.0;
    let left = ((cx - extent).floor() as i64).max(0);
    let top = ((cy - extent).floor() as i64).max(0);
    let right = ((cx + extent).ceil() as i64).min(surface.width() as i64);
    let bottom = ((cy + extent).ceil() as i64).min(surface.height() as i64);

    let mut touched = 0;
    for py in top..bottom {
        let dy = py as f32 + 0.5 - cy;
        for px in left..right {
            let dx = px as f32 + 0.5 - cx;
            let dist = (dx * dx + dy * dy).sqrt();
            let coverage = shape.coverage(dist, radius);
            if coverage <= 0.0 {
                continue;
            }
            surface.blend_pixel(px, py, color, coverage * alpha, mode);
            touched += 1;
        }
    }
    touched
}

/// Stamp a single-pixel dot at the pixel containing (`x`, `y`).
pub fn stamp_dot(surface: &mut RasterSurface, x: f32, y: f32, color: Rgba<u8>, alpha: f32) {
    surface.blend_pixel(
        x.floor() as i64,
        y.floor() as i64,
        color,
        alpha,
        CompositeMode::SourceOver,
    );
}
