//! Per-pixel compositing on straight-alpha RGBA8
//!
//! Mirrors the two 2D-canvas composite operations the brushes need:
//! - `source-over` for painting
//! - `destination-out` for erasing

use image::Rgba;

/// How a dab is combined with the pixels beneath it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeMode {
    /// Paint the source color over the destination
    #[default]
    SourceOver,
    /// Remove destination alpha in proportion to source alpha
    DestinationOut,
}

/// Composite `color` onto `dst` with an effective source alpha in [0, 1].
///
/// `src_alpha` already includes coverage, opacity and the color's own alpha.
#[inline]
pub fn composite_pixel(dst: &mut Rgba<u8>, color: Rgba<u8>, src_alpha: f32, mode: CompositeMode) {
    let sa = src_alpha.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return;
    }

    let da = dst.0[3] as f32 / 255.0;

    match mode {
        CompositeMode::SourceOver => {
            let out_a = sa + da * (1.0 - sa);
            if out_a <= f32::EPSILON {
                dst.0 = [0, 0, 0, 0];
                return;
            }
            for c in 0..3 {
                let sc = color.0[c] as f32;
                let dc = dst.0[c] as f32;
                let out = (sc * sa + dc * da * (1.0 - sa)) / out_a;
                dst.0[c] = out.round().clamp(0.0, 255.0) as u8;
            }
            dst.0[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
        }
        CompositeMode::DestinationOut => {
            let out_a = da * (1.0 - sa);
            dst.0[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
        }
    }
}
