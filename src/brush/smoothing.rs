//! Positional smoothing for in-progress strokes

use super::StrokePoint;

/// Fraction of the raw movement dropped at smoothing 100
const MAX_LAG: f32 = 0.9;

/// Exponential moving average over pointer positions.
///
/// `smoothed = prev + (raw - prev) * (1 - MAX_LAG * smoothing / 100)`.
/// Pressure and time pass through unchanged. Reset between strokes.
#[derive(Debug, Clone, Default)]
pub struct StrokeSmoother {
    last: Option<StrokePoint>,
}

impl StrokeSmoother {
    pub fn new() -> Self {
        Self::default()
    }

    /// Smooth a sample. `smoothing` is 0 - 100; the first sample passes through.
    pub fn smooth(&mut self, point: StrokePoint, smoothing: f32) -> StrokePoint {
        let strength = if smoothing.is_nan() {
            0.0
        } else {
            smoothing.clamp(0.0, 100.0) / 100.0
        };

        let out = match self.last {
            Some(prev) if strength > 0.0 => {
                let follow = 1.0 - MAX_LAG * strength;
                StrokePoint {
                    x: prev.x + (point.x - prev.x) * follow,
                    y: prev.y + (point.y - prev.y) * follow,
                    ..point
                }
            }
            _ => point,
        };

        self.last = Some(out);
        out
    }

    /// Forget the previous sample (call when a stroke ends)
    pub fn reset(&mut self) {
        self.last = None;
    }
}
