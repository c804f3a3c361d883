//! Input module - pointer and keyboard events delivered by the host UI

mod shortcuts;

pub use shortcuts::{KeyEvent, Shortcut};

use serde::{Deserialize, Serialize};

use crate::brush::StrokePoint;

/// Pressure assumed when the device reports none
pub const DEFAULT_PRESSURE: f32 = 0.5;

/// Pointer event phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Leave,
}

/// Raw pointer event in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: f32,
    pub y: f32,
    /// Device pressure, `None` or 0 when unsupported
    #[serde(default)]
    pub pressure: Option<f32>,
    /// Timestamp in milliseconds
    #[serde(default)]
    pub time: f64,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            x,
            y,
            pressure: None,
            time: 0.0,
        }
    }

    /// Create with device pressure
    pub fn with_pressure(kind: PointerKind, x: f32, y: f32, pressure: f32) -> Self {
        Self {
            pressure: Some(pressure),
            ..Self::new(kind, x, y)
        }
    }

    /// Effective pressure: missing or zero readings fall back to [`DEFAULT_PRESSURE`]
    pub fn effective_pressure(&self) -> f32 {
        match self.pressure {
            Some(p) if p > 0.0 => p,
            _ => DEFAULT_PRESSURE,
        }
    }

    /// Convert to a stroke sample
    pub fn to_point(&self) -> StrokePoint {
        StrokePoint::new(self.x, self.y, self.effective_pressure(), self.time)
    }
}
