//! Brush engine module - tool settings, brush models and stroke rendering

mod dab;
mod models;
mod renderer;
mod smoothing;

pub use dab::{gradient_alpha, DabShape};
pub use models::{brush_for, BrushFn, DabContext};
pub use renderer::{effective_radius, render_line, render_point, spacing_step};
pub use smoothing::StrokeSmoother;

use serde::{Deserialize, Serialize};

/// A single pointer sample in a stroke
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    /// X coordinate in surface space
    pub x: f32,
    /// Y coordinate in surface space
    pub y: f32,
    /// Pressure value (0.0 - 1.0)
    pub pressure: f32,
    /// Timestamp in milliseconds
    pub time: f64,
}

impl StrokePoint {
    /// Create a new sample, clamping pressure into [0, 1]
    pub fn new(x: f32, y: f32, pressure: f32, time: f64) -> Self {
        Self {
            x,
            y,
            pressure: if pressure.is_nan() { 0.0 } else { pressure.clamp(0.0, 1.0) },
            time,
        }
    }

    /// Euclidean distance to another sample
    pub fn distance_to(&self, other: &StrokePoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Linear interpolation of position, pressure and time
    pub fn lerp(&self, other: &StrokePoint, t: f32) -> StrokePoint {
        StrokePoint {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            pressure: self.pressure + (other.pressure - self.pressure) * t,
            time: self.time + (other.time - self.time) * t as f64,
        }
    }
}

/// Drawing tools offered by the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tool {
    /// Soft round brush (also the fallback for unknown tools)
    #[default]
    Brush,
    Eraser,
    Airbrush,
    Charcoal,
    Watercolor,
    Crayon,
    Pen,
    Pencil,
    Marker,
    /// Flood fill on pointer-down
    Fill,
    /// Color picker on pointer-down
    Eyedropper,
}

impl Tool {
    /// Every tool, in palette order
    pub const ALL: [Tool; 11] = [
        Tool::Brush,
        Tool::Eraser,
        Tool::Airbrush,
        Tool::Charcoal,
        Tool::Watercolor,
        Tool::Crayon,
        Tool::Pen,
        Tool::Pencil,
        Tool::Marker,
        Tool::Fill,
        Tool::Eyedropper,
    ];

    /// Identifier used by the host UI
    pub fn name(self) -> &'static str {
        match self {
            Tool::Brush => "brush",
            Tool::Eraser => "eraser",
            Tool::Airbrush => "airbrush",
            Tool::Charcoal => "charcoal",
            Tool::Watercolor => "watercolor",
            Tool::Crayon => "crayon",
            Tool::Pen => "pen",
            Tool::Pencil => "pencil",
            Tool::Marker => "marker",
            Tool::Fill => "fill",
            Tool::Eyedropper => "eyedropper",
        }
    }

    /// Resolve a tool identifier; unknown names map to [`Tool::Brush`]
    pub fn from_name(name: &str) -> Self {
        let lower = name.trim().to_ascii_lowercase();
        Tool::ALL
            .into_iter()
            .find(|t| t.name() == lower)
            .unwrap_or_else(|| {
                tracing::debug!("Unknown tool '{}', using brush", name);
                Tool::Brush
            })
    }

    /// Tools that act once on pointer-down instead of painting a stroke
    pub fn is_one_shot(self) -> bool {
        matches!(self, Tool::Fill | Tool::Eyedropper)
    }
}

impl From<String> for Tool {
    fn from(name: String) -> Self {
        Tool::from_name(&name)
    }
}

impl From<Tool> for String {
    fn from(tool: Tool) -> Self {
        tool.name().to_string()
    }
}

/// Active tool configuration, read by the renderer for each dab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToolSettings {
    pub tool: Tool,
    /// Hex color (`#rrggbb`, `#rgb` or `#rrggbbaa`)
    pub color: String,
    /// Brush diameter in pixels
    pub size: f32,
    /// 0 - 100
    pub opacity: f32,
    /// 0 - 100, edge sharpness
    pub hardness: f32,
    /// 0 - 100, airbrush density
    pub flow: f32,
    /// 0 - 100, dab spacing as a percentage of size
    pub spacing: f32,
    /// Pressure scales the brush radius
    pub pressure_enabled: bool,
    /// 0 - 100, positional smoothing strength
    pub smoothing: f32,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            tool: Tool::Brush,
            color: "#000000".to_string(),
            size: 10.0,
            opacity: 100.0,
            hardness: 50.0,
            flow: 50.0,
            spacing: 25.0,
            pressure_enabled: true,
            smoothing: 0.0,
        }
    }
}

impl ToolSettings {
    /// Smallest brush diameter accepted
    pub const MIN_SIZE: f32 = 0.1;

    /// Copy with every numeric field clamped into its valid range
    pub fn sanitized(&self) -> Self {
        fn percent(v: f32) -> f32 {
            if v.is_nan() {
                0.0
            } else {
                v.clamp(0.0, 100.0)
            }
        }

        let size = if self.size.is_finite() && self.size > 0.0 {
            self.size.max(Self::MIN_SIZE)
        } else {
            Self::MIN_SIZE
        };

        Self {
            tool: self.tool,
            color: self.color.clone(),
            size,
            opacity: percent(self.opacity),
            hardness: percent(self.hardness),
            flow: percent(self.flow),
            spacing: percent(self.spacing),
            pressure_enabled: self.pressure_enabled,
            smoothing: percent(self.smoothing),
        }
    }
}
