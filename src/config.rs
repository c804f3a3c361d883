//! Canvas configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::parse_hex;
use crate::error::CanvasError;
use crate::fill::DEFAULT_TOLERANCE;
use crate::history::DEFAULT_CAPACITY;
use crate::surface::DEFAULT_SIZE;

/// Largest accepted surface edge
pub const MAX_DIMENSION: u32 = 16384;

/// Surface, history and fill parameters for a [`crate::canvas::PaintingCanvas`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanvasConfig {
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
    /// Maximum number of history snapshots
    pub history_capacity: usize,
    /// Flood fill per-channel tolerance (0 - 255)
    pub fill_tolerance: u8,
    /// Background color used on init, clear and image load
    pub background: String,
    /// Seed for stochastic brushes; `None` seeds from OS entropy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            history_capacity: DEFAULT_CAPACITY,
            fill_tolerance: DEFAULT_TOLERANCE,
            background: "#ffffff".to_string(),
            seed: None,
        }
    }
}

impl CanvasConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, CanvasError> {
        let config: CanvasConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CanvasError> {
        let path = path.as_ref();
        tracing::debug!("Loading canvas config from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), CanvasError> {
        if self.width == 0 || self.height == 0 {
            return Err(CanvasError::InvalidConfig(
                "Canvas dimensions must be greater than 0".into(),
            ));
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(CanvasError::InvalidConfig(format!(
                "Canvas dimensions cannot exceed {} pixels",
                MAX_DIMENSION
            )));
        }
        if self.history_capacity == 0 {
            return Err(CanvasError::InvalidConfig(
                "History capacity must be at least 1".into(),
            ));
        }
        parse_hex(&self.background)?;
        Ok(())
    }
}
