//! Colorbook - raster painting engine for a coloring-book canvas
//!
//! Brushes, flood fill and snapshot-based undo/redo over a single RGBA
//! surface. The host UI feeds pointer and keyboard events into a
//! [`PaintingCanvas`] and reads the surface back.

pub mod brush;
pub mod canvas;
pub mod codec;
pub mod color;
pub mod config;
pub mod error;
pub mod fill;
pub mod history;
pub mod input;
pub mod surface;

pub use canvas::PaintingCanvas;
pub use config::CanvasConfig;
pub use error::CanvasError;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the tracing subscriber (honours `RUST_LOG`, defaults to `colorbook=debug`).
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let result = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "colorbook=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    if result.is_ok() {
        tracing::info!("Colorbook logging initialized");
    }
}
