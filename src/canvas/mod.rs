//! Painting canvas - owns the surface, tool settings and history, and routes input
//!
//! Everything runs synchronously on the caller's thread: each event handler
//! mutates the surface to completion before returning.


use image::Rgba;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::brush::{render_line, render_point, StrokePoint, StrokeSmoother, Tool, ToolSettings};
use crate::codec::{decode_data_uri, encode_data_uri};
use crate::color::{parse_hex, parse_hex_or_black, to_hex};
use crate::config::CanvasConfig;
use crate::error::CanvasError;
use crate::fill::{flood_fill, sample_color};
use crate::history::{HistoryStack, HistoryState, Snapshot};
use crate::input::{KeyEvent, PointerEvent, PointerKind, Shortcut};
use crate::surface::RasterSurface;

/// Stroke in progress between pointer-down and pointer-up
#[derive(Debug, Clone)]
struct ActiveStroke {
    last: StrokePoint,
    dabs: usize,
}

/// The painting engine behind a coloring-book canvas
pub struct PaintingCanvas {
    surface: RasterSurface,
    settings: ToolSettings,
    history: HistoryStack,
    rng: StdRng,
    background: Rgba<u8>,
    fill_tolerance: u8,
    stroke: Option<ActiveStroke>,
    smoother: StrokeSmoother,
}

impl PaintingCanvas {
    /// Create a canvas filled with the background color and one history entry
    pub fn new(config: CanvasConfig) -> Result<Self, CanvasError> {
        config.validate()?;

        let background = parse_hex(&config.background)?;
        let surface = RasterSurface::filled(config.width, config.height, background);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut history = HistoryStack::new(config.history_capacity);
        history.push(Snapshot::capture(&surface));

        tracing::info!(
            "Canvas created: {}x{}, history capacity {}",
            config.width,
            config.height,
            config.history_capacity
        );

        Ok(Self {
            surface,
            settings: ToolSettings::default(),
            history,
            rng,
            background,
            fill_tolerance: config.fill_tolerance,
            stroke: None,
            smoother: StrokeSmoother::new(),
        })
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    /// Mutable access for UI controls (sliders, palette)
    pub fn settings_mut(&mut self) -> &mut ToolSettings {
        &mut self.settings
    }

    pub fn set_settings(&mut self, settings: ToolSettings) {
        self.settings = settings;
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_state(&self) -> HistoryState {
        self.history.state()
    }

    /// Whether a stroke is in progress
    pub fn is_drawing(&self) -> bool {
        self.stroke.is_some()
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Dispatch a pointer event
    pub fn handle_pointer(&mut self, event: &PointerEvent) {
        let point = event.to_point();
        match event.kind {
            PointerKind::Down => self.pointer_down(point),
            PointerKind::Move => self.pointer_move(point),
            PointerKind::Up | PointerKind::Leave => self.pointer_up(),
        }
    }

    /// Begin a stroke, or run the fill/eyedropper tool once
    pub fn pointer_down(&mut self, point: StrokePoint) {
        match self.settings.tool {
            Tool::Fill => {
                let (x, y) = self.clamp_to_surface(&point);
                let color = parse_hex_or_black(&self.settings.color);
                self.fill_and_record(x, y, color);
            }
            Tool::Eyedropper => {
                let (x, y) = self.clamp_to_surface(&point);
                if let Some(picked) = sample_color(&self.surface, x, y) {
                    self.settings.color = to_hex(picked);
                    tracing::debug!("Eyedropper picked {} at ({}, {})", self.settings.color, x, y);
                }
            }
            _ => {
                self.smoother.reset();
                let point = self.smoother.smooth(point, self.settings.smoothing);
                render_point(&mut self.surface, &point, &self.settings, &mut self.rng);
                self.stroke = Some(ActiveStroke {
                    last: point,
                    dabs: 1,
                });
            }
        }
    }

    /// Extend the active stroke to `point`; ignored when not drawing
    pub fn pointer_move(&mut self, point: StrokePoint) {
        let Some(stroke) = self.stroke.as_mut() else {
            return;
        };

        let point = self.smoother.smooth(point, self.settings.smoothing);
        stroke.dabs += render_line(
            &mut self.surface,
            &stroke.last,
            &point,
            &self.settings,
            &mut self.rng,
        );
        stroke.last = point;
    }

    /// Finish the active stroke and record it in history
    pub fn pointer_up(&mut self) {
        let Some(stroke) = self.stroke.take() else {
            return;
        };
        self.smoother.reset();
        self.history.push(Snapshot::capture(&self.surface));
        tracing::debug!(
            "Stroke finished with {}: {} dabs",
            self.settings.tool.name(),
            stroke.dabs
        );
    }

    /// Run the undo/redo shortcut bound to `event`; returns whether the surface changed
    pub fn handle_key(&mut self, event: &KeyEvent) -> Result<bool, CanvasError> {
        match Shortcut::from_key_event(event) {
            Some(Shortcut::Undo) => self.undo(),
            Some(Shortcut::Redo) => self.redo(),
            None => Ok(false),
        }
    }

    // ------------------------------------------------------------------
    // Imperative operations
    // ------------------------------------------------------------------

    /// Fill the surface with the background color
    pub fn clear(&mut self) {
        self.stroke = None;
        self.surface.fill(self.background);
        self.history.push(Snapshot::capture(&self.surface));
        tracing::debug!("Canvas cleared");
    }

    /// Restore the previous snapshot. `Ok(false)` at the oldest entry.
    pub fn undo(&mut self) -> Result<bool, CanvasError> {
        self.stroke = None;
        match self.history.undo() {
            Some(snapshot) => {
                self.surface = snapshot.restore()?;
                tracing::debug!("Undo to entry {}", self.history.cursor());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Restore the next snapshot. `Ok(false)` at the newest entry.
    pub fn redo(&mut self) -> Result<bool, CanvasError> {
        self.stroke = None;
        match self.history.redo() {
            Some(snapshot) => {
                self.surface = snapshot.restore()?;
                tracing::debug!("Redo to entry {}", self.history.cursor());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Encode the surface as a PNG data URI
    pub fn get_image_data(&self) -> Result<String, CanvasError> {
        encode_data_uri(&self.surface)
    }

    /// Replace the surface with an image data URI, stretched over the background.
    ///
    /// The surface is untouched when decoding fails.
    pub fn load_image(&mut self, data_uri: &str) -> Result<(), CanvasError> {
        let image = decode_data_uri(data_uri)?;
        self.stroke = None;
        self.surface.fill(self.background);
        self.surface.draw_image_stretched(&image);
        self.history.push(Snapshot::capture(&self.surface));
        tracing::debug!(
            "Loaded {}x{} image onto {}x{} canvas",
            image.width(),
            image.height(),
            self.surface.width(),
            self.surface.height()
        );
        Ok(())
    }

    /// Flood fill from (`x`, `y`) with a hex color; returns the number of pixels filled.
    ///
    /// A history entry is recorded only when pixels changed.
    pub fn fill_area(&mut self, x: u32, y: u32, color: &str) -> Result<usize, CanvasError> {
        let color = parse_hex(color)?;
        Ok(self.fill_and_record(x, y, color))
    }

    fn fill_and_record(&mut self, x: u32, y: u32, color: Rgba<u8>) -> usize {
        let filled = flood_fill(&mut self.surface, x, y, color, self.fill_tolerance);
        if filled > 0 {
            self.history.push(Snapshot::capture(&self.surface));
        }
        filled
    }

    /// Integer pixel under a sample, clamped to the surface
    fn clamp_to_surface(&self, point: &StrokePoint) -> (u32, u32) {
        let clamp = |v: f32, max: u32| {
            let v = if v.is_nan() { 0.0 } else { v.floor() };
            v.clamp(0.0, max.saturating_sub(1) as f32) as u32
        };
        (
            clamp(point.x, self.surface.width()),
            clamp(point.y, self.surface.height()),
        )
    }
}
