//! Raster surface - the single RGBA pixel buffer every tool draws into

mod composite;

pub use composite::{composite_pixel, CompositeMode};

use image::{imageops, Rgba, RgbaImage};

use crate::error::CanvasError;

/// Default surface edge length in pixels
pub const DEFAULT_SIZE: u32 = 1024;

/// Straight-alpha RGBA8 raster that brushes, fills and history operate on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterSurface {
    image: RgbaImage,
}

impl RasterSurface {
    /// Create a fully transparent surface
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Create a surface filled with `color`
    pub fn filled(width: u32, height: u32, color: Rgba<u8>) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, color),
        }
    }

    /// Wrap an existing image
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Rebuild a surface from raw RGBA bytes.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CanvasError> {
        let len = data.len();
        RgbaImage::from_raw(width, height, data)
            .map(Self::from_image)
            .ok_or_else(|| {
                CanvasError::Snapshot(format!(
                    "{} bytes do not describe a {}x{} RGBA surface",
                    len, width, height
                ))
            })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Check whether signed coordinates fall on the surface
    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width() as i64 && y < self.height() as i64
    }

    /// Read a pixel, `None` when out of bounds
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        self.image.get_pixel_checked(x, y).copied()
    }

    /// Overwrite a pixel, ignoring out-of-bounds writes
    pub fn put_pixel(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        if let Some(px) = self.image.get_pixel_mut_checked(x, y) {
            *px = color;
        }
    }

    /// Composite `color` into one pixel, ignoring out-of-bounds writes
    #[inline]
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Rgba<u8>, alpha: f32, mode: CompositeMode) {
        if !self.contains(x, y) {
            return;
        }
        let px = self.image.get_pixel_mut(x as u32, y as u32);
        composite_pixel(px, color, alpha, mode);
    }

    /// Fill the whole surface with one color
    pub fn fill(&mut self, color: Rgba<u8>) {
        for px in self.image.pixels_mut() {
            *px = color;
        }
    }

    /// Draw `source` stretched over the whole surface with source-over compositing.
    pub fn draw_image_stretched(&mut self, source: &RgbaImage) {
        let (w, h) = (self.width(), self.height());
        if w == 0 || h == 0 || source.width() == 0 || source.height() == 0 {
            return;
        }

        let scaled;
        let source = if source.dimensions() == (w, h) {
            source
        } else {
            scaled = imageops::resize(source, w, h, imageops::FilterType::Triangle);
            &scaled
        };

        for (dst, src) in self.image.pixels_mut().zip(source.pixels()) {
            let alpha = src.0[3] as f32 / 255.0;
            composite_pixel(dst, Rgba([src.0[0], src.0[1], src.0[2], 255]), alpha, CompositeMode::SourceOver);
        }
    }

    /// Raw RGBA bytes, row-major
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

impl Default for RasterSurface {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE, DEFAULT_SIZE)
    }
}
