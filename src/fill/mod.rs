//! Flood fill and color sampling
//!
//! The fill walks 4-connected neighbours with an explicit stack, so region
//! size is bounded by heap memory rather than call depth.

use image::Rgba;

use crate::surface::RasterSurface;

/// Default per-channel tolerance (out of 255)
pub const DEFAULT_TOLERANCE: u8 = 32;

/// Per-channel RGB match: every channel within `tolerance` of the reference.
#[inline]
pub fn rgb_within(a: Rgba<u8>, b: Rgba<u8>, tolerance: u8) -> bool {
    a.0[..3]
        .iter()
        .zip(&b.0[..3])
        .all(|(&x, &y)| x.abs_diff(y) <= tolerance)
}

/// Repaint the region around (`x`, `y`) whose RGB matches the seed pixel.
///
/// Filled pixels take `color` with full alpha. Seeds outside the surface and
/// seeds whose RGB already equals `color` leave the surface untouched.
/// Returns the number of pixels written.
pub fn flood_fill(surface: &mut RasterSurface, x: u32, y: u32, color: Rgba<u8>, tolerance: u8) -> usize {
    let Some(reference) = surface.pixel(x, y) else {
        tracing::debug!("Fill seed ({}, {}) outside surface", x, y);
        return 0;
    };

    if reference.0[..3] == color.0[..3] {
        tracing::debug!("Fill seed already has target color, skipping");
        return 0;
    }

    let fill = Rgba([color.0[0], color.0[1], color.0[2], 255]);
    let width = surface.width() as i64;
    let height = surface.height() as i64;
    let mut visited = vec![false; (width * height) as usize];
    let mut stack: Vec<(i64, i64)> = Vec::with_capacity(4096);
    let mut filled = 0;

    stack.push((x as i64, y as i64));

    while let Some((cx, cy)) = stack.pop() {
        if cx < 0 || cy < 0 || cx >= width || cy >= height {
            continue;
        }
        let idx = (cy * width + cx) as usize;
        if visited[idx] {
            continue;
        }

        let (ux, uy) = (cx as u32, cy as u32);
        let matches = surface
            .pixel(ux, uy)
            .is_some_and(|px| rgb_within(px, reference, tolerance));
        if !matches {
            continue;
        }

        visited[idx] = true;
        surface.put_pixel(ux, uy, fill);
        filled += 1;

        stack.push((cx + 1, cy));
        stack.push((cx - 1, cy));
        stack.push((cx, cy + 1));
        stack.push((cx, cy - 1));
    }

    tracing::debug!(
        "Flood fill at ({}, {}) with tolerance {}: {} pixels",
        x,
        y,
        tolerance,
        filled
    );
    filled
}

/// Read the color under (`x`, `y`), used by the eyedropper
pub fn sample_color(surface: &RasterSurface, x: u32, y: u32) -> Option<Rgba<u8>> {
    surface.pixel(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    #[test]
    fn test_fill_uniform_surface() {
        let mut surface = RasterSurface::filled(100, 100, WHITE);
        let filled = flood_fill(&mut surface, 50, 50, RED, DEFAULT_TOLERANCE);
        assert_eq!(filled, 100 * 100);
        assert!(surface.image().pixels().all(|p| *p == RED));
    }

    #[test]
    fn test_fill_same_color_is_idempotent() {
        let mut surface = RasterSurface::filled(10, 10, RED);
        surface.put_pixel(3, 3, Rgba([250, 5, 5, 255]));
        let before = surface.clone();

        assert_eq!(flood_fill(&mut surface, 0, 0, RED, DEFAULT_TOLERANCE), 0);
        assert_eq!(surface, before);
    }

    #[test]
    fn test_precheck_ignores_alpha() {
        let mut surface = RasterSurface::filled(4, 4, Rgba([255, 0, 0, 10]));
        let before = surface.clone();
        assert_eq!(flood_fill(&mut surface, 0, 0, RED, DEFAULT_TOLERANCE), 0);
        assert_eq!(surface, before);
    }

    #[test]
    fn test_fill_writes_full_alpha() {
        let mut surface = RasterSurface::new(4, 4);
        flood_fill(&mut surface, 1, 1, Rgba([0, 255, 0, 40]), DEFAULT_TOLERANCE);
        assert_eq!(surface.pixel(2, 2), Some(Rgba([0, 255, 0, 255])));
    }

    #[test]
    fn test_fill_stops_at_outline() {
        // Vertical black line at x = 5 splits the surface
        let mut surface = RasterSurface::filled(10, 10, WHITE);
        for y in 0..10 {
            surface.put_pixel(5, y, BLACK);
        }

        let filled = flood_fill(&mut surface, 1, 1, RED, DEFAULT_TOLERANCE);
        assert_eq!(filled, 50);
        assert_eq!(surface.pixel(4, 9), Some(RED));
        assert_eq!(surface.pixel(5, 0), Some(BLACK));
        assert_eq!(surface.pixel(6, 0), Some(WHITE));
    }

    #[test]
    fn test_diagonal_regions_are_not_merged() {
        // Two white pixels touching only at a corner, in a black field
        let mut surface = RasterSurface::filled(4, 4, BLACK);
        surface.put_pixel(1, 1, WHITE);
        surface.put_pixel(2, 2, WHITE);

        let filled = flood_fill(&mut surface, 1, 1, RED, DEFAULT_TOLERANCE);
        assert_eq!(filled, 1);
        assert_eq!(surface.pixel(1, 1), Some(RED));
        assert_eq!(surface.pixel(2, 2), Some(WHITE));
    }

    #[test]
    fn test_tolerance_boundary_per_channel() {
        let mut surface = RasterSurface::filled(3, 1, Rgba([100, 100, 100, 255]));
        // Each channel within 32: included
        surface.put_pixel(1, 0, Rgba([132, 68, 132, 255]));
        // One channel off by 33: excluded
        surface.put_pixel(2, 0, Rgba([100, 133, 100, 255]));

        let filled = flood_fill(&mut surface, 0, 0, RED, 32);
        assert_eq!(filled, 2);
        assert_eq!(surface.pixel(1, 0), Some(RED));
        assert_eq!(surface.pixel(2, 0), Some(Rgba([100, 133, 100, 255])));
    }

    #[test]
    fn test_tolerance_compares_to_seed_not_neighbour() {
        // Neighbours differ by 20, but 40 is more than 32 away from the seed
        let mut surface = RasterSurface::new(4, 1);
        for (x, v) in [0u8, 20, 40, 60].into_iter().enumerate() {
            surface.put_pixel(x as u32, 0, Rgba([v, v, v, 255]));
        }
        assert_eq!(flood_fill(&mut surface, 0, 0, RED, 32), 2);
    }

    #[test]
    fn test_seed_out_of_bounds_is_noop() {
        let mut surface = RasterSurface::filled(4, 4, WHITE);
        assert_eq!(flood_fill(&mut surface, 4, 0, RED, 32), 0);
        assert!(surface.image().pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn test_large_region_does_not_overflow_stack() {
        let mut surface = RasterSurface::filled(1024, 1024, WHITE);
        assert_eq!(flood_fill(&mut surface, 0, 0, RED, 32), 1024 * 1024);
    }

    #[test]
    fn test_sample_color() {
        let mut surface = RasterSurface::new(2, 2);
        surface.put_pixel(1, 0, RED);
        assert_eq!(sample_color(&surface, 1, 0), Some(RED));
        assert_eq!(sample_color(&surface, 2, 0), None);
    }
}
