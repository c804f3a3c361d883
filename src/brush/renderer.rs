//! Stroke renderer - turns pointer samples into dabs on the surface

use rand::RngCore;

use super::models::{brush_for, DabContext};
use super::{StrokePoint, ToolSettings};
use crate::color::parse_hex_or_black;
use crate::surface::RasterSurface;

/// Radius of a dab: `size * (pressure_enabled ? pressure : 1) / 2`
pub fn effective_radius(settings: &ToolSettings, point: &StrokePoint) -> f32 {
    let scale = if settings.pressure_enabled {
        point.pressure
    } else {
        1.0
    };
    settings.size * scale / 2.0
}

/// Distance between interpolated dabs: `max(1, size * spacing / 100)`
pub fn spacing_step(settings: &ToolSettings) -> f32 {
    (settings.size * settings.spacing / 100.0).max(1.0)
}

/// Render one dab of the active brush at `point`.
///
/// Settings are clamped first; unknown tools render as the soft brush.
pub fn render_point(
    surface: &mut RasterSurface,
    point: &StrokePoint,
    settings: &ToolSettings,
    rng: &mut dyn RngCore,
) {
    let settings = settings.sanitized();
    render_point_sanitized(surface, point, &settings, rng);
}

fn render_point_sanitized(
    surface: &mut RasterSurface,
    point: &StrokePoint,
    settings: &ToolSettings,
    rng: &mut dyn RngCore,
) {
    let radius = effective_radius(settings, point);
    if radius.is_nan() || radius <= 0.0 {
        return;
    }

    let ctx = DabContext {
        x: point.x,
        y: point.y,
        radius,
        size: settings.size,
        color: parse_hex_or_black(&settings.color),
        opacity: settings.opacity / 100.0,
        hardness: settings.hardness,
        flow: settings.flow,
    };

    brush_for(settings.tool)(surface, &ctx, rng);
}

/// Render dabs along the segment `from -> to`.
///
/// Dabs land at `t = i / steps` for `i in 0..steps`, where
/// `steps = ceil(distance / spacing_step)`. The end point itself is left for
/// the next segment. Returns the number of dabs rendered.
pub fn render_line(
    surface: &mut RasterSurface,
    from: &StrokePoint,
    to: &StrokePoint,
    settings: &ToolSettings,
    rng: &mut dyn RngCore,
) -> usize {
    if settings.tool.is_one_shot() {
        return 0;
    }

    let settings = settings.sanitized();
    let dist = from.distance_to(to);
    if !dist.is_finite() {
        return 0;
    }

    let step = spacing_step(&settings);
    let steps = (dist / step).ceil() as usize;

    for i in 0..steps {
        let t = i as f32 / steps as f32;
        let point = from.lerp(to, t);
        render_point_sanitized(surface, &point, &settings, rng);
    }

    steps
}
