//! Brush models - one dab procedure per tool, looked up through a static table
//!
//! Adding a brush means writing one `fn(&mut RasterSurface, &DabContext, &mut dyn RngCore)`
//! and registering it in `BRUSHES`.

use std::f32::consts::TAU;

use image::Rgba;
use rand::{Rng, RngCore};

use super::dab::{stamp_disk, stamp_dot, DabShape};
use super::Tool;
use crate::surface::{CompositeMode, RasterSurface};

/// Everything a brush model needs to render one dab
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DabContext {
    /// Dab center
    pub x: f32,
    pub y: f32,
    /// Effective radius after pressure scaling
    pub radius: f32,
    /// Brush diameter before pressure scaling
    pub size: f32,
    /// Paint color (its alpha multiplies the opacity)
    pub color: Rgba<u8>,
    /// 0.0 - 1.0
    pub opacity: f32,
    /// 0 - 100
    pub hardness: f32,
    /// 0 - 100
    pub flow: f32,
}

impl DabContext {
    /// Peak source alpha for painting brushes
    #[inline]
    pub fn paint_alpha(&self) -> f32 {
        self.opacity * self.color.0[3] as f32 / 255.0
    }

    #[inline]
    fn stamp(&self, surface: &mut RasterSurface, shape: DabShape, alpha: f32) {
        stamp_disk(
            surface,
            self.x,
            self.y,
            self.radius,
            shape,
            self.color,
            alpha,
            CompositeMode::SourceOver,
        );
    }
}

/// Signature shared by every brush model
pub type BrushFn = fn(&mut RasterSurface, &DabContext, &mut dyn RngCore);

static BRUSHES: [(Tool, BrushFn); 9] = [
    (Tool::Brush, soft_brush),
    (Tool::Eraser, eraser),
    (Tool::Airbrush, airbrush),
    (Tool::Charcoal, charcoal),
    (Tool::Watercolor, watercolor),
    (Tool::Crayon, crayon),
    (Tool::Pen, pen),
    (Tool::Pencil, pencil),
    (Tool::Marker, marker),
];

/// Look up the brush model for `tool`, falling back to the soft brush
pub fn brush_for(tool: Tool) -> BrushFn {
    BRUSHES
        .iter()
        .find(|(t, _)| *t == tool)
        .map(|(_, f)| *f)
        .unwrap_or(soft_brush)
}

/// Random point inside a disk of `radius` around the origin
#[inline]
fn scatter(rng: &mut dyn RngCore, radius: f32) -> (f32, f32) {
    let angle = rng.gen::<f32>() * TAU;
    let dist = rng.gen::<f32>() * radius;
    (angle.cos() * dist, angle.sin() * dist)
}

fn soft_brush(surface: &mut RasterSurface, ctx: &DabContext, _rng: &mut dyn RngCore) {
    ctx.stamp(
        surface,
        DabShape::Gradient {
            hardness: ctx.hardness,
        },
        ctx.paint_alpha(),
    );
}

fn eraser(surface: &mut RasterSurface, ctx: &DabContext, _rng: &mut dyn RngCore) {
    stamp_disk(
        surface,
        ctx.x,
        ctx.y,
        ctx.radius,
        DabShape::Gradient {
            hardness: ctx.hardness,
        },
        ctx.color,
        ctx.opacity,
        CompositeMode::DestinationOut,
    );
}

fn airbrush(surface: &mut RasterSurface, ctx: &DabContext, rng: &mut dyn RngCore) {
    let count = (ctx.size * ctx.flow / 100.0).floor() as usize;
    if count == 0 {
        tracing::trace!("Airbrush dab with size {} and flow {} emits no dots", ctx.size, ctx.flow);
        return;
    }

    let alpha = ctx.paint_alpha() * 0.1;
    for _ in 0..count {
        let (ox, oy) = scatter(rng, ctx.radius);
        stamp_dot(surface, ctx.x + ox, ctx.y + oy, ctx.color, alpha);
    }
}

fn charcoal(surface: &mut RasterSurface, ctx: &DabContext, rng: &mut dyn RngCore) {
    let base_alpha = ctx.paint_alpha();
    for _ in 0..5 {
        let ox = (rng.gen::<f32>() - 0.5) * ctx.radius;
        let oy = (rng.gen::<f32>() - 0.5) * ctx.radius;
        let radius = ctx.radius * (0.5 + rng.gen::<f32>() * 0.5);
        let alpha = base_alpha * (0.5 + rng.gen::<f32>() * 0.5);
        stamp_disk(
            surface,
            ctx.x + ox,
            ctx.y + oy,
            radius,
            DabShape::Gradient {
                hardness: ctx.hardness,
            },
            ctx.color,
            alpha,
            CompositeMode::SourceOver,
        );
    }
}

fn watercolor(surface: &mut RasterSurface, ctx: &DabContext, _rng: &mut dyn RngCore) {
    stamp_disk(
        surface,
        ctx.x,
        ctx.y,
        ctx.radius * 1.5,
        DabShape::Gradient { hardness: 10.0 },
        ctx.color,
        ctx.paint_alpha() * 0.15,
        CompositeMode::SourceOver,
    );
}

fn crayon(surface: &mut RasterSurface, ctx: &DabContext, rng: &mut dyn RngCore) {
    ctx.stamp(
        surface,
        DabShape::Gradient {
            hardness: ctx.hardness,
        },
        ctx.paint_alpha(),
    );

    let dot_radius = (ctx.radius * 0.15).max(1.0);
    let dot_alpha = (ctx.paint_alpha() * 1.2).min(1.0);
    for _ in 0..3 {
        let (ox, oy) = scatter(rng, ctx.radius * 0.8);
        stamp_disk(
            surface,
            ctx.x + ox,
            ctx.y + oy,
            dot_radius,
            DabShape::Flat,
            ctx.color,
            dot_alpha,
            CompositeMode::SourceOver,
        );
    }
}

fn pen(surface: &mut RasterSurface, ctx: &DabContext, _rng: &mut dyn RngCore) {
    ctx.stamp(surface, DabShape::Flat, ctx.paint_alpha());
}

fn pencil(surface: &mut RasterSurface, ctx: &DabContext, rng: &mut dyn RngCore) {
    let jitter = rng.gen_range(0.7f32..1.0);
    ctx.stamp(surface, DabShape::Flat, ctx.paint_alpha() * jitter);
}

fn marker(surface: &mut RasterSurface, ctx: &DabContext, _rng: &mut dyn RngCore) {
    ctx.stamp(surface, DabShape::Gradient { hardness: 70.0 }, ctx.paint_alpha());
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ctx(size: f32) -> DabContext {
        DabContext {
            x: 32.0,
            y: 32.0,
            radius: size / 2.0,
            size,
            color: Rgba([0, 0, 255, 255]),
            opacity: 1.0,
            hardness: 50.0,
            flow: 50.0,
        }
    }

    fn painted(surface: &RasterSurface) -> usize {
        surface.as_raw().chunks(4).filter(|p| p[3] > 0).count()
    }

    fn render(tool: Tool, ctx: &DabContext, seed: u64) -> RasterSurface {
        let mut surface = RasterSurface::new(64, 64);
        let mut rng = StdRng::seed_from_u64(seed);
        brush_for(tool)(&mut surface, ctx, &mut rng);
        surface
    }

    #[test]
    fn test_every_painting_tool_marks_the_surface() {
        for tool in Tool::ALL {
            if tool == Tool::Eraser || tool.is_one_shot() {
                continue;
            }
            let surface = render(tool, &ctx(20.0), 7);
            assert!(painted(&surface) > 0, "{:?} left no mark", tool);
        }
    }

    #[test]
    fn test_one_shot_tools_fall_back_to_soft_brush() {
        let c = ctx(20.0);
        assert_eq!(render(Tool::Fill, &c, 1), render(Tool::Brush, &c, 1));
    }

    #[test]
    fn test_eraser_removes_alpha() {
        let mut surface = RasterSurface::filled(64, 64, Rgba([255, 255, 255, 255]));
        let mut rng = StdRng::seed_from_u64(0);
        brush_for(Tool::Eraser)(&mut surface, &ctx(20.0), &mut rng);

        assert_eq!(surface.pixel(32, 32).map(|p| p.0[3]), Some(0));
        assert_eq!(surface.pixel(0, 0).map(|p| p.0[3]), Some(255));
    }

    #[test]
    fn test_airbrush_dot_count() {
        // floor(20 * 50 / 100) = 10 dots, at most 10 distinct pixels
        let surface = render(Tool::Airbrush, &ctx(20.0), 3);
        let count = painted(&surface);
        assert!((1..=10).contains(&count));
    }

    #[test]
    fn test_airbrush_zero_dots_for_tiny_flow() {
        let c = DabContext {
            flow: 1.0,
            ..ctx(20.0)
        };
        // floor(20 * 1 / 100) = 0
        assert_eq!(painted(&render(Tool::Airbrush, &c, 3)), 0);
    }

    #[test]
    fn test_airbrush_dots_are_faint() {
        let surface = render(Tool::Airbrush, &ctx(20.0), 11);
        for p in surface.as_raw().chunks(4).filter(|p| p[3] > 0) {
            // Single dot at 10% alpha, possibly compounded a few times
            assert!(p[3] < 128);
        }
    }

    #[test]
    fn test_stochastic_brushes_are_seed_deterministic() {
        for tool in [Tool::Airbrush, Tool::Charcoal, Tool::Crayon, Tool::Pencil] {
            let c = ctx(24.0);
            assert_eq!(render(tool, &c, 42), render(tool, &c, 42), "{:?}", tool);
        }
    }

    #[test]
    fn test_pen_is_hard_edged_and_opaque() {
        let surface = render(Tool::Pen, &ctx(20.0), 0);
        // Inside the disk every pixel is fully opaque
        assert_eq!(surface.pixel(32, 32).map(|p| p.0[3]), Some(255));
        assert_eq!(surface.pixel(40, 32).map(|p| p.0[3]), Some(255));
    }

    #[test]
    fn test_pencil_jitter_stays_in_range() {
        for seed in 0..20 {
            let surface = render(Tool::Pencil, &ctx(20.0), seed);
            let a = surface.pixel(32, 32).map(|p| p.0[3]).unwrap_or(0);
            // 0.7 * 255 = 178.5
            assert!(a >= 178, "alpha {}", a);
        }
    }

    #[test]
    fn test_watercolor_is_translucent_and_wide() {
        let surface = render(Tool::Watercolor, &ctx(20.0), 0);
        let center = surface.pixel(32, 32).map(|p| p.0[3]).unwrap_or(0);
        assert!(center > 0 && center <= 39); // 0.15 * 255 = 38.25
        // Reaches past the nominal radius of 10
        assert!(surface.pixel(44, 32).map(|p| p.0[3]).unwrap_or(0) > 0);
    }

    #[test]
    fn test_marker_ignores_user_hardness() {
        let soft = DabContext {
            hardness: 0.0,
            ..ctx(20.0)
        };
        let hard = DabContext {
            hardness: 100.0,
            ..ctx(20.0)
        };
        assert_eq!(render(Tool::Marker, &soft, 0), render(Tool::Marker, &hard, 0));
    }

    #[test]
    fn test_soft_brush_respects_hardness() {
        let soft = render(
            Tool::Brush,
            &DabContext {
                hardness: 0.0,
                ..ctx(20.0)
            },
            0,
        );
        let hard = render(
            Tool::Brush,
            &DabContext {
                hardness: 100.0,
                ..ctx(20.0)
            },
            0,
        );
        let edge = |s: &RasterSurface| s.pixel(39, 32).map(|p| p.0[3]).unwrap_or(0);
        assert!(edge(&hard) > edge(&soft));
    }
}
