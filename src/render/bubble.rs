use vello_cpu::kurbo::{Circle, Shape as _};
use vello_cpu::peniko::{Color, Gradient};

use crate::{foundation::core::Rgb8, render::surface::Canvas};

/// Flattening tolerance for circle paths, in pixels.
const PATH_TOLERANCE: f64 = 0.1;

/// Shading parameters for one bubble. Distances are fractions of the bubble radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BubbleStyle {
    /// Added to each channel for the lit stop.
    pub light_boost: u8,
    /// Subtracted from each channel for the shadow stop.
    pub shadow_drop: u8,
    /// Up-left offset of the shading focal point.
    pub focal_offset: f64,
    /// Gradient offset at which the flat base color is reached.
    pub base_stop: f32,
    /// Extra pixels added to the radius so neighbouring bubbles touch.
    pub radius_pad: f64,
    /// Up-left offset of the specular highlight centre.
    pub highlight_offset: f64,
    pub highlight_radius: f64,
    pub highlight_alpha: f32,
    pub highlight_mid_alpha: f32,
}

impl BubbleStyle {
    /// Small, cheap bubbles for on-screen preview.
    pub const PREVIEW: Self = Self {
        light_boost: 50,
        shadow_drop: 35,
        focal_offset: 0.3,
        base_stop: 0.5,
        radius_pad: 0.0,
        highlight_offset: 0.35,
        highlight_radius: 0.4,
        highlight_alpha: 0.8,
        highlight_mid_alpha: 0.3,
    };

    /// Stronger shading for high-resolution export.
    pub const EXPORT: Self = Self {
        light_boost: 70,
        shadow_drop: 45,
        focal_offset: 0.35,
        base_stop: 0.6,
        radius_pad: 0.5,
        highlight_offset: 0.35,
        highlight_radius: 0.4,
        highlight_alpha: 0.8,
        highlight_mid_alpha: 0.3,
    };
}

/// Draw one shaded sphere of `radius` pixels centred at `(cx, cy)`.
///
/// Three fills of the same circle path, each composited over the last: the flat base color, the
/// lit-to-shadow two-point radial gradient, and a translucent white highlight. Works the same for
/// 3 px preview dots and 60 px export bubbles; anything outside the canvas is clipped.
pub fn render_bubble(
    canvas: &mut Canvas,
    cx: f64,
    cy: f64,
    radius: f64,
    color: Rgb8,
    style: &BubbleStyle,
) {
    if !radius.is_finite() || radius <= 0.0 || !cx.is_finite() || !cy.is_finite() {
        return;
    }

    let light = color.lighten(style.light_boost);
    let dark = color.darken(style.shadow_drop);
    let shift = radius * style.focal_offset;
    let shading = Gradient::new_two_point_radial(
        (cx - shift, cy - shift),
        0.0,
        (cx, cy),
        radius as f32,
    )
    .with_stops([
        (0.0, opaque(light)),
        (style.base_stop, opaque(color)),
        (1.0, opaque(dark)),
    ]);

    let hl_shift = radius * style.highlight_offset;
    let hl_center = (cx - hl_shift, cy - hl_shift);
    let hl_radius = radius * style.highlight_radius;
    let highlight = Gradient::new_two_point_radial(hl_center, 0.0, hl_center, hl_radius as f32)
        .with_stops([
            (0.0_f32, white(style.highlight_alpha)),
            (0.5, white(style.highlight_mid_alpha)),
            (1.0, white(0.0)),
        ]);

    let body = Circle::new((cx, cy), radius).to_path(PATH_TOLERANCE);
    let ctx = canvas.context();
    ctx.set_paint(opaque(color));
    ctx.fill_path(&body);
    ctx.set_paint(shading);
    ctx.fill_path(&body);
    ctx.set_paint(highlight);
    ctx.fill_path(&Circle::new(hl_center, hl_radius).to_path(PATH_TOLERANCE));
}

fn opaque(c: Rgb8) -> Color {
    Color::from_rgba8(c.r, c.g, c.b, 255)
}

fn white(alpha: f32) -> Color {
    Color::from_rgba8(255, 255, 255, (alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
}

#[cfg(test)]
#[path = "../../tests/unit/render/bubble.rs"]
mod tests;
