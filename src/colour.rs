//! Colouring by hue rotation.
//!
//! The escape iteration picks a hue on the colour wheel, rotated by a hue shift
//! so the palette can be cycled over time. `compute.wgsl` carries the same
//! arithmetic in `f32`.

use crate::escape::IterationResult;

/// An 8-bit sRGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const BLACK: Self = Rgb([0, 0, 0]);

    /// The colour with a fully opaque alpha channel appended.
    pub fn to_rgba(self) -> [u8; 4] {
        let [r, g, b] = self.0;
        [r, g, b, 255]
    }
}

pub const SATURATION: f64 = 1.0;
pub const LIGHTNESS: f64 = 0.5;

/// Colour a pixel from its iteration result.
///
/// Bounded orbits are always black. `hue_shift` is in degrees and may be any
/// real value; it is wrapped with a Euclidean modulo so negative shifts stay on
/// the wheel.
pub fn colour(result: IterationResult, hue_shift: f64, max_iterations: u32) -> Rgb {
    if !result.escaped {
        return Rgb::BLACK;
    }

    let ratio = result.iterations as f64 / max_iterations as f64;
    let hue = (ratio * 360.0 + hue_shift).rem_euclid(360.0) / 360.0;
    hsl_to_rgb(hue, SATURATION, LIGHTNESS)
}

/// Convert HSL, each component in `[0, 1]`, to 8-bit RGB.
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> Rgb {
    if saturation == 0.0 {
        let grey = to_channel(lightness);
        return Rgb([grey, grey, grey]);
    }

    let q = if lightness < 0.5 {
        lightness * (1.0 + saturation)
    } else {
        lightness + saturation - lightness * saturation
    };
    let p = 2.0 * lightness - q;

    Rgb([
        to_channel(hue_to_rgb(p, q, hue + 1.0 / 3.0)),
        to_channel(hue_to_rgb(p, q, hue)),
        to_channel(hue_to_rgb(p, q, hue - 1.0 / 3.0)),
    ])
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn to_channel(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}
