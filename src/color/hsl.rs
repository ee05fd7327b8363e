//! HSL color space conversion and circular hue math
//!
//! Conversions follow the standard hue-sector formulas. Hue averages and
//! blends are circular: averaging treats hues as unit vectors and
//! blending walks the shorter arc, so 350 degrees and 10 degrees meet at
//! 0 rather than 180.

use crate::color::rgba::{Rgba, clamp_channel};

/// A color in HSL space, hue in degrees, saturation and lightness in `[0,1]`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    /// Hue angle in degrees
    pub h: f64,
    /// Saturation
    pub s: f64,
    /// Lightness
    pub l: f64,
}

/// Wrap a hue angle into `[0, 360)`
pub fn wrap_hue(degrees: f64) -> f64 {
    degrees.rem_euclid(360.0)
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        return (q - p).mul_add(6.0 * t, p);
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return (q - p).mul_add((2.0 / 3.0 - t) * 6.0, p);
    }
    p
}

/// Convert an HSL color to opaque RGBA
pub fn hsl_to_rgba(color: Hsl) -> Rgba {
    let h = wrap_hue(color.h) / 360.0;
    let s = color.s.clamp(0.0, 1.0);
    let l = color.l.clamp(0.0, 1.0);

    if s <= f64::EPSILON {
        let value = clamp_channel(l * 255.0);
        return Rgba::opaque(value, value, value);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l.mul_add(-s, l + s)
    };
    let p = 2.0f64.mul_add(l, -q);

    Rgba::opaque(
        clamp_channel(hue_to_channel(p, q, h + 1.0 / 3.0) * 255.0),
        clamp_channel(hue_to_channel(p, q, h) * 255.0),
        clamp_channel(hue_to_channel(p, q, h - 1.0 / 3.0) * 255.0),
    )
}

/// Convert byte RGB channels to HSL
pub fn rgba_to_hsl(color: Rgba) -> Hsl {
    let r = f64::from(color.r) / 255.0;
    let g = f64::from(color.g) / 255.0;
    let b = f64::from(color.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    let delta = max - min;
    if delta <= f64::EPSILON {
        return Hsl { h: 0.0, s: 0.0, l };
    }

    let s = if l > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };

    let sector = if (max - r).abs() <= f64::EPSILON {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if (max - g).abs() <= f64::EPSILON {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    Hsl {
        h: wrap_hue(sector * 60.0),
        s,
        l,
    }
}

/// Blend two hues along the shorter arc
pub fn blend_hue(from: f64, toward: f64, share: f64) -> f64 {
    let mut target = toward;
    let diff = target - from;
    if diff > 180.0 {
        target -= 360.0;
    } else if diff < -180.0 {
        target += 360.0;
    }
    wrap_hue(from.mul_add(1.0 - share, target * share))
}

/// Accumulates HSL samples with a circular hue mean
#[derive(Clone, Debug, Default)]
pub struct HslAverage {
    vec_x: f64,
    vec_y: f64,
    s: f64,
    l: f64,
    count: usize,
}

impl HslAverage {
    /// Add one sample
    pub fn add(&mut self, sample: Hsl) {
        let radians = sample.h.to_radians();
        self.vec_x += radians.cos();
        self.vec_y += radians.sin();
        self.s += sample.s;
        self.l += sample.l;
        self.count += 1;
    }

    /// Number of samples added so far
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Circular-mean hue with arithmetic-mean saturation and lightness
    ///
    /// Returns `None` when no samples were added.
    pub fn mean(&self) -> Option<Hsl> {
        if self.count == 0 {
            return None;
        }
        let count = self.count as f64;
        Some(Hsl {
            h: wrap_hue(self.vec_y.atan2(self.vec_x).to_degrees()),
            s: self.s / count,
            l: self.l / count,
        })
    }
}
