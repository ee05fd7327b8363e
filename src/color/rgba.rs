//! RGBA cell values and the blending helpers the algorithms share

use rand::Rng;
use rand::rngs::StdRng;

/// An RGBA cell value with byte-valued channels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

/// Opaque white, also the out-of-bounds sampling sentinel
pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);

/// Opaque black, the initial canvas color for most algorithms
pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);

impl Rgba {
    /// Construct a color from all four channels
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Construct a fully opaque color
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Whether the cell carries ink, i.e. is not pure white
    pub const fn has_ink(self) -> bool {
        self.r < 255 || self.g < 255 || self.b < 255
    }

    /// The channels as a `[r, g, b, a]` array
    pub const fn channels(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Clamp a floating point channel value into the byte range
pub(crate) fn clamp_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Uniformly random opaque color
pub fn random_color(rng: &mut StdRng) -> Rgba {
    Rgba::opaque(
        (rng.random::<f64>() * 255.0) as u8,
        (rng.random::<f64>() * 255.0) as u8,
        (rng.random::<f64>() * 255.0) as u8,
    )
}

/// Component-wise mean of a set of colors
///
/// Returns `None` for an empty slice.
pub fn average(colors: &[Rgba]) -> Option<Rgba> {
    if colors.is_empty() {
        return None;
    }
    let count = colors.len() as f64;
    let mut r = 0.0;
    let mut g = 0.0;
    let mut b = 0.0;
    for color in colors {
        r += f64::from(color.r);
        g += f64::from(color.g);
        b += f64::from(color.b);
    }
    Some(Rgba::opaque(
        clamp_channel(r / count),
        clamp_channel(g / count),
        clamp_channel(b / count),
    ))
}

/// Offset every channel by a uniform draw from `[-span/2, span/2]`
pub fn perturb(color: Rgba, span: f64, rng: &mut StdRng) -> Rgba {
    let mut channel =
        |value: u8| clamp_channel((rng.random::<f64>() - 0.5).mul_add(span, f64::from(value)));
    let r = channel(color.r);
    let g = channel(color.g);
    let b = channel(color.b);
    Rgba::opaque(r, g, b)
}

/// Linear interpolation from `a` toward `b` by `share`
pub fn mix(a: Rgba, b: Rgba, share: f64) -> Rgba {
    let channel =
        |x: u8, y: u8| clamp_channel(f64::from(x).mul_add(1.0 - share, f64::from(y) * share));
    Rgba::opaque(
        channel(a.r, b.r),
        channel(a.g, b.g),
        channel(a.b, b.b),
    )
}

/// Pull a color toward white by the given saturation multiplier
///
/// A multiplier of 1.0 leaves the color unchanged and 0.0 yields pure
/// white, so an exponentially decaying multiplier makes later paint
/// systematically lighter.
pub fn decay_toward_white(color: Rgba, multiplier: f64) -> Rgba {
    let channel = |value: u8| clamp_channel((255.0 - f64::from(value)).mul_add(-multiplier, 255.0));
    Rgba::opaque(channel(color.r), channel(color.g), channel(color.b))
}

/// Accumulates weighted color contributions in floating point
#[derive(Clone, Debug, Default)]
pub struct ColorAccumulator {
    r: f64,
    g: f64,
    b: f64,
    weight: f64,
}

impl ColorAccumulator {
    /// An empty accumulator
    pub const fn new() -> Self {
        Self {
            r: 0.0,
            g: 0.0,
            b: 0.0,
            weight: 0.0,
        }
    }

    /// Add one weighted sample
    pub fn add(&mut self, color: Rgba, weight: f64) {
        self.r = f64::from(color.r).mul_add(weight, self.r);
        self.g = f64::from(color.g).mul_add(weight, self.g);
        self.b = f64::from(color.b).mul_add(weight, self.b);
        self.weight += weight;
    }

    /// Total weight accumulated so far
    pub const fn total_weight(&self) -> f64 {
        self.weight
    }

    /// Weighted mean of the samples, `None` when nothing was added
    pub fn mean(&self) -> Option<Rgba> {
        if self.weight <= 0.0 {
            return None;
        }
        Some(Rgba::opaque(
            clamp_channel(self.r / self.weight),
            clamp_channel(self.g / self.weight),
            clamp_channel(self.b / self.weight),
        ))
    }
}
