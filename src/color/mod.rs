//! Color types and arithmetic shared by the growth algorithms
//!
//! RGBA is the storage representation for every raster cell. The polar
//! painter additionally carries its running color state in HSL so that
//! hue can random-walk on the circle.

/// HSL conversions and circular hue math
pub mod hsl;
/// RGBA cell values and blending helpers
pub mod rgba;

pub use rgba::Rgba;
