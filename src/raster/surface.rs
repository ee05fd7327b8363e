//! Display push capability consumed by the engine
//!
//! The engine never talks to a display directly. Hosts hand in a surface
//! and receive the buffer contents after every executed step.

use crate::raster::buffer::RasterBuffer;

/// Receives the in-memory buffer after each executed step
pub trait RasterSurface {
    /// Push the current buffer contents to the display
    fn blit(&mut self, raster: &RasterBuffer);
}

/// Surface that discards every blit, for headless runs and tests
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSurface;

impl RasterSurface for NullSurface {
    fn blit(&mut self, _raster: &RasterBuffer) {}
}
