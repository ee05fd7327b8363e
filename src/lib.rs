//! Progressive raster growth engine for animated image synthesis
//!
//! Images grow cell by cell outward from one or more seed points under
//! four strategies: random-walk aggregation, weighted flood diffusion,
//! multi-source splat growth with ownership blending, and deterministic
//! polar-order painting. A frame budgeter paces the work into bounded
//! per-frame steps so hosts can render the growth as an animation and
//! cancel it cooperatively.

#![forbid(unsafe_code)]

/// Color types and RGBA/HSL arithmetic
pub mod color;
/// Frame pacing, cancellation, the weighted frontier and run invocation
pub mod engine;
/// The four growth algorithms
pub mod grow;
/// Command-line host, image export and error handling
pub mod io;
/// Raster buffer, filled-set masks and display surfaces
pub mod raster;

pub use engine::run::{AlgorithmKind, start, start_named};
pub use io::error::{EngineError, Result};
pub use raster::buffer::RasterBuffer;
