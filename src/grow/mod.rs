//! The four growth algorithms
//!
//! Each strategy owns its run configuration, its random source and its
//! filled-set representation, mutates the borrowed raster buffer one
//! bounded batch per step, and reports continuation status to the frame
//! budgeter.

/// Particle aggregation by random walk
pub mod aggregation;
/// Weighted flood diffusion from a single seed
pub mod diffusion;
/// Deterministic polar-order painting with HSL diffusion
pub mod polar;
/// Multi-source splat growth with ownership blending
pub mod splat;

pub use aggregation::Aggregation;
pub use diffusion::FloodDiffusion;
pub use polar::PolarPaint;
pub use splat::SplatGrowth;
