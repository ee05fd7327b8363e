//! Shared growth infrastructure
//!
//! The budgeter paces bounded units of work across host frames, the
//! weighted frontier decides growth order, and the run surface validates
//! seeds and pairs an algorithm with its cancellation state.

/// Per-frame work pacing and cooperative cancellation
pub mod budgeter;
/// Weighted frontier of growth candidates
pub mod frontier;
/// Run invocation surface exposed to the host
pub mod run;
