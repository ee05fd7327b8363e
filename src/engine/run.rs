//! Run invocation surface exposed to the host
//!
//! A run pairs one growth algorithm with a frame budgeter. The host owns
//! the raster buffer and the surface; the engine validates the seed
//! before any state is touched, so a failed start leaves both reusable.

use crate::engine::budgeter::{CancellationHandle, FrameBudgeter, FrameScheduler, StepStatus};
use crate::grow::aggregation::Aggregation;
use crate::grow::diffusion::FloodDiffusion;
use crate::grow::polar::PolarPaint;
use crate::grow::splat::SplatGrowth;
use crate::io::error::{EngineError, Result};
use crate::raster::buffer::RasterBuffer;
use crate::raster::surface::RasterSurface;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;
use std::str::FromStr;

/// The four growth strategies
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AlgorithmKind {
    /// Particle aggregation by random walk
    Aggregation,
    /// Weighted flood fill with distance and density bias
    FloodDiffusion,
    /// Multi-source splat growth with ownership blending
    SplatGrowth,
    /// Deterministic polar-order painting with HSL diffusion
    PolarPaint,
}

impl AlgorithmKind {
    /// All selectable algorithms in presentation order
    pub const ALL: [Self; 4] = [
        Self::Aggregation,
        Self::FloodDiffusion,
        Self::SplatGrowth,
        Self::PolarPaint,
    ];

    /// The host-facing algorithm name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Aggregation => "aggregation",
            Self::FloodDiffusion => "flood-diffusion",
            Self::SplatGrowth => "splat-growth",
            Self::PolarPaint => "polar-paint",
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlgorithmKind {
    type Err = EngineError;

    fn from_str(name: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| EngineError::UnknownAlgorithm {
                name: name.to_string(),
            })
    }
}

/// One incremental growth strategy driven step by step
pub trait GrowthAlgorithm {
    /// Execute one bounded unit of work against the buffer
    fn step(&mut self, raster: &mut RasterBuffer) -> StepStatus;

    /// Number of cells filled so far; non-decreasing over the run
    fn filled(&self) -> usize;
}

/// A started run pairing an algorithm with its frame budgeter
pub struct ActiveRun {
    algorithm: Box<dyn GrowthAlgorithm>,
    budgeter: FrameBudgeter,
}

impl ActiveRun {
    /// Execute one frame step and blit the buffer to the surface
    ///
    /// Cancelled or completed runs return `Done` without touching the
    /// buffer or the surface, so ticking after the end is safe. The tick
    /// on which the algorithm reports `Done` still blits, which is the
    /// final buffer push of the run.
    pub fn tick(
        &mut self,
        raster: &mut RasterBuffer,
        surface: &mut dyn RasterSurface,
    ) -> StepStatus {
        if !self.budgeter.is_active() {
            return StepStatus::Done;
        }
        let Self {
            algorithm,
            budgeter,
        } = self;
        let status = budgeter.drive(|| algorithm.step(raster));
        surface.blit(raster);
        status
    }

    /// Handle for cooperative cancellation of this run
    pub fn cancellation(&self) -> CancellationHandle {
        self.budgeter.handle()
    }

    /// Whether the algorithm reported natural completion
    pub const fn is_finished(&self) -> bool {
        self.budgeter.is_finished()
    }

    /// Cells filled so far
    pub fn filled(&self) -> usize {
        self.algorithm.filled()
    }
}

/// Validate the seed and start a run of the chosen algorithm
///
/// The buffer is cleared and seeded by the algorithm's setup phase; on
/// failure nothing is mutated and no run begins.
///
/// # Errors
///
/// Returns [`EngineError::SeedOutOfBounds`] when the seed lies outside
/// the grid.
pub fn start(
    kind: AlgorithmKind,
    seed: [i32; 2],
    raster: &mut RasterBuffer,
    rng_seed: u64,
) -> Result<ActiveRun> {
    if !raster.contains(seed) {
        return Err(EngineError::SeedOutOfBounds {
            seed,
            width: raster.width(),
            height: raster.height(),
        });
    }

    let rng = StdRng::seed_from_u64(rng_seed);
    let algorithm: Box<dyn GrowthAlgorithm> = match kind {
        AlgorithmKind::Aggregation => Box::new(Aggregation::new(seed, raster, rng)),
        AlgorithmKind::FloodDiffusion => Box::new(FloodDiffusion::new(seed, raster, rng)),
        AlgorithmKind::SplatGrowth => Box::new(SplatGrowth::new(seed, raster, rng)),
        AlgorithmKind::PolarPaint => Box::new(PolarPaint::new(seed, raster, rng)),
    };

    Ok(ActiveRun {
        algorithm,
        budgeter: FrameBudgeter::new(),
    })
}

/// Start a run from a host-supplied algorithm name
///
/// # Errors
///
/// Returns [`EngineError::UnknownAlgorithm`] for an unrecognised name
/// and [`EngineError::SeedOutOfBounds`] for a seed outside the grid.
pub fn start_named(
    name: &str,
    seed: [i32; 2],
    raster: &mut RasterBuffer,
    rng_seed: u64,
) -> Result<ActiveRun> {
    start(name.parse()?, seed, raster, rng_seed)
}

/// Drive a run against the host scheduler until completion
///
/// Returns the number of frames executed. Stops early when the scheduler
/// refuses further frames or the run is cancelled.
pub fn drive_to_completion(
    run: &mut ActiveRun,
    raster: &mut RasterBuffer,
    surface: &mut dyn RasterSurface,
    scheduler: &mut dyn FrameScheduler,
) -> usize {
    let mut frames = 0;
    while scheduler.request_frame() {
        frames += 1;
        if run.tick(raster, surface) == StepStatus::Done {
            break;
        }
    }
    frames
}
