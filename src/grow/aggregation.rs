//! Particle aggregation by random walk
//!
//! Walkers spawn at random unfilled cells and wander one cell at a time
//! until they touch the grown structure, then freeze with a color derived
//! from their filled neighbors. Walkers that leave the grid, collide with
//! the structure mid-step or exceed their step budget are abandoned. The
//! result is the branching dendritic texture of diffusion-limited growth.

use crate::color::rgba::{self, BLACK, Rgba};
use crate::engine::budgeter::StepStatus;
use crate::engine::run::GrowthAlgorithm;
use crate::raster::buffer::{NEIGHBORS_8, RasterBuffer};
use crate::raster::mask::CoverageMask;
use rand::Rng;
use rand::rngs::StdRng;

/// Fixed parameters bounding a single aggregation run
#[derive(Clone, Copy, Debug)]
pub struct AggregationConfig {
    /// Walker attempts processed per frame
    pub walkers_per_frame: usize,
    /// Step cap before a wandering walker is abandoned
    pub max_walker_steps: usize,
    /// Spawn retries per walker before the attempt counts as failed
    pub spawn_attempts: usize,
    /// Consecutive failed spawns that end the run
    pub max_consecutive_spawn_failures: usize,
    /// Chance that a sparsely attached cell still stays near its neighbors
    pub similarity_probability: f64,
    /// Channel variation for similar colors
    pub similar_variation: f64,
    /// Channel variation for dissimilar colors
    pub dissimilar_variation: f64,
}

impl AggregationConfig {
    /// Defaults for a grid; the walker range scales with the longer side
    pub fn for_grid(width: usize, height: usize) -> Self {
        Self {
            walkers_per_frame: 50,
            max_walker_steps: width.max(height) * 5,
            spawn_attempts: 200,
            max_consecutive_spawn_failures: 10_000,
            similarity_probability: 0.98,
            similar_variation: 3.0,
            dissimilar_variation: 50.0,
        }
    }
}

/// Aggregation growth state
pub struct Aggregation {
    config: AggregationConfig,
    filled: CoverageMask,
    consecutive_spawn_failures: usize,
    rng: StdRng,
}

impl Aggregation {
    /// Clear the buffer, paint the seed and prepare the walker state
    pub fn new(seed: [i32; 2], raster: &mut RasterBuffer, rng: StdRng) -> Self {
        let config = AggregationConfig::for_grid(raster.width(), raster.height());
        Self::with_config(config, seed, raster, rng)
    }

    /// Like [`Aggregation::new`] with explicit parameters
    pub fn with_config(
        config: AggregationConfig,
        seed: [i32; 2],
        raster: &mut RasterBuffer,
        mut rng: StdRng,
    ) -> Self {
        raster.clear(BLACK);
        let mut filled = CoverageMask::new(raster.width(), raster.height());
        raster.set(seed, rgba::random_color(&mut rng));
        filled.mark(seed);
        Self {
            config,
            filled,
            consecutive_spawn_failures: 0,
            rng,
        }
    }

    /// The parameters this run was started with
    pub const fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Consecutive spawn failures accumulated so far
    pub const fn spawn_failures(&self) -> usize {
        self.consecutive_spawn_failures
    }

    fn is_exhausted(&self) -> bool {
        self.filled.is_full()
            || self.consecutive_spawn_failures >= self.config.max_consecutive_spawn_failures
    }

    /// Find an unfilled spawn cell, counting a failure when none is found
    fn spawn_walker(&mut self) -> Option<[i32; 2]> {
        for _ in 0..self.config.spawn_attempts {
            let x = self.rng.random_range(0..self.filled.width()) as i32;
            let y = self.rng.random_range(0..self.filled.height()) as i32;
            if !self.filled.is_filled([x, y]) {
                self.consecutive_spawn_failures = 0;
                return Some([x, y]);
            }
        }
        self.consecutive_spawn_failures += 1;
        None
    }

    /// Wander until the walker attaches, dies or runs out of steps
    fn walk(&mut self, raster: &mut RasterBuffer, mut walker: [i32; 2]) {
        for _ in 0..self.config.max_walker_steps {
            if self.filled.filled_neighbors(walker) > 0 {
                let color = self.influenced_color(raster, walker);
                raster.set(walker, color);
                self.filled.mark(walker);
                return;
            }

            let dx = self.rng.random_range(-1..=1);
            let dy = self.rng.random_range(-1..=1);
            if dx == 0 && dy == 0 {
                continue;
            }

            let next = [walker[0] + dx, walker[1] + dy];
            if !raster.contains(next) || self.filled.is_filled(next) {
                return;
            }
            walker = next;
        }
    }

    /// Average the filled neighbors and perturb per the similarity draw
    ///
    /// Three or more attached neighbors force a small perturbation, so
    /// well-connected regions stay tonally coherent while lone branches
    /// may veer off into new colors.
    fn influenced_color(&mut self, raster: &RasterBuffer, position: [i32; 2]) -> Rgba {
        let neighbors: Vec<Rgba> = NEIGHBORS_8
            .iter()
            .map(|&[dx, dy]| [position[0] + dx, position[1] + dy])
            .filter(|&neighbor| self.filled.is_filled(neighbor))
            .filter_map(|neighbor| raster.get(neighbor))
            .collect();

        let Some(mean) = rgba::average(&neighbors) else {
            return rgba::random_color(&mut self.rng);
        };

        let similar = neighbors.len() >= 3
            || self.rng.random::<f64>() < self.config.similarity_probability;
        let variation = if similar {
            self.config.similar_variation
        } else {
            self.config.dissimilar_variation
        };
        rgba::perturb(mean, variation * 2.0, &mut self.rng)
    }
}

impl GrowthAlgorithm for Aggregation {
    fn step(&mut self, raster: &mut RasterBuffer) -> StepStatus {
        if self.is_exhausted() {
            return StepStatus::Done;
        }

        for _ in 0..self.config.walkers_per_frame {
            if self.filled.is_full() {
                break;
            }
            let Some(walker) = self.spawn_walker() else {
                continue;
            };
            self.walk(raster, walker);
        }

        if self.is_exhausted() {
            StepStatus::Done
        } else {
            StepStatus::Continue
        }
    }

    fn filled(&self) -> usize {
        self.filled.filled()
    }
}
