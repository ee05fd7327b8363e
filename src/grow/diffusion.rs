//! Weighted flood diffusion from a single seed
//!
//! Growth pulls cells off a weighted frontier instead of flooding
//! uniformly: cells near the most recently filled cell and cells with
//! many filled neighbors are heavily favored, which produces organic
//! lobes and tendrils rather than a circular wavefront.

use crate::color::rgba::{self, BLACK, Rgba};
use crate::engine::budgeter::StepStatus;
use crate::engine::frontier::WeightedFrontier;
use crate::engine::run::GrowthAlgorithm;
use crate::raster::buffer::{NEIGHBORS_8, RasterBuffer};
use crate::raster::mask::CoverageMask;
use rand::Rng;
use rand::rngs::StdRng;

/// Distance floor keeping the most recent cell from dominating outright
const DISTANCE_EPSILON: f64 = 1e-2;

/// Neighbor subsets consulted when deriving colors, chosen once per run
///
/// Skewed subsets bias the texture anisotropy: row-only sampling smears
/// color horizontally, diagonal-only produces hatched grain.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NeighborSkew {
    /// Full eight-cell neighborhood
    Full,
    /// Horizontal neighbors only
    Row,
    /// Vertical neighbors only
    Column,
    /// The four diagonal neighbors only
    Diagonal,
}

impl NeighborSkew {
    /// Offsets sampled for color influence under this skew
    pub const fn offsets(self) -> &'static [[i32; 2]] {
        match self {
            Self::Full => &NEIGHBORS_8,
            Self::Row => &[[-1, 0], [1, 0]],
            Self::Column => &[[0, -1], [0, 1]],
            Self::Diagonal => &[[-1, -1], [1, -1], [-1, 1], [1, 1]],
        }
    }

    fn sample(rng: &mut StdRng) -> Self {
        match rng.random_range(0..4u8) {
            0 => Self::Full,
            1 => Self::Row,
            2 => Self::Column,
            _ => Self::Diagonal,
        }
    }
}

/// Parameters sampled once per run and held fixed
///
/// Holding the draws fixed keeps a single run visually coherent while
/// making consecutive runs distinct.
#[derive(Clone, Copy, Debug)]
pub struct FloodDiffusionConfig {
    /// Exponent applied to the filled-neighbor count in the weight
    pub neighbor_exponent: f64,
    /// Exponent applied to the distance from the last filled cell
    pub distance_exponent: f64,
    /// Neighbor subset consulted when deriving colors
    pub skew: NeighborSkew,
    /// Chance that an unsampled cell falls back to the base color
    pub base_color_probability: f64,
    /// Base color used by that fallback
    pub base_color: Rgba,
    /// Chance that a sparsely connected cell keeps a similar color
    pub similarity_probability: f64,
    /// Channel variation for similar colors
    pub similar_variation: f64,
    /// Channel variation for dissimilar colors
    pub dissimilar_variation: f64,
    /// Cells filled per frame
    pub cells_per_frame: usize,
    /// Processed-cell interval between full frontier reweighs
    pub reweigh_interval: usize,
    /// Random probes used to rescue a color when sampling finds nothing
    pub rescue_probes: usize,
    /// Probe radius for the rescue search
    pub rescue_radius: i32,
}

impl FloodDiffusionConfig {
    /// Sample a run configuration from the documented ranges
    pub fn sample(rng: &mut StdRng) -> Self {
        Self {
            neighbor_exponent: rng.random_range(4.0..=6.0),
            distance_exponent: rng.random_range(3.0..=5.0),
            skew: NeighborSkew::sample(rng),
            base_color_probability: rng.random_range(0.01..=0.10),
            base_color: rgba::random_color(rng),
            similarity_probability: 0.99,
            similar_variation: 9.0,
            dissimilar_variation: 30.0,
            cells_per_frame: 100,
            reweigh_interval: 100,
            rescue_probes: 12,
            rescue_radius: 4,
        }
    }
}

/// Selection weight favoring dense, recently active regions
fn frontier_weight(
    filled: &CoverageMask,
    last_filled: [i32; 2],
    config: &FloodDiffusionConfig,
    position: [i32; 2],
) -> f64 {
    let distance = f64::from(position[0] - last_filled[0])
        .hypot(f64::from(position[1] - last_filled[1]));
    let density = (filled.filled_neighbors(position) + 1) as f64;
    density.powf(config.neighbor_exponent)
        / (distance + DISTANCE_EPSILON).powf(config.distance_exponent)
}

/// Flood diffusion growth state
pub struct FloodDiffusion {
    config: FloodDiffusionConfig,
    filled: CoverageMask,
    frontier: WeightedFrontier,
    last_filled: [i32; 2],
    processed: usize,
    rng: StdRng,
}

impl FloodDiffusion {
    /// Clear the buffer and queue the seed as the first frontier entry
    pub fn new(seed: [i32; 2], raster: &mut RasterBuffer, mut rng: StdRng) -> Self {
        let config = FloodDiffusionConfig::sample(&mut rng);
        Self::with_config(config, seed, raster, rng)
    }

    /// Like [`FloodDiffusion::new`] with explicit parameters
    pub fn with_config(
        config: FloodDiffusionConfig,
        seed: [i32; 2],
        raster: &mut RasterBuffer,
        rng: StdRng,
    ) -> Self {
        raster.clear(BLACK);
        let filled = CoverageMask::new(raster.width(), raster.height());
        let mut frontier = WeightedFrontier::new();
        frontier.insert(seed, frontier_weight(&filled, seed, &config, seed));
        Self {
            config,
            filled,
            frontier,
            last_filled: seed,
            processed: 0,
            rng,
        }
    }

    /// The parameters this run was started with
    pub const fn config(&self) -> &FloodDiffusionConfig {
        &self.config
    }

    /// The current frontier, for hosts that want to inspect growth
    pub const fn frontier(&self) -> &WeightedFrontier {
        &self.frontier
    }

    /// The filled-set mask
    pub const fn coverage(&self) -> &CoverageMask {
        &self.filled
    }

    /// Fill one cell and extend the frontier to its unfilled neighbors
    ///
    /// Neighbors are weighed against the previous most-recent cell; the
    /// marker only advances afterwards, matching the growth cadence the
    /// weight function expects.
    fn fill_cell(&mut self, raster: &mut RasterBuffer, position: [i32; 2]) {
        let color = self.influenced_color(raster, position);
        raster.set(position, color);
        self.filled.mark(position);
        self.frontier.remove(position);

        for &[dx, dy] in &NEIGHBORS_8 {
            let neighbor = [position[0] + dx, position[1] + dy];
            if raster.contains(neighbor)
                && !self.filled.is_filled(neighbor)
                && !self.frontier.contains(neighbor)
            {
                let weight =
                    frontier_weight(&self.filled, self.last_filled, &self.config, neighbor);
                self.frontier.insert(neighbor, weight);
            }
        }

        self.last_filled = position;
        self.processed += 1;
    }

    /// Derive a color from the skewed neighbor sample
    fn influenced_color(&mut self, raster: &RasterBuffer, position: [i32; 2]) -> Rgba {
        let samples: Vec<Rgba> = self
            .config
            .skew
            .offsets()
            .iter()
            .map(|&[dx, dy]| [position[0] + dx, position[1] + dy])
            .filter(|&neighbor| self.filled.is_filled(neighbor))
            .filter_map(|neighbor| raster.get(neighbor))
            .collect();

        if let Some(mean) = rgba::average(&samples) {
            let similar = samples.len() >= 2
                || self.rng.random::<f64>() < self.config.similarity_probability;
            let variation = if similar {
                self.config.similar_variation
            } else {
                self.config.dissimilar_variation
            };
            return rgba::perturb(mean, variation, &mut self.rng);
        }

        self.fallback_color(raster, position)
    }

    /// Fallback chain when the skewed sample finds no filled neighbor
    ///
    /// Base color with a small sampled probability, else a bounded random
    /// probe of the surroundings for any filled cell's color, else a
    /// fresh random color.
    fn fallback_color(&mut self, raster: &RasterBuffer, position: [i32; 2]) -> Rgba {
        if self.rng.random::<f64>() < self.config.base_color_probability {
            return self.config.base_color;
        }

        let radius = self.config.rescue_radius;
        for _ in 0..self.config.rescue_probes {
            let dx = self.rng.random_range(-radius..=radius);
            let dy = self.rng.random_range(-radius..=radius);
            let probe = [position[0] + dx, position[1] + dy];
            if self.filled.is_filled(probe) {
                if let Some(color) = raster.get(probe) {
                    return rgba::perturb(color, self.config.similar_variation, &mut self.rng);
                }
            }
        }

        rgba::random_color(&mut self.rng)
    }
}

impl GrowthAlgorithm for FloodDiffusion {
    fn step(&mut self, raster: &mut RasterBuffer) -> StepStatus {
        let mut count = 0;
        while !self.frontier.is_empty() && count < self.config.cells_per_frame {
            let Some(position) = self.frontier.pick(&mut self.rng) else {
                break;
            };
            self.fill_cell(raster, position);
            count += 1;
        }

        // Filling changes neighbor densities across the whole frontier,
        // so weights are refreshed in batches rather than per cell.
        if !self.frontier.is_empty() && self.processed % self.config.reweigh_interval == 0 {
            let Self {
                config,
                filled,
                frontier,
                last_filled,
                ..
            } = self;
            frontier.reweigh(|position| frontier_weight(filled, *last_filled, config, position));
        }

        if self.frontier.is_empty() {
            StepStatus::Done
        } else {
            StepStatus::Continue
        }
    }

    fn filled(&self) -> usize {
        self.filled.filled()
    }
}
