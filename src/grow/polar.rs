//! Deterministic polar-order painting with local HSL diffusion
//!
//! Every cell's radius and angle around the seed are computed once and
//! sorted into a fixed visitation order covering the grid exactly once.
//! The painter then walks that order carrying a running HSL color: each
//! cell takes a bounded random step from the previous color and blends
//! toward the average of its already-painted neighbors. The neighbor
//! influence weight itself drifts slowly, and its drift rate drifts too,
//! which produces slowly evolving stylistic phases across the run.

use crate::color::hsl::{self, Hsl, HslAverage};
use crate::color::rgba::BLACK;
use crate::engine::budgeter::StepStatus;
use crate::engine::run::GrowthAlgorithm;
use crate::raster::buffer::{NEIGHBORS_8, RasterBuffer};
use crate::raster::mask::CoverageMask;
use rand::Rng;
use rand::rngs::StdRng;
use std::f64::consts::TAU;

/// Fixed parameters for the polar painter
#[derive(Clone, Copy, Debug)]
pub struct PolarPaintConfig {
    /// Cells painted per frame
    pub cells_per_frame: usize,
    /// Maximum hue change between consecutive cells, in degrees
    pub max_hue_step: f64,
    /// Maximum saturation change between consecutive cells
    pub max_saturation_step: f64,
    /// Maximum lightness change between consecutive cells
    pub max_lightness_step: f64,
    /// Lower and upper bound for the neighbor influence weight
    pub influence_bounds: [f64; 2],
    /// Lower and upper bound for the influence drift rate
    pub drift_rate_bounds: [f64; 2],
    /// Per-cell oscillation applied to the drift rate itself
    pub rate_oscillation: f64,
}

impl Default for PolarPaintConfig {
    fn default() -> Self {
        Self {
            cells_per_frame: 300,
            max_hue_step: 90.0,
            max_saturation_step: 0.3,
            max_lightness_step: 0.3,
            influence_bounds: [0.1, 0.9],
            drift_rate_bounds: [0.002, 0.02],
            rate_oscillation: 0.000_05,
        }
    }
}

/// Compute the full visitation order around a seed
///
/// Covers every cell exactly once, sorted by radius ascending with ties
/// broken by angle ascending; angles are normalized into `[0, 2*PI)` so
/// the tie order is stable.
pub fn visitation_order(width: usize, height: usize, seed: [i32; 2]) -> Vec<[i32; 2]> {
    struct PolarCell {
        position: [i32; 2],
        radius: f64,
        angle: f64,
    }

    let mut cells = Vec::with_capacity(width * height);
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let dx = f64::from(x - seed[0]);
            let dy = f64::from(y - seed[1]);
            cells.push(PolarCell {
                position: [x, y],
                radius: dx.hypot(dy),
                angle: dy.atan2(dx).rem_euclid(TAU),
            });
        }
    }

    cells.sort_by(|a, b| {
        a.radius
            .total_cmp(&b.radius)
            .then_with(|| a.angle.total_cmp(&b.angle))
    });

    cells.into_iter().map(|cell| cell.position).collect()
}

const fn midpoint(bounds: [f64; 2]) -> f64 {
    let [low, high] = bounds;
    (low + high) / 2.0
}

/// Polar painter state
pub struct PolarPaint {
    config: PolarPaintConfig,
    order: Vec<[i32; 2]>,
    cursor: usize,
    painted: CoverageMask,
    current: Hsl,
    influence: f64,
    drift_rate: f64,
    rng: StdRng,
}

impl PolarPaint {
    /// Clear the buffer and precompute the visitation order
    pub fn new(seed: [i32; 2], raster: &mut RasterBuffer, rng: StdRng) -> Self {
        Self::with_config(PolarPaintConfig::default(), seed, raster, rng)
    }

    /// Like [`PolarPaint::new`] with explicit parameters
    pub fn with_config(
        config: PolarPaintConfig,
        seed: [i32; 2],
        raster: &mut RasterBuffer,
        mut rng: StdRng,
    ) -> Self {
        raster.clear(BLACK);
        let order = visitation_order(raster.width(), raster.height(), seed);
        let current = Hsl {
            h: rng.random::<f64>() * 360.0,
            s: 0.2f64.mul_add(rng.random::<f64>(), 0.7),
            l: 0.2f64.mul_add(rng.random::<f64>(), 0.5),
        };
        Self {
            config,
            order,
            cursor: 0,
            painted: CoverageMask::new(raster.width(), raster.height()),
            current,
            influence: midpoint(config.influence_bounds),
            drift_rate: midpoint(config.drift_rate_bounds),
            rng,
        }
    }

    /// The parameters this run was started with
    pub const fn config(&self) -> &PolarPaintConfig {
        &self.config
    }

    /// The precomputed visitation order
    pub fn order(&self) -> &[[i32; 2]] {
        &self.order
    }

    /// Index of the next cell to paint
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Paint the next cell in order; `false` once the order is exhausted
    fn paint_next(&mut self, raster: &mut RasterBuffer) -> bool {
        let Some(&position) = self.order.get(self.cursor) else {
            return false;
        };

        // Two-level random walk: the drift rate itself oscillates, then
        // the influence weight drifts at that rate.
        let [rate_low, rate_high] = self.config.drift_rate_bounds;
        let oscillation = (self.rng.random::<f64>() - 0.5) * self.config.rate_oscillation * 2.0;
        self.drift_rate = (self.drift_rate + oscillation).clamp(rate_low, rate_high);

        let [influence_low, influence_high] = self.config.influence_bounds;
        let drift = (self.rng.random::<f64>() - 0.5) * self.drift_rate * 2.0;
        self.influence = (self.influence + drift).clamp(influence_low, influence_high);

        let mut candidate = self.current;
        if self.cursor > 0 || self.order.len() == 1 {
            candidate.h += (self.rng.random::<f64>() - 0.5) * self.config.max_hue_step;
            candidate.s = ((self.rng.random::<f64>() - 0.5)
                .mul_add(self.config.max_saturation_step, candidate.s))
            .clamp(0.0, 1.0);
            candidate.l = ((self.rng.random::<f64>() - 0.5)
                .mul_add(self.config.max_lightness_step, candidate.l))
            .clamp(0.0, 1.0);
        }
        candidate.h = hsl::wrap_hue(candidate.h);

        let mut neighbors = HslAverage::default();
        for &[dx, dy] in &NEIGHBORS_8 {
            let neighbor = [position[0] + dx, position[1] + dy];
            if self.painted.is_filled(neighbor) {
                if let Some(color) = raster.get(neighbor) {
                    neighbors.add(hsl::rgba_to_hsl(color));
                }
            }
        }

        let blended = match neighbors.mean() {
            Some(mean) if self.influence > 0.0 => Hsl {
                h: hsl::blend_hue(candidate.h, mean.h, self.influence),
                s: candidate
                    .s
                    .mul_add(1.0 - self.influence, mean.s * self.influence)
                    .clamp(0.0, 1.0),
                l: candidate
                    .l
                    .mul_add(1.0 - self.influence, mean.l * self.influence)
                    .clamp(0.0, 1.0),
            },
            _ => candidate,
        };

        self.current = blended;
        raster.set(position, hsl::hsl_to_rgba(blended));
        self.painted.mark(position);
        self.cursor += 1;
        true
    }
}

impl GrowthAlgorithm for PolarPaint {
    fn step(&mut self, raster: &mut RasterBuffer) -> StepStatus {
        for _ in 0..self.config.cells_per_frame {
            if !self.paint_next(raster) {
                break;
            }
        }
        if self.cursor >= self.order.len() {
            StepStatus::Done
        } else {
            StepStatus::Continue
        }
    }

    fn filled(&self) -> usize {
        self.painted.filled()
    }
}
