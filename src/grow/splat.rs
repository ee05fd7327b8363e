//! Multi-source splat growth with ownership blending
//!
//! A sampled number of ink sources claim cells outward from procedurally
//! shaped initial splats. Each source owns the cells it claims first;
//! later writes from other sources blend into the existing color without
//! taking ownership, which keeps boundaries soft. Saturation decays
//! exponentially per frame so later paint approaches the white canvas,
//! and an iteration cap bounds the run.

use crate::color::rgba::{self, ColorAccumulator, Rgba, WHITE};
use crate::engine::budgeter::StepStatus;
use crate::engine::frontier::WeightedFrontier;
use crate::engine::run::GrowthAlgorithm;
use crate::raster::buffer::{NEIGHBORS_8, RasterBuffer};
use ndarray::Array2;
use rand::Rng;
use rand::rngs::StdRng;
use std::collections::HashMap;
use std::f64::consts::TAU;

/// Parameters sampled once per run and held fixed
#[derive(Clone, Copy, Debug)]
pub struct SplatGrowthConfig {
    /// Hard iteration cap bounding the run
    pub max_iterations: usize,
    /// Number of growth sources
    pub source_count: usize,
    /// Per-source channel spread around the shared base color
    pub color_randomness: f64,
    /// Multiplicative saturation decay applied every frame
    pub decay_factor: f64,
    /// Base chance a popped frontier cell is painted
    pub spread_probability: f64,
    /// Extra spread chance per inked neighbor
    pub weight_influence: f64,
    /// Radius of the cross-source smoothing sample
    pub smoothing_radius: i32,
    /// Channel noise fraction added to every painted color
    pub color_noise: f64,
    /// Shared base color the sources perturb
    pub base_color: Rgba,
    /// Frontier entries popped per source per frame
    pub cells_per_source: usize,
    /// Iteration interval between per-source frontier reweighs
    pub reweigh_interval: usize,
    /// Share of a new color mixed into a cell owned by another source
    pub blend_factor: f64,
}

impl SplatGrowthConfig {
    /// Sample a run configuration from the documented ranges
    pub fn sample(rng: &mut StdRng) -> Self {
        Self {
            max_iterations: 50_000,
            source_count: rng.random_range(5..=100),
            color_randomness: rng.random_range(0.1..=1.0),
            decay_factor: rng.random_range(0.999..=1.0),
            spread_probability: rng.random_range(0.3..=0.7),
            weight_influence: rng.random_range(0.1..=0.4),
            smoothing_radius: rng.random_range(2..=4),
            color_noise: rng.random_range(0.01..=0.06),
            base_color: Rgba::opaque(
                rng.random_range(0..204),
                rng.random_range(0..204),
                rng.random_range(0..204),
            ),
            cells_per_source: 3,
            reweigh_interval: 10,
            blend_factor: 0.3,
        }
    }
}

/// Procedural outline of a source's initial ink deposit
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SplatShape {
    /// Filled circle
    Disc,
    /// Partial ring segment
    Arc,
    /// Disc with an irregular, per-direction radius
    Blob,
    /// Several small circles scattered near the center
    Cluster,
    /// Thin elongated smear in one direction
    Streak,
}

impl SplatShape {
    fn sample(rng: &mut StdRng) -> Self {
        match rng.random_range(0..5u8) {
            0 => Self::Disc,
            1 => Self::Arc,
            2 => Self::Blob,
            3 => Self::Cluster,
            _ => Self::Streak,
        }
    }

    /// Enumerate the initial cells around the center
    ///
    /// Cells may fall outside the grid; painting skips them. The list is
    /// deduplicated so every cell is painted once.
    pub fn cells(self, center: [i32; 2], radius: i32, rng: &mut StdRng) -> Vec<[i32; 2]> {
        let mut cells = match self {
            Self::Disc => disc_cells(center, radius),
            Self::Arc => arc_cells(center, radius, rng),
            Self::Blob => blob_cells(center, radius, rng),
            Self::Cluster => cluster_cells(center, radius, rng),
            Self::Streak => streak_cells(center, radius, rng),
        };
        cells.sort_unstable();
        cells.dedup();
        cells
    }
}

fn disc_cells(center: [i32; 2], radius: i32) -> Vec<[i32; 2]> {
    let radius = radius.max(1);
    let limit = f64::from(radius);
    let mut cells = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if f64::from(dx).hypot(f64::from(dy)) <= limit {
                cells.push([center[0] + dx, center[1] + dy]);
            }
        }
    }
    cells
}

fn arc_cells(center: [i32; 2], radius: i32, rng: &mut StdRng) -> Vec<[i32; 2]> {
    let radius = radius.max(2);
    let outer = f64::from(radius);
    let inner = outer * 0.5;
    let start = rng.random::<f64>() * TAU;
    let span = rng.random_range(0.5..=1.5) * std::f64::consts::PI;

    let mut cells = vec![center];
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let distance = f64::from(dx).hypot(f64::from(dy));
            if distance < inner || distance > outer {
                continue;
            }
            let angle = f64::from(dy).atan2(f64::from(dx)).rem_euclid(TAU);
            if (angle - start).rem_euclid(TAU) <= span {
                cells.push([center[0] + dx, center[1] + dy]);
            }
        }
    }
    cells
}

fn blob_cells(center: [i32; 2], radius: i32, rng: &mut StdRng) -> Vec<[i32; 2]> {
    const LOBES: usize = 16;
    let radius = radius.max(1);
    let mut lobe_radii = [0.0f64; LOBES];
    for lobe in &mut lobe_radii {
        *lobe = f64::from(radius) * rng.random_range(0.5..=1.2);
    }

    let extent = (f64::from(radius) * 1.2).ceil() as i32;
    let mut cells = vec![center];
    for dy in -extent..=extent {
        for dx in -extent..=extent {
            let distance = f64::from(dx).hypot(f64::from(dy));
            let angle = f64::from(dy).atan2(f64::from(dx)).rem_euclid(TAU);
            let lobe = (angle / TAU * LOBES as f64) as usize % LOBES;
            let limit = lobe_radii.get(lobe).copied().unwrap_or(f64::from(radius));
            if distance <= limit {
                cells.push([center[0] + dx, center[1] + dy]);
            }
        }
    }
    cells
}

fn cluster_cells(center: [i32; 2], radius: i32, rng: &mut StdRng) -> Vec<[i32; 2]> {
    let radius = radius.max(1);
    let blots = rng.random_range(3..=6);
    let mut cells = vec![center];
    for _ in 0..blots {
        let offset_x = rng.random_range(-radius..=radius);
        let offset_y = rng.random_range(-radius..=radius);
        let blot_radius = rng.random_range(1..=(radius / 2).max(1));
        cells.extend(disc_cells(
            [center[0] + offset_x, center[1] + offset_y],
            blot_radius,
        ));
    }
    cells
}

fn streak_cells(center: [i32; 2], radius: i32, rng: &mut StdRng) -> Vec<[i32; 2]> {
    let radius = radius.max(1);
    let angle = rng.random::<f64>() * TAU;
    let length = radius * rng.random_range(2..=4);
    let (sin, cos) = angle.sin_cos();

    let mut cells = Vec::new();
    for t in 0..=length {
        let x = center[0] + (f64::from(t) * cos).round() as i32;
        let y = center[1] + (f64::from(t) * sin).round() as i32;
        // one-cell fringe keeps the rasterized line connected
        cells.push([x, y]);
        cells.push([x + 1, y]);
        cells.push([x, y + 1]);
    }
    cells
}

/// One independent ink source
pub struct GrowthSource {
    id: u16,
    center: [i32; 2],
    radius: i32,
    shape: SplatShape,
    color: Rgba,
    saturation: f64,
    frontier: WeightedFrontier,
    activated: bool,
}

impl GrowthSource {
    /// Identifier used for ownership tags
    pub const fn id(&self) -> u16 {
        self.id
    }

    /// Center cell the source grows from
    pub const fn center(&self) -> [i32; 2] {
        self.center
    }

    /// Target color before decay and noise
    pub const fn color(&self) -> Rgba {
        self.color
    }

    /// Current saturation multiplier
    pub const fn saturation(&self) -> f64 {
        self.saturation
    }

    /// The source's own frontier
    pub const fn frontier(&self) -> &WeightedFrontier {
        &self.frontier
    }

    /// Whether the initial splat has been painted
    pub const fn is_activated(&self) -> bool {
        self.activated
    }

    /// Whether the source can no longer paint new cells
    pub fn is_dormant(&self) -> bool {
        self.activated && self.frontier.is_empty()
    }
}

/// Splat growth state
pub struct SplatGrowth {
    config: SplatGrowthConfig,
    sources: Vec<GrowthSource>,
    ownership: Array2<Option<u16>>,
    iteration: usize,
    claimed: usize,
    rng: StdRng,
}

impl SplatGrowth {
    /// Clear the buffer to white and scatter the sources
    pub fn new(seed: [i32; 2], raster: &mut RasterBuffer, mut rng: StdRng) -> Self {
        let config = SplatGrowthConfig::sample(&mut rng);
        Self::with_config(config, seed, raster, rng)
    }

    /// Like [`SplatGrowth::new`] with explicit parameters
    ///
    /// The first source anchors at the host-supplied seed; the rest land
    /// at random positions.
    pub fn with_config(
        config: SplatGrowthConfig,
        seed: [i32; 2],
        raster: &mut RasterBuffer,
        mut rng: StdRng,
    ) -> Self {
        raster.clear(WHITE);

        let mut sources = Vec::with_capacity(config.source_count);
        for index in 0..config.source_count {
            let center = if index == 0 {
                seed
            } else {
                [
                    rng.random_range(0..raster.width()) as i32,
                    rng.random_range(0..raster.height()) as i32,
                ]
            };
            sources.push(GrowthSource {
                id: index as u16,
                center,
                radius: rng.random_range(1..=10),
                shape: SplatShape::sample(&mut rng),
                color: rgba::perturb(config.base_color, config.color_randomness * 255.0, &mut rng),
                saturation: 1.0,
                frontier: WeightedFrontier::new(),
                activated: false,
            });
        }

        Self {
            config,
            sources,
            ownership: Array2::from_elem((raster.height(), raster.width()), None),
            iteration: 0,
            claimed: 0,
            rng,
        }
    }

    /// The parameters this run was started with
    pub const fn config(&self) -> &SplatGrowthConfig {
        &self.config
    }

    /// All growth sources
    pub fn sources(&self) -> &[GrowthSource] {
        &self.sources
    }

    /// Iterations executed so far
    pub const fn iteration(&self) -> usize {
        self.iteration
    }

    /// The source that first claimed a cell, if any
    pub fn owner(&self, position: [i32; 2]) -> Option<u16> {
        owner_at(&self.ownership, position)
    }
}

impl GrowthAlgorithm for SplatGrowth {
    fn step(&mut self, raster: &mut RasterBuffer) -> StepStatus {
        if self.iteration >= self.config.max_iterations {
            return StepStatus::Done;
        }

        let Self {
            config,
            sources,
            ownership,
            iteration,
            claimed,
            rng,
        } = self;

        for source in sources.iter_mut() {
            source.saturation *= config.decay_factor;
        }

        for source in sources.iter_mut() {
            if !source.activated {
                activate_source(source, raster, ownership, claimed, config, rng);
                continue;
            }

            spread_source(source, raster, ownership, claimed, config, rng);

            if *iteration % config.reweigh_interval == 0 && !source.frontier.is_empty() {
                let center = source.center;
                source
                    .frontier
                    .reweigh(|position| frontier_weight(raster, center, position));
            }
        }

        *iteration += 1;

        let dormant = sources.iter().all(GrowthSource::is_dormant);
        if *iteration >= config.max_iterations || dormant {
            StepStatus::Done
        } else {
            StepStatus::Continue
        }
    }

    fn filled(&self) -> usize {
        self.claimed
    }
}

/// Weight favoring dense ink near the source center
fn frontier_weight(raster: &RasterBuffer, center: [i32; 2], position: [i32; 2]) -> f64 {
    let density = (inked_neighbors(raster, position) + 1) as f64;
    let distance =
        f64::from(position[0] - center[0]).hypot(f64::from(position[1] - center[1]));
    density.powi(2) / (distance + 1.0).sqrt()
}

/// Count neighbors already carrying ink from any source
fn inked_neighbors(raster: &RasterBuffer, position: [i32; 2]) -> usize {
    NEIGHBORS_8
        .iter()
        .filter(|&&[dx, dy]| raster.sample([position[0] + dx, position[1] + dy]).has_ink())
        .count()
}

fn owner_at(ownership: &Array2<Option<u16>>, position: [i32; 2]) -> Option<u16> {
    let [x, y] = position;
    if x < 0 || y < 0 {
        return None;
    }
    ownership.get([y as usize, x as usize]).copied().flatten()
}

/// Outcome of writing one cell
enum PaintOutcome {
    /// The cell was unowned and is now claimed by the painter
    Claimed,
    /// The painter already owned the cell and refreshed its color
    Refreshed,
    /// Another source owns the cell; colors blended, ownership kept
    Blended,
}

/// Write a cell, claiming, refreshing or cross-blending by ownership
///
/// Returns `None` for out-of-bounds coordinates. Ownership never changes
/// after the first claim even though the color may keep blending.
fn paint_cell(
    raster: &mut RasterBuffer,
    ownership: &mut Array2<Option<u16>>,
    claimed: &mut usize,
    position: [i32; 2],
    color: Rgba,
    id: u16,
    blend_factor: f64,
) -> Option<PaintOutcome> {
    if !raster.contains(position) {
        return None;
    }
    let index = [position[1] as usize, position[0] as usize];

    match ownership.get(index).copied().flatten() {
        None => {
            raster.set(position, color);
            if let Some(tag) = ownership.get_mut(index) {
                *tag = Some(id);
            }
            *claimed += 1;
            Some(PaintOutcome::Claimed)
        }
        Some(existing) if existing == id => {
            raster.set(position, color);
            Some(PaintOutcome::Refreshed)
        }
        Some(_) => {
            let current = raster.sample(position);
            raster.set(position, rgba::mix(current, color, blend_factor));
            Some(PaintOutcome::Blended)
        }
    }
}

/// Queue an unowned in-bounds cell on the source's frontier
fn extend_frontier(
    source: &mut GrowthSource,
    raster: &RasterBuffer,
    ownership: &Array2<Option<u16>>,
    position: [i32; 2],
) {
    if raster.contains(position)
        && owner_at(ownership, position).is_none()
        && !source.frontier.contains(position)
    {
        let weight = frontier_weight(raster, source.center, position);
        source.frontier.insert(position, weight);
    }
}

/// Paint the source's initial splat shape and seed its frontier
///
/// The frontier only extends once the whole shape is down; queueing while
/// painting would let later shape cells claim coordinates the frontier
/// already holds.
fn activate_source(
    source: &mut GrowthSource,
    raster: &mut RasterBuffer,
    ownership: &mut Array2<Option<u16>>,
    claimed: &mut usize,
    config: &SplatGrowthConfig,
    rng: &mut StdRng,
) {
    let cells = source.shape.cells(source.center, source.radius, rng);
    let mut painted = Vec::with_capacity(cells.len());
    for position in cells {
        let color = rgba::decay_toward_white(source.color, source.saturation);
        let color = rgba::perturb(color, config.color_noise * 255.0, rng);
        if paint_cell(
            raster,
            ownership,
            claimed,
            position,
            color,
            source.id,
            config.blend_factor,
        )
        .is_some()
        {
            painted.push(position);
        }
    }
    for position in painted {
        for &[dx, dy] in &NEIGHBORS_8 {
            extend_frontier(source, raster, ownership, [position[0] + dx, position[1] + dy]);
        }
    }
    source.activated = true;
}

/// Pop a few frontier cells and paint those that pass the spread gate
fn spread_source(
    source: &mut GrowthSource,
    raster: &mut RasterBuffer,
    ownership: &mut Array2<Option<u16>>,
    claimed: &mut usize,
    config: &SplatGrowthConfig,
    rng: &mut StdRng,
) {
    let budget = config.cells_per_source.min(source.frontier.len());
    for _ in 0..budget {
        let Some(position) = source.frontier.pick(rng) else {
            break;
        };

        let density = inked_neighbors(raster, position);
        let chance = (density as f64).mul_add(config.weight_influence, config.spread_probability);

        if rng.random::<f64>() <= chance {
            let composed = match area_color(raster, ownership, position, config.smoothing_radius) {
                Some(area) => {
                    // the area average counts twice to smooth boundaries
                    let blended =
                        rgba::average(&[source.color, area, area]).unwrap_or(source.color);
                    rgba::decay_toward_white(blended, source.saturation)
                }
                None => rgba::decay_toward_white(source.color, source.saturation),
            };
            let composed = rgba::perturb(composed, config.color_noise * 255.0, rng);

            if paint_cell(
                raster,
                ownership,
                claimed,
                position,
                composed,
                source.id,
                config.blend_factor,
            )
            .is_some()
            {
                for &[dx, dy] in &NEIGHBORS_8 {
                    extend_frontier(
                        source,
                        raster,
                        ownership,
                        [position[0] + dx, position[1] + dy],
                    );
                }
            }
        }

        source.frontier.remove(position);
    }
}

/// Blend colors sampled from every source within the smoothing radius
///
/// Samples group by owning source, average within each source with
/// inverse-distance weights, then blend across sources by each source's
/// total contribution. `None` when no inked cell falls inside the
/// radius.
fn area_color(
    raster: &RasterBuffer,
    ownership: &Array2<Option<u16>>,
    position: [i32; 2],
    radius: i32,
) -> Option<Rgba> {
    let mut by_source: HashMap<u16, ColorAccumulator> = HashMap::new();
    let limit = f64::from(radius);

    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let probe = [position[0] + dx, position[1] + dy];
            let distance = f64::from(dx).hypot(f64::from(dy));
            if distance > limit || !raster.contains(probe) {
                continue;
            }
            let color = raster.sample(probe);
            if !color.has_ink() {
                continue;
            }
            let Some(owner) = owner_at(ownership, probe) else {
                continue;
            };
            by_source
                .entry(owner)
                .or_default()
                .add(color, 1.0 / (distance + 1.0));
        }
    }

    if by_source.is_empty() {
        return None;
    }

    let mut across = ColorAccumulator::new();
    for accumulator in by_source.values() {
        if let Some(mean) = accumulator.mean() {
            across.add(mean, accumulator.total_weight());
        }
    }
    across.mean()
}
