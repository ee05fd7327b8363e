//! Command-line interface for batch image generation

use crate::color::rgba::BLACK;
use crate::engine::budgeter::StepStatus;
use crate::engine::run::{self, AlgorithmKind};
use crate::io::configuration::{
    DEFAULT_HEIGHT, DEFAULT_MAX_FRAMES, DEFAULT_WIDTH, FRAME_CAPTURE_STRIDE, GIF_FRAME_DELAY_MS,
};
use crate::io::error::Result;
use crate::io::image::export_raster_as_png;
use crate::io::progress::RunProgress;
use crate::io::visualization::FrameRecorder;
use crate::raster::buffer::RasterBuffer;
use crate::raster::surface::{NullSurface, RasterSurface};
use clap::Parser;
use rand::Rng;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rasterbloom")]
#[command(
    author,
    version,
    about = "Grow images cell by cell outward from a seed point"
)]
/// Command-line arguments for the image generation tool
pub struct Cli {
    /// Output PNG file, or directory when generating multiple runs
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Growth algorithm: aggregation, flood-diffusion, splat-growth or polar-paint
    #[arg(short, long, default_value = "flood-diffusion")]
    pub algorithm: String,

    /// Grid width in cells
    #[arg(short = 'W', long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Grid height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Seed x coordinate, defaults to the grid center
    #[arg(short = 'x', long)]
    pub seed_x: Option<i32>,

    /// Seed y coordinate, defaults to the grid center
    #[arg(short = 'y', long)]
    pub seed_y: Option<i32>,

    /// Random seed for reproducible generation, random when omitted
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Maximum frames driven before a run is abandoned
    #[arg(short, long, default_value_t = DEFAULT_MAX_FRAMES)]
    pub frames: usize,

    /// Number of runs to generate
    #[arg(short, long, default_value_t = 1)]
    pub runs: usize,

    /// Record the growth as an animated GIF next to each PNG
    #[arg(short, long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// The seed coordinate, defaulting to the grid center
    pub fn seed_point(&self) -> [i32; 2] {
        [
            self.seed_x.unwrap_or((self.width / 2) as i32),
            self.seed_y.unwrap_or((self.height / 2) as i32),
        ]
    }
}

/// Orchestrates batch generation with progress tracking
pub struct RunProcessor {
    cli: Cli,
    progress: Option<RunProgress>,
}

impl RunProcessor {
    /// Create a new processor from parsed CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress = cli.should_show_progress().then(RunProgress::new);
        Self { cli, progress }
    }

    /// Generate all requested runs
    ///
    /// # Errors
    ///
    /// Returns an error if the algorithm name is unknown, the seed lies
    /// outside the grid, or an output file cannot be written.
    pub fn process(&mut self) -> Result<()> {
        let kind: AlgorithmKind = self.cli.algorithm.parse()?;

        if let Some(ref mut progress) = self.progress {
            progress.initialize(self.cli.runs);
        }

        // Unseeded invocations draw a fresh base so every batch differs
        let base_seed = self
            .cli
            .seed
            .unwrap_or_else(|| rand::rng().random::<u64>());

        for run_index in 0..self.cli.runs {
            let rng_seed = base_seed.wrapping_add(run_index as u64);
            self.process_run(kind, run_index, rng_seed)?;
        }

        if let Some(ref progress) = self.progress {
            progress.finish();
        }

        Ok(())
    }

    fn process_run(&mut self, kind: AlgorithmKind, index: usize, rng_seed: u64) -> Result<()> {
        let mut raster = RasterBuffer::new(self.cli.width, self.cli.height, BLACK);
        let seed = self.cli.seed_point();
        let mut run = run::start(kind, seed, &mut raster, rng_seed)?;

        if let Some(ref mut progress) = self.progress {
            progress.start_run(index, format!("{kind} #{index}"), raster.area());
        }

        let mut recorder = self
            .cli
            .visualize
            .then(|| FrameRecorder::new(FRAME_CAPTURE_STRIDE));
        let mut sink = NullSurface;

        for _ in 0..self.cli.frames {
            let surface: &mut dyn RasterSurface = match recorder {
                Some(ref mut recorder) => recorder,
                None => &mut sink,
            };
            let status = run.tick(&mut raster, surface);

            if let Some(ref mut progress) = self.progress {
                progress.update_run(index, run.filled());
            }
            if status == StepStatus::Done {
                break;
            }
        }

        export_raster_as_png(&raster, &self.png_path(index).to_string_lossy())?;

        if let Some(ref mut recorder) = recorder {
            recorder.capture_now(&raster);
            recorder.export_gif(&self.gif_path(index).to_string_lossy(), GIF_FRAME_DELAY_MS)?;
        }

        if let Some(ref mut progress) = self.progress {
            progress.complete_run(index);
        }

        Ok(())
    }

    fn png_path(&self, index: usize) -> PathBuf {
        if self.cli.runs == 1 {
            self.cli.output.clone()
        } else {
            self.cli.output.join(format!("run_{index:03}.png"))
        }
    }

    fn gif_path(&self, index: usize) -> PathBuf {
        if self.cli.runs == 1 {
            self.cli.output.with_extension("gif")
        } else {
            self.cli.output.join(format!("run_{index:03}.gif"))
        }
    }
}
