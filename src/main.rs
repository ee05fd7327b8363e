//! CLI entry point for progressive raster growth image generation

use clap::Parser;
use rasterbloom::io::cli::{Cli, RunProcessor};

fn main() -> rasterbloom::Result<()> {
    let cli = Cli::parse();
    let mut processor = RunProcessor::new(cli);
    processor.process()
}
