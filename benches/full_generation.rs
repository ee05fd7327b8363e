//! Benchmarks complete runs of the growth algorithms on small grids

use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rasterbloom::color::rgba::BLACK;
use rasterbloom::engine::budgeter::StepStatus;
use rasterbloom::engine::run::GrowthAlgorithm;
use rasterbloom::grow::aggregation::Aggregation;
use rasterbloom::grow::diffusion::FloodDiffusion;
use rasterbloom::grow::polar::PolarPaint;
use rasterbloom::raster::buffer::RasterBuffer;

fn run_to_done(algorithm: &mut dyn GrowthAlgorithm, raster: &mut RasterBuffer) {
    while algorithm.step(raster) == StepStatus::Continue {}
}

fn bench_full_generation(c: &mut Criterion) {
    c.bench_function("aggregation_32x32", |b| {
        b.iter(|| {
            let mut raster = RasterBuffer::new(32, 32, BLACK);
            let rng = StdRng::seed_from_u64(7);
            let mut algorithm = Aggregation::new([16, 16], &mut raster, rng);
            run_to_done(&mut algorithm, &mut raster);
            raster
        });
    });

    c.bench_function("flood_diffusion_32x32", |b| {
        b.iter(|| {
            let mut raster = RasterBuffer::new(32, 32, BLACK);
            let rng = StdRng::seed_from_u64(7);
            let mut algorithm = FloodDiffusion::new([16, 16], &mut raster, rng);
            run_to_done(&mut algorithm, &mut raster);
            raster
        });
    });

    c.bench_function("polar_paint_64x64", |b| {
        b.iter(|| {
            let mut raster = RasterBuffer::new(64, 64, BLACK);
            let rng = StdRng::seed_from_u64(7);
            let mut algorithm = PolarPaint::new([32, 32], &mut raster, rng);
            run_to_done(&mut algorithm, &mut raster);
            raster
        });
    });
}

criterion_group!(benches, bench_full_generation);
criterion_main!(benches);
