//! Validates PNG export and GIF frame capture against the filesystem

use rand::SeedableRng;
use rand::rngs::StdRng;
use rasterbloom::color::rgba::{BLACK, Rgba};
use rasterbloom::engine::budgeter::{BudgetedScheduler, StepStatus};
use rasterbloom::engine::run::{self, AlgorithmKind, GrowthAlgorithm};
use rasterbloom::grow::polar::PolarPaint;
use rasterbloom::io::error::EngineError;
use rasterbloom::io::image::export_raster_as_png;
use rasterbloom::io::visualization::FrameRecorder;
use rasterbloom::raster::buffer::RasterBuffer;
use rasterbloom::raster::surface::RasterSurface;

#[test]
fn test_png_export_writes_expected_pixels() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("out.png");

    let mut raster = RasterBuffer::new(4, 3, BLACK);
    raster.set([2, 1], Rgba::opaque(200, 10, 30));

    export_raster_as_png(&raster, &path.to_string_lossy()).expect("Failed to export PNG");

    let loaded = image::open(&path).expect("Failed to reload PNG").to_rgba8();
    assert_eq!(loaded.dimensions(), (4, 3));
    assert_eq!(loaded.get_pixel(2, 1).0, [200, 10, 30, 255]);
    assert_eq!(loaded.get_pixel(0, 0).0, [0, 0, 0, 255]);
}

#[test]
fn test_gif_export_without_frames_fails() {
    let recorder = FrameRecorder::new(1);
    let result = recorder.export_gif("unused.gif", 20);
    assert!(matches!(result, Err(EngineError::NoFramesCaptured)));
}

#[test]
fn test_recorder_samples_blits_by_stride() {
    let raster = RasterBuffer::new(4, 4, BLACK);
    let mut recorder = FrameRecorder::new(3);

    for _ in 0..9 {
        recorder.blit(&raster);
    }
    assert_eq!(recorder.frame_count(), 3);

    recorder.capture_now(&raster);
    assert_eq!(recorder.frame_count(), 4);
}

#[test]
fn test_gif_export_of_recorded_run() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("growth.gif");

    let mut raster = RasterBuffer::new(6, 6, BLACK);
    let rng = StdRng::seed_from_u64(2);
    let mut algorithm = PolarPaint::new([3, 3], &mut raster, rng);
    let mut recorder = FrameRecorder::new(1);

    loop {
        let status = algorithm.step(&mut raster);
        recorder.blit(&raster);
        if status == StepStatus::Done {
            break;
        }
    }

    recorder
        .export_gif(&path.to_string_lossy(), 20)
        .expect("Failed to export GIF");

    let metadata = std::fs::metadata(&path).expect("GIF file should exist");
    assert!(metadata.len() > 0, "exported GIF must not be empty");
}

#[test]
fn test_full_run_through_public_surface_exports() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("aggregation.png");

    let mut raster = RasterBuffer::new(8, 8, BLACK);
    let mut run = run::start(AlgorithmKind::Aggregation, [4, 4], &mut raster, 1)
        .expect("Start should succeed for an in-bounds seed");
    let mut recorder = FrameRecorder::new(1);
    let mut scheduler = BudgetedScheduler::new(10_000);

    run::drive_to_completion(&mut run, &mut raster, &mut recorder, &mut scheduler);
    assert!(run.is_finished());

    export_raster_as_png(&raster, &path.to_string_lossy()).expect("Failed to export PNG");
    assert!(path.exists());
    assert!(recorder.frame_count() > 0);
}

#[test]
fn test_step_algorithm_directly_via_trait() {
    use rasterbloom::engine::run::GrowthAlgorithm;

    let mut raster = RasterBuffer::new(2, 2, BLACK);
    let rng = StdRng::seed_from_u64(8);
    let mut algorithm = PolarPaint::new([0, 0], &mut raster, rng);
    let algorithm: &mut dyn GrowthAlgorithm = &mut algorithm;
    assert_eq!(algorithm.step(&mut raster), StepStatus::Done);
    assert_eq!(algorithm.filled(), 4);
}
