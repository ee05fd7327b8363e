//! Host-side input/output: CLI, image export and error handling

/// Command-line interface for batch image generation
pub mod cli;
/// Runtime defaults for the command-line host
pub mod configuration;
/// Error types for engine and host operations
pub mod error;
/// PNG export of the raster buffer
pub mod image;
/// Per-run progress display
pub mod progress;
/// Frame capture and GIF generation for growth animations
pub mod visualization;
