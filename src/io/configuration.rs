//! Runtime defaults for the command-line host

/// Default grid width in cells
pub const DEFAULT_WIDTH: usize = 256;

/// Default grid height in cells
pub const DEFAULT_HEIGHT: usize = 256;

// Safety limit: splat growth alone can request 50k frames
/// Default cap on frames driven per run
pub const DEFAULT_MAX_FRAMES: usize = 100_000;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 20;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
/// Blits skipped between captured GIF frames
pub const FRAME_CAPTURE_STRIDE: usize = 4;
/// Captured frame count at which the recorder halves its history
pub const MAX_CAPTURED_FRAMES: usize = 600;
