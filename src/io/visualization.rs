//! Frame capture and GIF generation for growth animations
//!
//! The recorder is a [`RasterSurface`]: it samples every Nth blit into an
//! owned frame list, halving its history and doubling the stride when the
//! list grows too large, so long runs stay within a bounded frame budget
//! while still covering the whole animation evenly.

use crate::io::configuration::{MAX_CAPTURED_FRAMES, VIEWER_MIN_FRAME_DELAY_MS};
use crate::io::error::EngineError;
use crate::io::image::render_raster;
use crate::raster::buffer::RasterBuffer;
use crate::raster::surface::RasterSurface;
use image::{Delay, Frame, RgbaImage};

/// Captures blitted frames for later GIF export
pub struct FrameRecorder {
    frames: Vec<RgbaImage>,
    stride: usize,
    blits: usize,
}

impl FrameRecorder {
    /// Capture every `stride`-th blit; a stride of zero captures every blit
    pub fn new(stride: usize) -> Self {
        Self {
            frames: Vec::new(),
            stride: stride.max(1),
            blits: 0,
        }
    }

    /// Number of frames currently held
    pub const fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Capture the buffer unconditionally
    ///
    /// Hosts call this once after a run completes so the final state is
    /// always part of the animation regardless of the stride.
    pub fn capture_now(&mut self, raster: &RasterBuffer) {
        self.frames.push(render_raster(raster));
        self.compact_if_needed();
    }

    fn compact_if_needed(&mut self) {
        if self.frames.len() < MAX_CAPTURED_FRAMES {
            return;
        }
        let mut keep = false;
        self.frames.retain(|_| {
            keep = !keep;
            keep
        });
        self.stride *= 2;
    }

    /// Export the captured frames as a GIF with automatic frame skipping
    ///
    /// Skips frames when the requested delay is below what viewers
    /// reliably support, keeping the apparent animation speed. The final
    /// frame is repeated with a longer delay for visibility.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &str, frame_delay_ms: u32) -> crate::io::error::Result<()> {
        if self.frames.is_empty() {
            return Err(EngineError::NoFramesCaptured);
        }

        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms.max(1)) as usize
        } else {
            1
        };

        let delay = Delay::from_numer_denom_ms(effective_delay_ms, 1);
        let mut frames: Vec<Frame> = self
            .frames
            .iter()
            .step_by(skip_factor)
            .map(|img| Frame::from_parts(img.clone(), 0, 0, delay))
            .collect();

        // Final frame displays longer for better visibility
        if let Some(last) = self.frames.last() {
            frames.push(Frame::from_parts(
                last.clone(),
                0,
                0,
                Delay::from_numer_denom_ms(effective_delay_ms * 25, 1),
            ));
        }

        if let Some(parent) = std::path::Path::new(output_path).parent() {
            std::fs::create_dir_all(parent).map_err(|e| EngineError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| EngineError::FileSystem {
            path: output_path.into(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| EngineError::ImageExport {
                path: output_path.into(),
                source: e,
            })?;

        Ok(())
    }
}

impl RasterSurface for FrameRecorder {
    fn blit(&mut self, raster: &RasterBuffer) {
        self.blits += 1;
        if self.blits % self.stride == 0 {
            self.frames.push(render_raster(raster));
            self.compact_if_needed();
        }
    }
}
