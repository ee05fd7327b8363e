//! PNG export of the raster buffer

use crate::io::error::EngineError;
use crate::raster::buffer::RasterBuffer;
use image::{ImageBuffer, Rgba};

/// Render the buffer into an owned RGBA image
pub fn render_raster(raster: &RasterBuffer) -> ImageBuffer<Rgba<u8>, Vec<u8>> {
    let mut img = ImageBuffer::new(raster.width() as u32, raster.height() as u32);
    for ([x, y], color) in raster.cells() {
        img.put_pixel(x as u32, y as u32, Rgba(color.channels()));
    }
    img
}

/// Export the raster buffer as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_raster_as_png(
    raster: &RasterBuffer,
    output_path: &str,
) -> crate::io::error::Result<()> {
    let img = render_raster(raster);

    if let Some(parent) = std::path::Path::new(output_path).parent() {
        std::fs::create_dir_all(parent).map_err(|e| EngineError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path).map_err(|e| EngineError::ImageExport {
        path: output_path.into(),
        source: e,
    })?;

    Ok(())
}
