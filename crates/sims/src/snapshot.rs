//! PNG output of a [`Raster`].
//!
//! Feature-gated behind `png` (default on) so WASM builds can depend on this
//! crate without pulling in the `image` crate.

use fieldlab_core::error::LabError;
use std::path::Path;

use crate::raster::Raster;

/// Writes a raster as a PNG image.
///
/// Returns `LabError::Io` on write failure.
pub fn write_png(raster: &Raster, path: &Path) -> Result<(), LabError> {
    let img = image::RgbaImage::from_raw(raster.width(), raster.height(), raster.data().to_vec())
        .ok_or_else(|| LabError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| LabError::Io(e.to_string()))?;
    log::info!("wrote {}x{} PNG to {}", raster.width(), raster.height(), path.display());
    Ok(())
}
