use std::{
    io::Cursor,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use base64::Engine as _;

use crate::foundation::error::{PhotoStripError, PhotoStripResult};

/// File name prefix for downloaded strips.
pub const EXPORT_PREFIX: &str = "photobooth";

/// Encode an RGBA8 raster as PNG (lossless).
pub fn encode_png(img: &image::RgbaImage) -> PhotoStripResult<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| {
            PhotoStripError::encode(format!(
                "png encode {}x{}: {e}",
                img.width(),
                img.height()
            ))
        })?;
    Ok(buf)
}

/// Decode PNG (or any format the `image` crate recognizes) into straight RGBA8.
pub fn decode_rgba(bytes: &[u8]) -> PhotoStripResult<image::RgbaImage> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| PhotoStripError::encode(format!("decode image: {e}")))?;
    Ok(img.to_rgba8())
}

/// `data:image/png;base64,...` form for handing a payload to a browser-style UI layer.
pub fn to_data_url(png: &[u8]) -> String {
    let b64 = base64::engine::general_purpose::STANDARD.encode(png);
    format!("data:image/png;base64,{b64}")
}

/// Collision-resistant download name: `photobooth-<unix millis>.png`.
pub fn export_file_name(now: chrono::DateTime<chrono::Utc>) -> String {
    format!("{EXPORT_PREFIX}-{}.png", now.timestamp_millis())
}

/// Write `png` into `dir` under [`export_file_name`] and return the full path.
pub fn write_export(
    png: &[u8],
    dir: &Path,
    now: chrono::DateTime<chrono::Utc>,
) -> PhotoStripResult<PathBuf> {
    let path = dir.join(export_file_name(now));
    ensure_parent_dir(&path)?;
    std::fs::write(&path, png).with_context(|| format!("write png '{}'", path.display()))?;
    tracing::info!(path = %path.display(), bytes = png.len(), "exported strip");
    Ok(path)
}

/// Create `path`'s parent directory if it does not exist.
pub fn ensure_parent_dir(path: &Path) -> PhotoStripResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
