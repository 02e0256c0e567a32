use anyhow::Context;

use crate::{PhotoStripResult, assets::store::DecorativeAsset};

/// Decode encoded image bytes into a straight-alpha RGBA8 decorative asset.
pub fn decode_image(name: &str, bytes: &[u8]) -> PhotoStripResult<DecorativeAsset> {
    let dyn_img = image::load_from_memory(bytes)
        .with_context(|| format!("decode image '{name}' from memory"))?;
    let image = dyn_img.to_rgba8();
    if image.width() == 0 || image.height() == 0 {
        return Err(crate::PhotoStripError::asset_load(name, "image has zero size"));
    }
    Ok(DecorativeAsset {
        name: name.to_string(),
        image,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
