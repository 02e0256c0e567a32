use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::atomic::{AtomicUsize, Ordering},
};

use rayon::prelude::*;

use crate::{
    assets::decode as assets_decode,
    foundation::error::{PhotoStripError, PhotoStripResult},
};

/// Overlay characters shipped with the booth, in strip order.
pub const DEFAULT_OVERLAY_ASSETS: [&str; 4] = ["teddy.png", "julie.png", "ckeo.png", "jade.png"];

/// Widest (and, inverted, tallest) width-over-height ratio accepted for an overlay.
pub const MAX_OVERLAY_ASPECT: f64 = 16.0;

#[derive(Clone, Debug)]
/// Decoded decorative overlay image (straight RGBA8). Read-only once loaded.
pub struct DecorativeAsset {
    /// Logical name the asset was loaded by.
    pub name: String,
    /// Pixel data.
    pub image: image::RgbaImage,
}

impl DecorativeAsset {
    /// Width over height.
    pub fn aspect(&self) -> f64 {
        f64::from(self.image.width()) / f64::from(self.image.height())
    }

    /// Reject empty images and aspect ratios outside
    /// `[1 / MAX_OVERLAY_ASPECT, MAX_OVERLAY_ASPECT]`.
    pub fn check_shape(&self) -> PhotoStripResult<()> {
        let (w, h) = self.image.dimensions();
        if w == 0 || h == 0 {
            return Err(PhotoStripError::asset_load(&self.name, "image has zero size"));
        }
        let aspect = self.aspect();
        if !(1.0 / MAX_OVERLAY_ASPECT..=MAX_OVERLAY_ASPECT).contains(&aspect) {
            return Err(PhotoStripError::asset_load(
                &self.name,
                format!("{w}x{h} exceeds the overlay aspect limit of {MAX_OVERLAY_ASPECT}:1"),
            ));
        }
        Ok(())
    }
}

/// Named image resources, loaded on demand.
///
/// Implementations must be shareable across threads: overlay loads for one strip are issued
/// concurrently.
pub trait AssetStore: Sync {
    /// Load `name`. Any failure is reported as [`PhotoStripError::AssetLoad`].
    fn load(&self, name: &str) -> PhotoStripResult<DecorativeAsset>;
}

/// Load every name concurrently. Fails if any single load fails or yields an image whose
/// shape fails [`DecorativeAsset::check_shape`]; results keep input order.
pub fn load_all(
    store: &dyn AssetStore,
    names: &[String],
) -> PhotoStripResult<Vec<DecorativeAsset>> {
    names
        .par_iter()
        .map(|name| {
            let asset = store.load(name)?;
            asset.check_shape()?;
            Ok(asset)
        })
        .collect()
}

#[derive(Clone, Debug)]
/// Asset store rooted at a directory on disk.
pub struct FsAssetStore {
    root: PathBuf,
}

impl FsAssetStore {
    /// Resolve names relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Return root directory used when resolving relative asset names.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetStore for FsAssetStore {
    fn load(&self, name: &str) -> PhotoStripResult<DecorativeAsset> {
        let norm = normalize_rel_path(name).map_err(|e| PhotoStripError::asset_load(name, e))?;
        let path = self.root.join(Path::new(&norm));
        let bytes = std::fs::read(&path).map_err(|e| {
            PhotoStripError::asset_load(name, format!("read '{}': {e}", path.display()))
        })?;
        let asset = assets_decode::decode_image(name, &bytes).map_err(|e| match e {
            PhotoStripError::AssetLoad { .. } => e,
            other => PhotoStripError::asset_load(name, other),
        })?;
        tracing::debug!(
            name,
            width = asset.image.width(),
            height = asset.image.height(),
            "loaded decorative asset"
        );
        Ok(asset)
    }
}

/// In-memory asset store. Counts loads so callers can verify when assets are touched.
#[derive(Debug, Default)]
pub struct MemoryAssetStore {
    images: HashMap<String, image::RgbaImage>,
    loads: AtomicUsize,
}

impl MemoryAssetStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) `name`.
    pub fn insert(&mut self, name: impl Into<String>, image: image::RgbaImage) {
        self.images.insert(name.into(), image);
    }

    /// Number of `load` calls so far, successful or not.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl AssetStore for MemoryAssetStore {
    fn load(&self, name: &str) -> PhotoStripResult<DecorativeAsset> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let image = self
            .images
            .get(name)
            .cloned()
            .ok_or_else(|| PhotoStripError::asset_load(name, "not found"))?;
        if image.width() == 0 || image.height() == 0 {
            return Err(PhotoStripError::asset_load(name, "image has zero size"));
        }
        Ok(DecorativeAsset {
            name: name.to_string(),
            image,
        })
    }
}

/// Normalize and validate store-relative asset names.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> PhotoStripResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(PhotoStripError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(PhotoStripError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(PhotoStripError::validation(
                "asset paths must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(PhotoStripError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
