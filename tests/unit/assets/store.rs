use super::*;

fn tiny(w: u32, h: u32) -> image::RgbaImage {
    image::RgbaImage::from_pixel(w, h, image::Rgba([1, 2, 3, 255]))
}

#[test]
fn normalize_rel_path_rules() {
    assert_eq!(normalize_rel_path("a/./b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("/etc/passwd").is_err());
    assert!(normalize_rel_path("../x.png").is_err());
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("./").is_err());
}

#[test]
fn memory_store_counts_loads_and_reports_missing() {
    let mut store = MemoryAssetStore::new();
    store.insert("teddy.png", tiny(4, 8));
    assert_eq!(store.load_count(), 0);

    let a = store.load("teddy.png").unwrap();
    assert_eq!(a.image.dimensions(), (4, 8));
    assert!((a.aspect() - 0.5).abs() < 1e-12);

    let err = store.load("julie.png").unwrap_err();
    assert!(matches!(err, PhotoStripError::AssetLoad { ref name, .. } if name == "julie.png"));
    assert_eq!(store.load_count(), 2);
}

#[test]
fn load_all_keeps_order_and_fails_on_any_missing() {
    let mut store = MemoryAssetStore::new();
    store.insert("a", tiny(1, 1));
    store.insert("b", tiny(2, 1));

    let names = vec!["b".to_string(), "a".to_string()];
    let loaded = load_all(&store, &names).unwrap();
    assert_eq!(loaded[0].name, "b");
    assert_eq!(loaded[1].name, "a");

    let names = vec!["a".to_string(), "missing".to_string()];
    assert!(matches!(
        load_all(&store, &names),
        Err(PhotoStripError::AssetLoad { .. })
    ));
}

#[test]
fn fs_store_reads_and_maps_failures_to_asset_load() {
    let tmp = tempfile::tempdir().unwrap();
    tiny(3, 5).save(tmp.path().join("teddy.png")).unwrap();
    std::fs::write(tmp.path().join("broken.png"), b"nope").unwrap();

    let store = FsAssetStore::new(tmp.path());
    assert_eq!(store.root(), tmp.path());
    assert_eq!(store.load("teddy.png").unwrap().image.dimensions(), (3, 5));

    for name in ["missing.png", "broken.png", "../escape.png"] {
        let err = store.load(name).unwrap_err();
        assert!(
            matches!(err, PhotoStripError::AssetLoad { name: ref n, .. } if n == name),
            "{name}: {err}"
        );
    }
}

#[test]
fn default_overlays_are_the_four_characters() {
    assert_eq!(
        DEFAULT_OVERLAY_ASSETS,
        ["teddy.png", "julie.png", "ckeo.png", "jade.png"]
    );
}

struct ShapeStore;

impl AssetStore for ShapeStore {
    fn load(&self, name: &str) -> PhotoStripResult<DecorativeAsset> {
        let (w, h) = match name {
            "ribbon" => (100_000, 1),
            "pole" => (1, 100_000),
            "wide" => (160, 10),
            _ => (4, 4),
        };
        Ok(DecorativeAsset {
            name: name.to_string(),
            image: tiny(w, h),
        })
    }
}

#[test]
fn load_all_rejects_extreme_aspect_ratios_from_any_store() {
    for name in ["ribbon", "pole"] {
        let names = vec!["ok".to_string(), name.to_string()];
        let err = load_all(&ShapeStore, &names).unwrap_err();
        assert!(
            matches!(err, PhotoStripError::AssetLoad { name: ref n, .. } if n == name),
            "{name}: {err}"
        );
    }

    let names = vec!["wide".to_string(), "ok".to_string()];
    let loaded = load_all(&ShapeStore, &names).unwrap();
    assert!((loaded[0].aspect() - MAX_OVERLAY_ASPECT).abs() < 1e-12);
}
