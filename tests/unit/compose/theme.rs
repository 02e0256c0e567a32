use super::*;

#[test]
fn theme_colors_match_palette() {
    assert_eq!(ColorTheme::Lavender.background().to_hex(), "#b19cd9");
    assert_eq!(ColorTheme::Pink.background().to_hex(), "#ff6b9d");
    assert_eq!(ColorTheme::White.background().to_hex(), "#ffffff");
    assert_eq!(ColorTheme::Black.background().to_hex(), "#1a1a1a");
}

#[test]
fn date_is_light_only_on_black() {
    for theme in ColorTheme::ALL {
        let want = if theme == ColorTheme::Black {
            "#cccccc"
        } else {
            "#666666"
        };
        assert_eq!(theme.date_color().to_hex(), want, "{theme}");
    }
}

#[test]
fn overlays_cycle_by_index() {
    let cfg = StripConfig {
        overlay_assets: vec!["a.png".into(), "b.png".into(), "c.png".into()],
        ..StripConfig::default()
    };
    let picks: Vec<_> = (0..4).map(|i| cfg.overlay_for(i).unwrap()).collect();
    assert_eq!(picks, ["a.png", "b.png", "c.png", "a.png"]);

    let none = StripConfig {
        include_overlays: false,
        overlay_assets: vec![],
        ..StripConfig::default()
    };
    assert_eq!(none.overlay_for(0), None);
    assert!(none.validate().is_ok());
}

#[test]
fn overlays_enabled_without_assets_is_invalid() {
    let cfg = StripConfig {
        overlay_assets: vec![],
        ..StripConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(PhotoStripError::Validation(_))));
}

#[test]
fn partial_json_uses_defaults() {
    let cfg: StripConfig = serde_json::from_str(r#"{"theme":"black"}"#).unwrap();
    assert_eq!(cfg.theme, ColorTheme::Black);
    assert_eq!(cfg.layout, LayoutMode::Standard);
    assert!(cfg.include_overlays);
    assert_eq!(cfg.overlay_assets.len(), 4);
}
