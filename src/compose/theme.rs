use std::fmt;

use crate::{
    assets::store::DEFAULT_OVERLAY_ASSETS,
    compose::layout::LayoutMode,
    foundation::{
        core::Rgb8,
        error::{PhotoStripError, PhotoStripResult},
    },
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Strip background color. Also used by the UI as the camera border accent.
pub enum ColorTheme {
    /// `#b19cd9`
    #[default]
    Lavender,
    /// `#ff6b9d`
    Pink,
    /// `#ffffff`
    White,
    /// `#1a1a1a`
    Black,
}

impl ColorTheme {
    /// Every theme, in picker order.
    pub const ALL: [ColorTheme; 4] = [
        ColorTheme::Lavender,
        ColorTheme::Pink,
        ColorTheme::White,
        ColorTheme::Black,
    ];

    /// Canvas fill color.
    pub fn background(self) -> Rgb8 {
        match self {
            ColorTheme::Lavender => Rgb8::new(0xb1, 0x9c, 0xd9),
            ColorTheme::Pink => Rgb8::new(0xff, 0x6b, 0x9d),
            ColorTheme::White => Rgb8::new(0xff, 0xff, 0xff),
            ColorTheme::Black => Rgb8::new(0x1a, 0x1a, 0x1a),
        }
    }

    /// Date stamp color with enough contrast against [`ColorTheme::background`].
    pub fn date_color(self) -> Rgb8 {
        match self {
            ColorTheme::Black => Rgb8::new(0xcc, 0xcc, 0xcc),
            _ => Rgb8::new(0x66, 0x66, 0x66),
        }
    }
}

impl fmt::Display for ColorTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColorTheme::Lavender => "lavender",
            ColorTheme::Pink => "pink",
            ColorTheme::White => "white",
            ColorTheme::Black => "black",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Composition settings, snapshotted when a strip is composed.
pub struct StripConfig {
    /// Background theme.
    pub theme: ColorTheme,
    /// Sizing preset.
    pub layout: LayoutMode,
    /// Draw character overlays on the stills.
    pub include_overlays: bool,
    /// Overlay asset names, assigned to stills cyclically by index.
    pub overlay_assets: Vec<String>,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            theme: ColorTheme::default(),
            layout: LayoutMode::default(),
            include_overlays: true,
            overlay_assets: DEFAULT_OVERLAY_ASSETS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl StripConfig {
    /// Reject overlay settings that cannot be satisfied.
    pub fn validate(&self) -> PhotoStripResult<()> {
        if self.include_overlays && self.overlay_assets.is_empty() {
            return Err(PhotoStripError::validation(
                "include_overlays requires at least one overlay asset",
            ));
        }
        if self.overlay_assets.iter().any(|n| n.trim().is_empty()) {
            return Err(PhotoStripError::validation(
                "overlay asset names must be non-empty",
            ));
        }
        Ok(())
    }

    /// Asset name for still `index` (`index mod len`), or `None` when there are no assets.
    pub fn overlay_for(&self, index: usize) -> Option<&str> {
        if self.overlay_assets.is_empty() {
            return None;
        }
        Some(self.overlay_assets[index % self.overlay_assets.len()].as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/theme.rs"]
mod tests;
