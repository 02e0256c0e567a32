use std::{fmt, str::FromStr};

use crate::foundation::{
    core::RawFrame,
    error::{PhotoStripError, PhotoStripResult},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Cosmetic per-pixel color filter applied to every captured still.
///
/// Serialized names match the booth's filter buttons (`normal`, `bw`, `sepia`, `vintage`).
pub enum FilterMode {
    /// Leave pixels untouched.
    #[default]
    #[serde(rename = "normal", alias = "identity")]
    Identity,
    /// Rec.601 luma copied into all three channels.
    #[serde(rename = "bw", alias = "grayscale")]
    Grayscale,
    /// Classic sepia matrix.
    #[serde(rename = "sepia")]
    SepiaTone,
    /// Warm luma tint blended into the source pixel, then a mild contrast stretch.
    #[serde(rename = "vintage")]
    VintageBlend,
}

impl FilterMode {
    /// Every filter, in the order the booth presents them.
    pub const ALL: [FilterMode; 4] = [
        FilterMode::Identity,
        FilterMode::VintageBlend,
        FilterMode::Grayscale,
        FilterMode::SepiaTone,
    ];

    /// Stable short name.
    pub fn name(self) -> &'static str {
        match self {
            FilterMode::Identity => "normal",
            FilterMode::Grayscale => "bw",
            FilterMode::SepiaTone => "sepia",
            FilterMode::VintageBlend => "vintage",
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterMode {
    type Err = PhotoStripError;

    fn from_str(s: &str) -> PhotoStripResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" | "identity" | "none" => Ok(FilterMode::Identity),
            "bw" | "grayscale" | "greyscale" => Ok(FilterMode::Grayscale),
            "sepia" => Ok(FilterMode::SepiaTone),
            "vintage" => Ok(FilterMode::VintageBlend),
            other => Err(PhotoStripError::validation(format!(
                "unknown filter '{other}'"
            ))),
        }
    }
}

/// Apply `mode` to every pixel of `frame` in place. Alpha is never touched.
///
/// [`FilterMode::Identity`] returns immediately without visiting the buffer.
#[tracing::instrument(skip(frame), fields(width = frame.width, height = frame.height))]
pub fn apply_filter(frame: &mut RawFrame, mode: FilterMode) {
    if mode == FilterMode::Identity {
        return;
    }
    for px in frame.data.chunks_exact_mut(4) {
        let [r, g, b] = filter_pixel([px[0], px[1], px[2]], mode);
        px[0] = r;
        px[1] = g;
        px[2] = b;
    }
}

/// Transform one RGB triple.
///
/// Math runs in `f64`; each channel is clamped to `[0, 255]` and then rounded to the nearest
/// integer with exact halves going to even, the conversion an 8-bit clamped canvas buffer
/// applies when a channel is stored.
pub fn filter_pixel(rgb: [u8; 3], mode: FilterMode) -> [u8; 3] {
    let [r, g, b] = rgb.map(f64::from);
    match mode {
        FilterMode::Identity => rgb,
        FilterMode::Grayscale => {
            let y = to_u8(luma(r, g, b));
            [y, y, y]
        }
        FilterMode::SepiaTone => [
            to_u8(0.393 * r + 0.769 * g + 0.189 * b),
            to_u8(0.349 * r + 0.686 * g + 0.168 * b),
            to_u8(0.272 * r + 0.534 * g + 0.131 * b),
        ],
        FilterMode::VintageBlend => {
            let y = luma(r, g, b);
            let warm = [y * 1.1 + 20.0, y * 0.95 + 10.0, y * 0.8];
            let mut out = [0u8; 3];
            for (i, (orig, tint)) in [r, g, b].into_iter().zip(warm).enumerate() {
                let blended = orig * 0.7 + tint * 0.3;
                out[i] = to_u8(contrast(blended, 1.1));
            }
            out
        }
    }
}

/// Rec.601 luma.
pub fn luma(r: f64, g: f64, b: f64) -> f64 {
    0.299 * r + 0.587 * g + 0.114 * b
}

fn contrast(v: f64, factor: f64) -> f64 {
    (v - 128.0) * factor + 128.0
}

fn to_u8(v: f64) -> u8 {
    v.clamp(0.0, 255.0).round_ties_even() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/filter.rs"]
mod tests;
