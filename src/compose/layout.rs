use std::fmt;

use crate::{
    foundation::core::{Point, Rect},
    session::record::STILLS_PER_SESSION,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Sizing preset for the strip.
pub enum LayoutMode {
    /// 4:3 stills, desktop proportions.
    #[default]
    Standard,
    /// Square stills and tighter spacing ("phone mode").
    #[serde(alias = "phone")]
    Compact,
}

impl LayoutMode {
    /// Geometry for this mode.
    pub fn preset(self) -> LayoutPreset {
        match self {
            LayoutMode::Standard => LayoutPreset::STANDARD,
            LayoutMode::Compact => LayoutPreset::COMPACT,
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LayoutMode::Standard => "standard",
            LayoutMode::Compact => "compact",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Pixel geometry of a strip. All values in output pixels.
pub struct LayoutPreset {
    /// Width each still is stretched to.
    pub still_width: u32,
    /// Height each still is stretched to.
    pub still_height: u32,
    /// Outer padding on every side.
    pub padding: u32,
    /// Vertical gap between stills.
    pub gap: u32,
    /// Accent band above the first still.
    pub header: u32,
    /// Band below the last still holding the date.
    pub footer: u32,
    /// Overlay height; width follows the asset's aspect ratio.
    pub overlay_size: u32,
}

/// White frame drawn around each still, per side.
pub const BORDER_PX: u32 = 4;
/// How far an overlay hangs below its still's bottom edge.
pub const OVERLAY_DROP_PX: f64 = 10.0;
/// Distance from the canvas bottom to the date baseline.
pub const DATE_BASELINE_INSET_PX: f64 = 10.0;

impl LayoutPreset {
    /// Desktop preset.
    pub const STANDARD: LayoutPreset = LayoutPreset {
        still_width: 300,
        still_height: 225,
        padding: 30,
        gap: 20,
        header: 50,
        footer: 30,
        overlay_size: 80,
    };

    /// Phone preset.
    pub const COMPACT: LayoutPreset = LayoutPreset {
        still_width: 280,
        still_height: 280,
        padding: 25,
        gap: 15,
        header: 45,
        footer: 25,
        overlay_size: 70,
    };

    /// `(width, height)` of the output canvas.
    ///
    /// Height is `header + n*(still_height + gap) - gap + 2*padding + footer`.
    pub fn canvas_size(&self) -> (u32, u32) {
        let n = STILLS_PER_SESSION as u32;
        let width = self.still_width + 2 * self.padding;
        let stack = n * (self.still_height + self.gap) - self.gap;
        let height = self.header + stack + 2 * self.padding + self.footer;
        (width, height)
    }

    /// Destination rectangle of still `index`.
    pub fn still_rect(&self, index: usize) -> Rect {
        let x = f64::from(self.padding);
        let y = f64::from(self.header + self.padding)
            + (index as f64) * f64::from(self.still_height + self.gap);
        Rect::new(
            x,
            y,
            x + f64::from(self.still_width),
            y + f64::from(self.still_height),
        )
    }

    /// White frame behind still `index`.
    pub fn border_rect(&self, index: usize) -> Rect {
        self.still_rect(index).inflate(f64::from(BORDER_PX), f64::from(BORDER_PX))
    }

    /// Overlay rectangle for still `index` given the asset's width/height ratio.
    ///
    /// Even indices hang off the left edge (30% of the overlay outside the still), odd indices
    /// off the right edge (30% outside). The overlay bottom sits [`OVERLAY_DROP_PX`] below the
    /// still's bottom edge.
    pub fn overlay_rect(&self, index: usize, aspect: f64) -> Rect {
        let still = self.still_rect(index);
        let h = f64::from(self.overlay_size);
        let w = h * aspect;
        let x = if index % 2 == 0 {
            still.x0 - w * 0.3
        } else {
            still.x1 - w * 0.7
        };
        let y = still.y1 - h + OVERLAY_DROP_PX;
        Rect::new(x, y, x + w, y + h)
    }

    /// Horizontal center and baseline of the date stamp.
    pub fn date_anchor(&self) -> Point {
        let (w, h) = self.canvas_size();
        Point::new(f64::from(w) / 2.0, f64::from(h) - DATE_BASELINE_INSET_PX)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/layout.rs"]
mod tests;
