use crate::foundation::error::{PhotoStripError, PhotoStripResult};

pub use kurbo::{Point, Rect, Size};

/// A mutable width x height grid of straight (non-premultiplied) RGBA8 samples.
///
/// Row-major and tightly packed. A frame is owned by exactly one pipeline stage at a time:
/// capture hands it to the filter, the filter hands it to the encoder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawFrame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes, `width * height * 4` long.
    pub data: Vec<u8>,
}

impl RawFrame {
    /// Wrap an RGBA8 buffer, checking that its length matches the dimensions.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> PhotoStripResult<Self> {
        let expected = expected_len(width, height)?;
        if data.len() != expected {
            return Err(PhotoStripError::validation(format!(
                "RawFrame {width}x{height} expects {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A frame where every pixel is `rgba`.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> PhotoStripResult<Self> {
        let n = expected_len(width, height)? / 4;
        Ok(Self {
            width,
            height,
            data: rgba.repeat(n),
        })
    }

    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Flip the frame left-to-right in place.
    pub fn mirror_horizontal(&mut self) {
        let row_len = (self.width as usize) * 4;
        if row_len == 0 {
            return;
        }
        for row in self.data.chunks_exact_mut(row_len) {
            let w = row_len / 4;
            for x in 0..w / 2 {
                let (l, r) = (x * 4, (w - 1 - x) * 4);
                for c in 0..4 {
                    row.swap(l + c, r + c);
                }
            }
        }
    }

    /// Convert into an `image` buffer without copying.
    pub fn into_rgba_image(self) -> PhotoStripResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data)
            .ok_or_else(|| PhotoStripError::validation("RawFrame buffer does not match dimensions"))
    }

    /// Take ownership of an `image` buffer.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }
}

fn expected_len(width: u32, height: u32) -> PhotoStripResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| PhotoStripError::validation("frame buffer size overflow"))
}

/// Opaque 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Construct from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn from_hex(s: &str) -> PhotoStripResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(PhotoStripError::validation(format!(
                "color '{s}' must be #rrggbb"
            )));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| PhotoStripError::validation(format!("color '{s}': {e}")))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// `#rrggbb` form, as used in SVG fills.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Fully opaque RGBA pixel.
    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, 255])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
