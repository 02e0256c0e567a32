use std::sync::Arc;

use crate::{
    encode::png::{decode_rgba, encode_png, to_data_url},
    foundation::{core::RawFrame, error::PhotoStripResult},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Declared format of a still's byte payload.
pub enum StillFormat {
    /// Lossless PNG.
    Png,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One filtered, encoded frame from the live feed. Immutable once created.
pub struct CapturedStill {
    width: u32,
    height: u32,
    format: StillFormat,
    bytes: Arc<[u8]>,
}

impl CapturedStill {
    /// Encode a filtered frame.
    pub fn encode(frame: RawFrame) -> PhotoStripResult<Self> {
        let img = frame.into_rgba_image()?;
        let bytes = encode_png(&img)?;
        Ok(Self {
            width: img.width(),
            height: img.height(),
            format: StillFormat::Png,
            bytes: Arc::from(bytes),
        })
    }

    /// Wrap an already-encoded PNG payload, reading its dimensions.
    pub fn from_png(bytes: Vec<u8>) -> PhotoStripResult<Self> {
        let img = decode_rgba(&bytes)?;
        Ok(Self {
            width: img.width(),
            height: img.height(),
            format: StillFormat::Png,
            bytes: Arc::from(bytes),
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Payload format.
    pub fn format(&self) -> StillFormat {
        self.format
    }

    /// Encoded payload.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Decode back to straight RGBA8.
    pub fn decode(&self) -> PhotoStripResult<image::RgbaImage> {
        decode_rgba(&self.bytes)
    }

    /// Data URL for display in a web view.
    pub fn to_data_url(&self) -> String {
        to_data_url(&self.bytes)
    }
}
