use std::{cell::Cell, path::PathBuf};

use crate::foundation::{
    core::RawFrame,
    error::{PhotoStripError, PhotoStripResult},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Which camera to prefer.
pub enum Facing {
    /// Front-facing (selfie) camera.
    #[default]
    User,
    /// Rear camera.
    Environment,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Stream request sent to a [`CaptureDevice`]. Resolution values are preferences, not demands.
pub struct StreamConstraints {
    /// Preferred camera.
    pub facing: Facing,
    /// Preferred width in pixels.
    pub ideal_width: u32,
    /// Preferred height in pixels.
    pub ideal_height: u32,
}

impl Default for StreamConstraints {
    fn default() -> Self {
        Self {
            facing: Facing::User,
            ideal_width: 640,
            ideal_height: 480,
        }
    }
}

/// Boundary to the platform camera stack.
pub trait CaptureDevice {
    /// Request a live stream. Permission denial or a missing device must surface as
    /// [`PhotoStripError::DeviceUnavailable`].
    fn open(&mut self, constraints: &StreamConstraints) -> PhotoStripResult<Box<dyn VideoSource>>;
}

/// A granted live stream.
pub trait VideoSource {
    /// Native frame size. `(0, 0)` (or any zero side) means the stream is not ready yet.
    fn native_size(&self) -> (u32, u32);

    /// Current frame at native resolution, unmirrored, straight RGBA8.
    fn read_frame(&mut self) -> PhotoStripResult<RawFrame>;
}

/// A feed that always shows one color. Optionally reports "not ready" for the first
/// `warmup` size queries, like a camera that is still negotiating its format.
#[derive(Debug)]
pub struct SolidColorSource {
    width: u32,
    height: u32,
    rgba: [u8; 4],
    warmup: Cell<u32>,
}

impl SolidColorSource {
    /// Ready immediately.
    pub fn new(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self::with_warmup(width, height, rgba, 0)
    }

    /// Reports zero size for the first `warmup` queries.
    pub fn with_warmup(width: u32, height: u32, rgba: [u8; 4], warmup: u32) -> Self {
        Self {
            width,
            height,
            rgba,
            warmup: Cell::new(warmup),
        }
    }
}

impl VideoSource for SolidColorSource {
    fn native_size(&self) -> (u32, u32) {
        let left = self.warmup.get();
        if left > 0 {
            self.warmup.set(left - 1);
            return (0, 0);
        }
        (self.width, self.height)
    }

    fn read_frame(&mut self) -> PhotoStripResult<RawFrame> {
        RawFrame::solid(self.width, self.height, self.rgba)
    }
}

/// Replays a fixed list of frames in order, wrapping around at the end.
#[derive(Debug)]
pub struct ImageSequenceSource {
    frames: Vec<RawFrame>,
    next: usize,
}

impl ImageSequenceSource {
    /// Build from decoded frames. An empty list never becomes ready.
    pub fn new(frames: Vec<RawFrame>) -> Self {
        Self { frames, next: 0 }
    }
}

impl VideoSource for ImageSequenceSource {
    fn native_size(&self) -> (u32, u32) {
        self.frames
            .get(self.next)
            .map(|f| (f.width, f.height))
            .unwrap_or((0, 0))
    }

    fn read_frame(&mut self) -> PhotoStripResult<RawFrame> {
        let (width, height) = self.native_size();
        let frame = self
            .frames
            .get(self.next)
            .cloned()
            .ok_or(PhotoStripError::FrameNotReady { width, height })?;
        self.next = (self.next + 1) % self.frames.len();
        Ok(frame)
    }
}

/// A "camera" backed by image files on disk, used by the CLI and for scripted runs.
#[derive(Clone, Debug, Default)]
pub struct ImageSequenceDevice {
    paths: Vec<PathBuf>,
}

impl ImageSequenceDevice {
    /// Frames are replayed in the given order.
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

impl CaptureDevice for ImageSequenceDevice {
    fn open(&mut self, constraints: &StreamConstraints) -> PhotoStripResult<Box<dyn VideoSource>> {
        if self.paths.is_empty() {
            return Err(PhotoStripError::device_unavailable(
                "no capture frames configured",
            ));
        }
        let mut frames = Vec::with_capacity(self.paths.len());
        for path in &self.paths {
            let img = image::open(path).map_err(|e| {
                PhotoStripError::device_unavailable(format!(
                    "cannot read frame '{}': {e}",
                    path.display()
                ))
            })?;
            frames.push(RawFrame::from_rgba_image(img.to_rgba8()));
        }
        tracing::debug!(
            frames = frames.len(),
            ideal_width = constraints.ideal_width,
            ideal_height = constraints.ideal_height,
            "opened image sequence device"
        );
        Ok(Box::new(ImageSequenceSource::new(frames)))
    }
}
