use crate::{
    capture::{device::VideoSource, still::CapturedStill},
    effects::filter::{FilterMode, apply_filter},
    foundation::error::{PhotoStripError, PhotoStripResult},
};

/// Take one still: mirrored snapshot at native resolution, filtered, PNG encoded.
///
/// Returns [`PhotoStripError::FrameNotReady`] when the source has not reported a usable size.
/// Callers treat that as "skip this tick", not as a captured slot.
pub fn capture_still(
    source: &mut dyn VideoSource,
    mode: FilterMode,
) -> PhotoStripResult<CapturedStill> {
    let (width, height) = source.native_size();
    if width == 0 || height == 0 {
        return Err(PhotoStripError::FrameNotReady { width, height });
    }

    let mut frame = source.read_frame()?;
    if frame.width != width || frame.height != height {
        tracing::debug!(
            reported_w = width,
            reported_h = height,
            frame_w = frame.width,
            frame_h = frame.height,
            "source size changed between query and read"
        );
    }

    frame.mirror_horizontal();
    apply_filter(&mut frame, mode);
    let still = CapturedStill::encode(frame)?;
    tracing::debug!(
        width = still.width(),
        height = still.height(),
        filter = %mode,
        bytes = still.bytes().len(),
        "captured still"
    );
    Ok(still)
}

#[cfg(test)]
#[path = "../../tests/unit/capture/frame.rs"]
mod tests;
