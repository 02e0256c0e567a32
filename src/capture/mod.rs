//! Camera boundary and single-still capture.

/// Capture device and live source traits, plus built-in sources.
pub mod device;
/// Mirror, filter and encode one frame.
pub mod frame;
/// Encoded still payloads.
pub mod still;
