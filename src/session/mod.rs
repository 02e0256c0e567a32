//! Four-shot capture runs.

/// Blocking driver and pacing seam.
pub mod driver;
/// Frozen session value.
pub mod record;
/// Capture state machine.
pub mod sequencer;
