//! Shared value types and the crate error.

/// Frames, colors and geometry.
pub mod core;
/// Error taxonomy.
pub mod error;
