//! Decorative overlay assets.

/// Bytes to pixels.
pub mod decode;
/// Named asset stores.
pub mod store;
