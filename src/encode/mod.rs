//! Lossless export of stills and strips.

/// PNG encoding, data URLs and download naming.
pub mod png;
