//! Booth-level configuration and command handling.

/// JSON configuration.
pub mod config;
/// Command surface tying capture, composition and export together.
pub mod controller;
