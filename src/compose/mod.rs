//! Strip composition: geometry, themes, pixel ops and the compositor itself.

/// Layout presets and per-still geometry.
pub mod layout;
/// Straight-alpha raster helpers.
pub mod raster;
/// Strip compositor and its output.
pub mod strip;
/// Date stamp formatting and text rasterization.
pub mod text;
/// Color themes and composition settings.
pub mod theme;
