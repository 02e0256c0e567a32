//! Per-pixel color filters.

/// Filter modes and pixel formulas.
pub mod filter;
