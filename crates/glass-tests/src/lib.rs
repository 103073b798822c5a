//! # glass-tests
//!
//! Cross-checks for glass preprocessing.
//!
//! This crate provides:
//! - lcms2-built versions of the built-in profiles and lcms2 transforms
//! - Deterministic RGB test patterns
//! - Hand-assembled EXIF blocks and temporary ICC files
//! - Per-channel code value comparison
//!
//! lcms2 is the reference: it builds the same matrix-shaper profiles from
//! the same primaries, and its transforms are compared against the pixels
//! glass produces through moxcms.

pub mod accuracy;
pub mod fixtures;
pub mod patterns;
pub mod reference;

pub use accuracy::{CodeDiffStats, compare_rgb_buffers};
