#![deny(unsafe_code)]
//! Core types for the scrubgen procedural level pipeline.
//!
//! Provides the `HazardGrid` scalar grid, the `Xorshift64` PRNG,
//! `LevelSeed` derivation, the `GenConfig` tunable table with its
//! documented defaults, `GenError`, and typed JSON parameter helpers.

pub mod config;
pub mod error;
pub mod grid;
pub mod params;
pub mod prng;
pub mod seed;

pub use config::GenConfig;
pub use error::GenError;
pub use grid::{HazardGrid, CLEAN_INTENSITY_THRESHOLD};
pub use prng::Xorshift64;
pub use seed::LevelSeed;
