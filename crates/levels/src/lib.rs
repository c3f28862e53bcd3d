#![deny(unsafe_code)]
//! Level orchestration for the scrubgen pipeline.
//!
//! Maps a level index to world/floor/room coordinates, derives subsystem
//! seeds, runs the generation chain (noise grid, blue-noise hazard anchors,
//! regrowth warmup, solvability validation), and assembles an immutable
//! [`LevelDescriptor`] memoized in a coalescing cache.

pub mod cache;
pub mod catalog;
pub mod descriptor;
pub mod orchestrator;

pub use cache::CoalescingCache;
pub use descriptor::{LevelCoordinates, LevelDescriptor};
pub use orchestrator::LevelOrchestrator;
