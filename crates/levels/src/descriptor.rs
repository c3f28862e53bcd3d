//! The generated level artifact and the index-to-coordinates mapping.

use scrubgen_core::LevelSeed;
use serde::{Deserialize, Serialize};

/// Level index multiple that marks a key (boss) level.
pub const KEY_LEVEL_INTERVAL: u64 = 100;
/// Level index multiple that marks a story (narrative) level.
pub const STORY_LEVEL_INTERVAL: u64 = 500;

/// World/floor/room position of a level, all 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCoordinates {
    pub world: u32,
    pub floor: u32,
    pub room: u32,
}

impl LevelCoordinates {
    /// Maps a 1-based level index to coordinates.
    ///
    /// The world number is clamped to `[1, total_worlds]`: indices past the
    /// configured world count land in the last world rather than failing.
    /// Floor and room come from the level's position within its own world.
    pub fn for_level(
        level_index: u64,
        levels_per_world: u64,
        rooms_per_floor: u32,
        total_worlds: u32,
    ) -> Self {
        let world = (level_index - 1) / levels_per_world + 1;
        let world = world.clamp(1, u64::from(total_worlds)) as u32;
        let position = (level_index - 1) % levels_per_world;
        Self {
            world,
            floor: (position / u64::from(rooms_per_floor)) as u32 + 1,
            room: (position % u64::from(rooms_per_floor)) as u32 + 1,
        }
    }
}

/// The generated level artifact.
///
/// Created once per level index by the orchestrator and immutable after
/// that; consumers receive shared references out of the cache. The
/// `timer_seconds` here is the in-game countdown — it has nothing to do
/// with the validator's generation-time compute budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDescriptor {
    pub level_index: u64,
    pub coordinates: LevelCoordinates,
    pub seed: LevelSeed,
    /// Difficulty scale over the whole campaign, in [1, 10].
    pub difficulty_multiplier: f64,
    pub hazard_count: u32,
    /// Hazard type names drawn from the world's unlocked catalog.
    pub hazards: Vec<String>,
    /// Regrowth intensity per second for this level's automaton.
    pub regrowth_rate: f64,
    pub timer_seconds: f64,
    /// Greedy-validation outcome. `false` means "flag for review", not
    /// proven unsolvable.
    pub is_solvable: bool,
    /// Clean percentage the validator reached, in [0, 100].
    pub achieved_clean_percentage: f64,
    /// Rough count of distinct efficient clears; a heuristic, deterministic
    /// per seed.
    pub estimated_elegant_paths: u32,
    pub theme: String,
    pub is_key_level: bool,
    pub is_story_level: bool,
}
