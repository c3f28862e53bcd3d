//! Tunable generation parameters with a documented default table.
//!
//! `GenConfig` is a plain value type: loaded once at process start (from a
//! JSON object, usually read from a file) and passed by reference into the
//! orchestrator's constructor. There is no lazy global config lookup.
//! Every scalar has a hardcoded default, so a missing key never fails
//! generation; `from_json` overlays whatever keys are present.

use crate::params::{param_f64, param_string_list, param_string_table, param_u32, param_usize};
use crate::GenError;
use serde_json::Value;

/// Default grid side length for a generation session.
pub const DEFAULT_GRID_SIZE: usize = 64;
/// Default floors per world.
pub const DEFAULT_FLOORS_PER_WORLD: u32 = 100;
/// Default rooms (levels) per floor.
pub const DEFAULT_ROOMS_PER_FLOOR: u32 = 10;
/// Default number of configured worlds.
pub const DEFAULT_TOTAL_WORLDS: u32 = 10;
/// Default in-game timer for world 1, seconds.
pub const DEFAULT_STARTING_TIMER: f64 = 120.0;
/// Default in-game timer for the last world, seconds.
pub const DEFAULT_ENDING_TIMER: f64 = 300.0;
/// Default hazard count floor (world 1, ground floor).
pub const DEFAULT_STARTING_HAZARD_COUNT: u32 = 3;
/// Default hazard count ceiling.
pub const DEFAULT_ENDING_HAZARD_COUNT: u32 = 12;
/// Default hazard-count increment per world.
pub const DEFAULT_HAZARD_WORLD_STEP: u32 = 1;
/// Default fractional hazard-count increment per floor.
pub const DEFAULT_HAZARD_FLOOR_STEP: f64 = 0.02;
/// Default minimum pairwise distance between hazard anchors, in cells.
pub const DEFAULT_MIN_HAZARD_DISTANCE: f64 = 6.0;
/// Default candidate attempts per active point in the blue-noise sampler.
pub const DEFAULT_POISSON_ATTEMPTS: u32 = 30;
/// Default active-neighbor count a cell must exceed to regrow.
pub const DEFAULT_NEIGHBOR_THRESHOLD: u32 = 4;
/// Default regrowth rate, intensity per second, world 1.
pub const DEFAULT_REGENERATION_RATE: f64 = 0.08;
/// Default regrowth-rate increment per world.
pub const DEFAULT_REGEN_WORLD_RATE_STEP: f64 = 0.01;
/// Default global clean percentage at which regrowth stops.
pub const DEFAULT_REGEN_STOP_THRESHOLD: f64 = 85.0;
/// Default automaton steps run to settle a level's initial state.
pub const DEFAULT_REGROWTH_WARMUP_STEPS: u32 = 4;
/// Default fractal noise octave count.
pub const DEFAULT_PERLIN_OCTAVES: u32 = 4;
/// Default base noise frequency in cycles per cell.
pub const DEFAULT_PERLIN_FREQUENCY: f64 = 0.05;
/// Default per-octave amplitude falloff.
pub const DEFAULT_PERLIN_PERSISTENCE: f64 = 0.5;
/// Default per-octave frequency multiplier.
pub const DEFAULT_PERLIN_LACUNARITY: f64 = 2.0;
/// Default clean percentage the validator must reach.
pub const DEFAULT_MIN_SOLVABILITY_PERCENT: f64 = 80.0;
/// Default cap on validator clearing actions.
pub const DEFAULT_MAX_VALIDATION_ATTEMPTS: u32 = 64;
/// Default validator wall-clock budget, milliseconds. Unrelated to the
/// in-game timer carried on the descriptor.
pub const DEFAULT_VALIDATION_BUDGET_MS: u64 = 50;
/// Default clearing radius the validator simulates, in cells.
pub const DEFAULT_CLEAR_RADIUS: f64 = 5.0;

/// Fallback theme for worlds past the configured list.
pub const FALLBACK_THEME: &str = "Utility Closet";

const DEFAULT_WORLD_THEMES: &[&str] = &[
    "Kitchen",
    "Bathroom",
    "Garage",
    "Garden",
    "Workshop",
    "Rooftop",
    "Basement",
    "Attic",
    "Greenhouse",
    "Penthouse",
];

/// Hazard types newly unlocked per world; a world's pool is the union of
/// all entries up to and including its own.
const DEFAULT_HAZARD_CATALOG: &[&[&str]] = &[
    &["grease", "dust"],
    &["mold"],
    &["rust"],
    &["slime"],
    &["soot"],
    &["limescale"],
    &["tar"],
    &["graffiti"],
    &["ash"],
    &["ectoplasm"],
];

/// All tunables consumed by the generation pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct GenConfig {
    pub grid_size: usize,
    pub floors_per_world: u32,
    pub rooms_per_floor: u32,
    pub total_worlds: u32,
    pub starting_timer: f64,
    pub ending_timer: f64,
    pub starting_hazard_count: u32,
    pub ending_hazard_count: u32,
    pub hazard_world_step: u32,
    pub hazard_floor_step: f64,
    pub min_hazard_distance: f64,
    pub poisson_attempts: u32,
    pub neighbor_threshold: u32,
    pub regeneration_rate: f64,
    pub regen_world_rate_step: f64,
    pub regen_stop_threshold: f64,
    pub regrowth_warmup_steps: u32,
    pub perlin_octaves: u32,
    pub perlin_frequency: f64,
    pub perlin_persistence: f64,
    pub perlin_lacunarity: f64,
    pub min_solvability_percent: f64,
    pub max_validation_attempts: u32,
    pub validation_budget_ms: u64,
    pub clear_radius: f64,
    /// Theme name per world, in world order.
    pub world_themes: Vec<String>,
    /// Hazard types newly unlocked per world, in world order.
    pub hazard_catalog: Vec<Vec<String>>,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            floors_per_world: DEFAULT_FLOORS_PER_WORLD,
            rooms_per_floor: DEFAULT_ROOMS_PER_FLOOR,
            total_worlds: DEFAULT_TOTAL_WORLDS,
            starting_timer: DEFAULT_STARTING_TIMER,
            ending_timer: DEFAULT_ENDING_TIMER,
            starting_hazard_count: DEFAULT_STARTING_HAZARD_COUNT,
            ending_hazard_count: DEFAULT_ENDING_HAZARD_COUNT,
            hazard_world_step: DEFAULT_HAZARD_WORLD_STEP,
            hazard_floor_step: DEFAULT_HAZARD_FLOOR_STEP,
            min_hazard_distance: DEFAULT_MIN_HAZARD_DISTANCE,
            poisson_attempts: DEFAULT_POISSON_ATTEMPTS,
            neighbor_threshold: DEFAULT_NEIGHBOR_THRESHOLD,
            regeneration_rate: DEFAULT_REGENERATION_RATE,
            regen_world_rate_step: DEFAULT_REGEN_WORLD_RATE_STEP,
            regen_stop_threshold: DEFAULT_REGEN_STOP_THRESHOLD,
            regrowth_warmup_steps: DEFAULT_REGROWTH_WARMUP_STEPS,
            perlin_octaves: DEFAULT_PERLIN_OCTAVES,
            perlin_frequency: DEFAULT_PERLIN_FREQUENCY,
            perlin_persistence: DEFAULT_PERLIN_PERSISTENCE,
            perlin_lacunarity: DEFAULT_PERLIN_LACUNARITY,
            min_solvability_percent: DEFAULT_MIN_SOLVABILITY_PERCENT,
            max_validation_attempts: DEFAULT_MAX_VALIDATION_ATTEMPTS,
            validation_budget_ms: DEFAULT_VALIDATION_BUDGET_MS,
            clear_radius: DEFAULT_CLEAR_RADIUS,
            world_themes: DEFAULT_WORLD_THEMES.iter().map(|s| (*s).to_owned()).collect(),
            hazard_catalog: DEFAULT_HAZARD_CATALOG
                .iter()
                .map(|row| row.iter().map(|s| (*s).to_owned()).collect())
                .collect(),
        }
    }
}

impl GenConfig {
    /// Builds a config from a JSON object, falling back to the default for
    /// every missing or wrong-typed key.
    pub fn from_json(obj: &Value) -> Self {
        Self {
            grid_size: param_usize(obj, "grid_size", DEFAULT_GRID_SIZE),
            floors_per_world: param_u32(obj, "floors_per_world", DEFAULT_FLOORS_PER_WORLD),
            rooms_per_floor: param_u32(obj, "rooms_per_floor", DEFAULT_ROOMS_PER_FLOOR),
            total_worlds: param_u32(obj, "total_worlds", DEFAULT_TOTAL_WORLDS),
            starting_timer: param_f64(obj, "starting_timer", DEFAULT_STARTING_TIMER),
            ending_timer: param_f64(obj, "ending_timer", DEFAULT_ENDING_TIMER),
            starting_hazard_count: param_u32(
                obj,
                "starting_hazard_count",
                DEFAULT_STARTING_HAZARD_COUNT,
            ),
            ending_hazard_count: param_u32(obj, "ending_hazard_count", DEFAULT_ENDING_HAZARD_COUNT),
            hazard_world_step: param_u32(obj, "hazard_world_step", DEFAULT_HAZARD_WORLD_STEP),
            hazard_floor_step: param_f64(obj, "hazard_floor_step", DEFAULT_HAZARD_FLOOR_STEP),
            min_hazard_distance: param_f64(obj, "min_hazard_distance", DEFAULT_MIN_HAZARD_DISTANCE),
            poisson_attempts: param_u32(obj, "poisson_attempts", DEFAULT_POISSON_ATTEMPTS),
            neighbor_threshold: param_u32(obj, "neighbor_threshold", DEFAULT_NEIGHBOR_THRESHOLD),
            regeneration_rate: param_f64(obj, "regeneration_rate", DEFAULT_REGENERATION_RATE),
            regen_world_rate_step: param_f64(
                obj,
                "regen_world_rate_step",
                DEFAULT_REGEN_WORLD_RATE_STEP,
            ),
            regen_stop_threshold: param_f64(
                obj,
                "regen_stop_threshold",
                DEFAULT_REGEN_STOP_THRESHOLD,
            ),
            regrowth_warmup_steps: param_u32(
                obj,
                "regrowth_warmup_steps",
                DEFAULT_REGROWTH_WARMUP_STEPS,
            ),
            perlin_octaves: param_u32(obj, "perlin_octaves", DEFAULT_PERLIN_OCTAVES),
            perlin_frequency: param_f64(obj, "perlin_frequency", DEFAULT_PERLIN_FREQUENCY),
            perlin_persistence: param_f64(obj, "perlin_persistence", DEFAULT_PERLIN_PERSISTENCE),
            perlin_lacunarity: param_f64(obj, "perlin_lacunarity", DEFAULT_PERLIN_LACUNARITY),
            min_solvability_percent: param_f64(
                obj,
                "min_solvability_percent",
                DEFAULT_MIN_SOLVABILITY_PERCENT,
            ),
            max_validation_attempts: param_u32(
                obj,
                "max_validation_attempts",
                DEFAULT_MAX_VALIDATION_ATTEMPTS,
            ),
            validation_budget_ms: param_usize(
                obj,
                "validation_budget_ms",
                DEFAULT_VALIDATION_BUDGET_MS as usize,
            ) as u64,
            clear_radius: param_f64(obj, "clear_radius", DEFAULT_CLEAR_RADIUS),
            world_themes: param_string_list(obj, "world_themes", DEFAULT_WORLD_THEMES),
            hazard_catalog: param_string_table(obj, "hazard_catalog", DEFAULT_HAZARD_CATALOG),
        }
    }

    /// Levels per world: floors times rooms per floor.
    pub fn levels_per_world(&self) -> u64 {
        u64::from(self.floors_per_world) * u64::from(self.rooms_per_floor)
    }

    /// Total configured level count across all worlds.
    pub fn total_levels(&self) -> u64 {
        u64::from(self.total_worlds) * self.levels_per_world()
    }

    /// Checks structural invariants the pipeline depends on.
    ///
    /// Runs once at orchestrator construction; per-level code can then
    /// assume a sane table.
    pub fn validate(&self) -> Result<(), GenError> {
        if self.grid_size == 0 {
            return Err(GenError::InvalidConfig("grid_size must be non-zero".into()));
        }
        if self.grid_size.checked_mul(self.grid_size).is_none() {
            return Err(GenError::InvalidConfig("grid_size squared overflows".into()));
        }
        if self.floors_per_world == 0 || self.rooms_per_floor == 0 {
            return Err(GenError::InvalidConfig(
                "floors_per_world and rooms_per_floor must be non-zero".into(),
            ));
        }
        if self.total_worlds == 0 {
            return Err(GenError::InvalidConfig("total_worlds must be non-zero".into()));
        }
        if self.starting_hazard_count > self.ending_hazard_count {
            return Err(GenError::InvalidConfig(
                "starting_hazard_count exceeds ending_hazard_count".into(),
            ));
        }
        if !self.min_hazard_distance.is_finite() || self.min_hazard_distance <= 0.0 {
            return Err(GenError::InvalidConfig(
                "min_hazard_distance must be positive and finite".into(),
            ));
        }
        if self.perlin_octaves == 0 {
            return Err(GenError::InvalidConfig("perlin_octaves must be non-zero".into()));
        }
        if self.hazard_catalog.iter().all(|row| row.is_empty()) {
            return Err(GenError::InvalidConfig("hazard_catalog is empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // -- Defaults --

    #[test]
    fn default_table_is_valid() {
        let config = GenConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.levels_per_world(), 1000);
        assert_eq!(config.total_levels(), 10_000);
    }

    #[test]
    fn default_themes_cover_every_world() {
        let config = GenConfig::default();
        assert_eq!(config.world_themes.len(), config.total_worlds as usize);
        assert_eq!(config.hazard_catalog.len(), config.total_worlds as usize);
    }

    // -- from_json overlay --

    #[test]
    fn empty_object_yields_defaults() {
        assert_eq!(GenConfig::from_json(&json!({})), GenConfig::default());
    }

    #[test]
    fn present_keys_override_defaults() {
        let config = GenConfig::from_json(&json!({
            "grid_size": 32,
            "total_worlds": 3,
            "regeneration_rate": 0.2,
            "world_themes": ["Diner", "Laundromat", "Arcade"],
        }));
        assert_eq!(config.grid_size, 32);
        assert_eq!(config.total_worlds, 3);
        assert!((config.regeneration_rate - 0.2).abs() < f64::EPSILON);
        assert_eq!(config.world_themes, vec!["Diner", "Laundromat", "Arcade"]);
        // Untouched keys keep their defaults.
        assert_eq!(config.rooms_per_floor, DEFAULT_ROOMS_PER_FLOOR);
    }

    #[test]
    fn wrong_typed_keys_fall_back() {
        let config = GenConfig::from_json(&json!({
            "grid_size": "big",
            "starting_timer": null,
        }));
        assert_eq!(config.grid_size, DEFAULT_GRID_SIZE);
        assert!((config.starting_timer - DEFAULT_STARTING_TIMER).abs() < f64::EPSILON);
    }

    // -- validate --

    #[test]
    fn validate_rejects_zero_grid() {
        let config = GenConfig {
            grid_size: 0,
            ..GenConfig::default()
        };
        assert!(matches!(config.validate(), Err(GenError::InvalidConfig(_))));
    }

    #[test]
    fn validate_rejects_inverted_hazard_range() {
        let config = GenConfig {
            starting_hazard_count: 9,
            ending_hazard_count: 3,
            ..GenConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_positive_min_distance() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = GenConfig {
                min_hazard_distance: bad,
                ..GenConfig::default()
            };
            assert!(config.validate().is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn validate_rejects_fully_empty_catalog() {
        let config = GenConfig {
            hazard_catalog: vec![vec![], vec![]],
            ..GenConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_accepts_partially_empty_catalog() {
        let config = GenConfig {
            hazard_catalog: vec![vec!["grease".into()], vec![]],
            ..GenConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
