//! The orchestrator: level index in, memoized descriptor out.
//!
//! An explicitly constructed, owned service — callers build one at startup
//! with a validated [`GenConfig`] and wire it into whatever needs levels.
//! There is no global registry and no lazy config loading.
//!
//! `generate` may be called concurrently for different indices (a
//! background pre-generation batch alongside an on-demand request); the
//! cache coalesces concurrent requests for the same index so each level is
//! computed at most once.

use crate::cache::CoalescingCache;
use crate::catalog;
use crate::descriptor::{
    LevelCoordinates, LevelDescriptor, KEY_LEVEL_INTERVAL, STORY_LEVEL_INTERVAL,
};
use scrubgen_core::config::FALLBACK_THEME;
use scrubgen_core::{GenConfig, GenError, LevelSeed};
use scrubgen_noise::NoiseField;
use scrubgen_regrowth::RegrowthParams;
use scrubgen_sampling::BlueNoiseSampler;
use scrubgen_solver::{validate, ValidationParams};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Difficulty multiplier at campaign start.
const DIFFICULTY_FLOOR: f64 = 1.0;
/// Difficulty multiplier at campaign end.
const DIFFICULTY_CEILING: f64 = 10.0;
/// Radius in cells of the full-intensity spot stamped at each hazard anchor.
const HAZARD_SPOT_RADIUS: isize = 2;
/// Time step per regrowth warmup step, seconds.
const WARMUP_DT: f64 = 1.0;

/// Deterministic, memoizing level generator.
pub struct LevelOrchestrator {
    config: GenConfig,
    cache: CoalescingCache<LevelDescriptor>,
    generation_count: AtomicU64,
}

impl LevelOrchestrator {
    /// Builds an orchestrator over a validated copy of `config`.
    pub fn new(config: &GenConfig) -> Result<Self, GenError> {
        config.validate()?;
        Ok(Self {
            config: config.clone(),
            cache: CoalescingCache::new(),
            generation_count: AtomicU64::new(0),
        })
    }

    /// The configuration this orchestrator was built with.
    pub fn config(&self) -> &GenConfig {
        &self.config
    }

    /// Returns the descriptor for `level_index`, generating it on first
    /// request. Idempotent: identical configuration yields bit-identical
    /// descriptors, and repeat calls return the cached value.
    ///
    /// Index 0 is treated as 1; indices past the configured range clamp
    /// into the last world rather than failing.
    pub fn generate(&self, level_index: u64) -> Result<Arc<LevelDescriptor>, GenError> {
        let level_index = level_index.max(1);
        self.cache
            .get_or_try_compute(level_index, || self.build_descriptor(level_index))
    }

    /// Sequentially generates every level of `world` (clamped to the
    /// configured range), checking `cancel` between levels. Returns the
    /// number of levels visited; already-cached levels count but are not
    /// recomputed.
    pub fn pre_generate_world(
        &self,
        world: u32,
        cancel: &AtomicBool,
    ) -> Result<usize, GenError> {
        let world = world.clamp(1, self.config.total_worlds);
        let levels_per_world = self.config.levels_per_world();
        let first = u64::from(world - 1) * levels_per_world + 1;
        let last = u64::from(world) * levels_per_world;

        let mut visited = 0;
        for index in first..=last {
            if cancel.load(Ordering::Relaxed) {
                info!(world, visited, "world pre-generation cancelled");
                return Ok(visited);
            }
            let _ = self.generate(index)?;
            visited += 1;
        }
        info!(world, visited, "world pre-generation finished");
        Ok(visited)
    }

    /// Theme name for `world`, falling back to a default past the
    /// configured list.
    pub fn world_theme(&self, world: u32) -> &str {
        let index = world.max(1) as usize - 1;
        self.config
            .world_themes
            .get(index)
            .map(String::as_str)
            .unwrap_or(FALLBACK_THEME)
    }

    /// Drops every cached descriptor.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Number of descriptors actually computed (cache hits excluded).
    /// Observable hook for idempotence checks.
    pub fn generation_count(&self) -> u64 {
        self.generation_count.load(Ordering::Relaxed)
    }

    /// Runs the full generation chain for one level.
    fn build_descriptor(&self, level_index: u64) -> Result<LevelDescriptor, GenError> {
        debug!(level_index, "generating level");
        let config = &self.config;

        let seed = LevelSeed::for_level(level_index);
        let coordinates = LevelCoordinates::for_level(
            level_index,
            config.levels_per_world(),
            config.rooms_per_floor,
            config.total_worlds,
        );

        let progress = (level_index as f64 / config.total_levels() as f64).clamp(0.0, 1.0);
        let difficulty_multiplier = lerp(DIFFICULTY_FLOOR, DIFFICULTY_CEILING, progress);

        let hazard_count = self.hazard_count(coordinates.world, coordinates.floor);
        let regrowth_rate = config.regeneration_rate
            + f64::from(coordinates.world - 1) * config.regen_world_rate_step;
        let timer_seconds = self.timer_for_world(coordinates.world);

        let hazards = catalog::select_hazards(
            &config.hazard_catalog,
            coordinates.world,
            hazard_count,
            seed.hazard,
        );

        // Generation chain: noise base, anchor stamping, regrowth warmup,
        // solvability certification.
        let noise = NoiseField::new(
            seed.noise,
            config.perlin_octaves,
            config.perlin_frequency,
            config.perlin_persistence,
            config.perlin_lacunarity,
        );
        let mut grid = noise.generate(config.grid_size)?;

        let anchors = BlueNoiseSampler::new(
            config.min_hazard_distance,
            config.grid_size as f64,
            config.poisson_attempts,
        )
        .sample(seed.sampling);
        for anchor in &anchors {
            grid.stamp_disc(anchor.x as isize, anchor.y as isize, HAZARD_SPOT_RADIUS, 1.0);
        }

        let regrowth = RegrowthParams {
            regen_rate_per_second: regrowth_rate,
            neighbor_threshold: config.neighbor_threshold,
            stop_threshold: config.regen_stop_threshold,
        };
        for _ in 0..config.regrowth_warmup_steps {
            let clean = grid.clean_percentage();
            grid = scrubgen_regrowth::step(&grid, WARMUP_DT, clean, &regrowth);
        }

        let verdict = validate(
            &grid,
            &ValidationParams {
                target_clean_percentage: config.min_solvability_percent,
                clear_radius: config.clear_radius,
                max_iterations: config.max_validation_attempts,
                budget: Duration::from_millis(config.validation_budget_ms),
            },
        );
        if !verdict.solvable {
            warn!(
                level_index,
                achieved = verdict.achieved_clean_percentage,
                budget_exhausted = verdict.budget_exhausted,
                "level flagged unsolvable by greedy validation"
            );
        }

        let estimated_elegant_paths =
            (anchors.len() as u32 / verdict.iterations.max(1)).max(1);

        let descriptor = LevelDescriptor {
            level_index,
            coordinates,
            seed,
            difficulty_multiplier,
            hazard_count,
            hazards,
            regrowth_rate,
            timer_seconds,
            is_solvable: verdict.solvable,
            achieved_clean_percentage: verdict.achieved_clean_percentage,
            estimated_elegant_paths,
            theme: self.world_theme(coordinates.world).to_owned(),
            is_key_level: level_index % KEY_LEVEL_INTERVAL == 0,
            is_story_level: level_index % STORY_LEVEL_INTERVAL == 0,
        };

        let _ = self.generation_count.fetch_add(1, Ordering::Relaxed);
        info!(
            level_index,
            world = coordinates.world,
            solvable = descriptor.is_solvable,
            "level generated"
        );
        Ok(descriptor)
    }

    /// Hazard count for a position: base plus per-world and per-floor
    /// steps, clamped to the configured [base, max] range.
    fn hazard_count(&self, world: u32, floor: u32) -> u32 {
        let config = &self.config;
        let stepped = config.starting_hazard_count
            + (world - 1) * config.hazard_world_step
            + (f64::from(floor) * config.hazard_floor_step).floor() as u32;
        stepped.clamp(config.starting_hazard_count, config.ending_hazard_count)
    }

    /// In-game timer for a world: linear interpolation across the world
    /// range. A single-world configuration uses the starting timer.
    fn timer_for_world(&self, world: u32) -> f64 {
        let config = &self.config;
        if config.total_worlds <= 1 {
            return config.starting_timer;
        }
        let t = f64::from(world - 1) / f64::from(config.total_worlds - 1);
        lerp(config.starting_timer, config.ending_timer, t)
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
