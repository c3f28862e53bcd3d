#![deny(unsafe_code)]
//! Seeded fractal (octave) noise grids.
//!
//! A [`NoiseField`] sums `octaves` layers of gradient noise at decreasing
//! amplitude (`persistence`) and increasing frequency (`lacunarity`),
//! normalized by the amplitude sum so per-cell output is bounded, then
//! remapped into [0, 1]. The gradient source is a permutation-table Perlin
//! function of integer lattice coordinates — a pure function of the seed,
//! bit-reproducible across runs and platforms.
//!
//! Per-cell evaluation is independent of every other cell, so the grid fill
//! is row-parallel; the result is identical to sequential evaluation.

use noise::{NoiseFn, Perlin};
use rayon::prelude::*;
use scrubgen_core::{GenError, HazardGrid};

/// Fractal noise generator for the base moisture/suds pattern of a level.
///
/// Construct once per level with that level's noise seed, then call
/// [`generate`](NoiseField::generate). [`sample`](NoiseField::sample) is
/// exposed for point queries and for tests that cross-check the parallel
/// fill against sequential evaluation.
#[derive(Debug, Clone, Copy)]
pub struct NoiseField {
    perlin: Perlin,
    octaves: u32,
    frequency: f64,
    persistence: f64,
    lacunarity: f64,
    amplitude_sum: f64,
}

impl NoiseField {
    /// Creates a noise field from a 64-bit subsystem seed.
    ///
    /// The permutation table takes a 32-bit seed, so the two halves of the
    /// input are folded together rather than truncated.
    pub fn new(seed: u64, octaves: u32, frequency: f64, persistence: f64, lacunarity: f64) -> Self {
        let folded = (seed ^ (seed >> 32)) as u32;
        let amplitude_sum: f64 = (0..octaves.max(1))
            .scan(1.0_f64, |amp, _| {
                let current = *amp;
                *amp *= persistence;
                Some(current)
            })
            .sum();
        Self {
            perlin: Perlin::new(folded),
            octaves: octaves.max(1),
            frequency,
            persistence,
            lacunarity,
            amplitude_sum,
        }
    }

    /// Pure per-cell evaluation: octave-summed gradient noise at `(x, y)`,
    /// normalized and remapped to [0, 1].
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let mut amplitude = 1.0;
        let mut frequency = self.frequency;
        let mut total = 0.0;
        for _ in 0..self.octaves {
            total += amplitude * self.perlin.get([x * frequency, y * frequency]);
            amplitude *= self.persistence;
            frequency *= self.lacunarity;
        }
        let normalized = total / self.amplitude_sum;
        ((normalized + 1.0) * 0.5).clamp(0.0, 1.0)
    }

    /// Fills a `grid_size` x `grid_size` grid, one row per parallel task.
    ///
    /// Cells are sampled at their centers (`x + 0.5`) so the lattice zeros
    /// of gradient noise do not line up with cell coordinates.
    pub fn generate(&self, grid_size: usize) -> Result<HazardGrid, GenError> {
        let mut grid = HazardGrid::new(grid_size)?;
        grid.data_mut()
            .par_chunks_mut(grid_size)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, cell) in row.iter_mut().enumerate() {
                    *cell = self.sample(x as f64 + 0.5, y as f64 + 0.5);
                }
            });
        Ok(grid)
    }
}
