#![deny(unsafe_code)]
//! Cellular-automaton hazard regrowth.
//!
//! Each step reads the previous frame's snapshot and writes a fresh buffer,
//! so the rule is a pure function of the prior frame and the result does
//! not depend on cell visiting order. That also makes the step row-parallel
//! with a join barrier at the end; no partial results are visible mid-step.
//!
//! Player clearing writes go directly through `HazardGrid::set`, outside
//! the step.

use rayon::prelude::*;
use scrubgen_core::HazardGrid;

/// Intensity above which a neighbor counts as active for the regrowth rule.
pub const ACTIVE_NEIGHBOR_INTENSITY: f64 = 0.5;

/// Parameters of the regrowth rule.
#[derive(Debug, Clone, Copy)]
pub struct RegrowthParams {
    /// Intensity gained per second by a regrowing cell.
    pub regen_rate_per_second: f64,
    /// A cell regrows only when its active-neighbor count exceeds this.
    pub neighbor_threshold: u32,
    /// Global clean percentage at which regrowth shuts off entirely.
    pub stop_threshold: f64,
}

/// Advances the automaton by one step of `delta_time` seconds.
///
/// The rule is globally gated: when `global_clean_percentage` has reached
/// `stop_threshold` the grid is returned unchanged — the player has won the
/// room back and nothing regrows. Otherwise a cell whose count of active
/// 8-neighbors (intensity above [`ACTIVE_NEIGHBOR_INTENSITY`]) exceeds
/// `neighbor_threshold` gains `regen_rate_per_second * delta_time`, clamped
/// to 1.0; every other cell is unchanged.
pub fn step(
    grid: &HazardGrid,
    delta_time: f64,
    global_clean_percentage: f64,
    params: &RegrowthParams,
) -> HazardGrid {
    let mut next = grid.clone();
    if global_clean_percentage >= params.stop_threshold {
        return next;
    }

    let size = grid.size();
    let prev = grid.data();
    let gain = params.regen_rate_per_second * delta_time;

    next.data_mut()
        .par_chunks_mut(size)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, cell) in row.iter_mut().enumerate() {
                let current = prev[y * size + x];
                if active_neighbors(prev, size, x, y) > params.neighbor_threshold {
                    *cell = (current + gain).clamp(0.0, 1.0);
                }
            }
        });

    next
}

/// Counts the in-bounds 8-neighbors of `(x, y)` with intensity above
/// [`ACTIVE_NEIGHBOR_INTENSITY`] in the previous frame. Cells beyond the
/// grid edge are walls and never count.
fn active_neighbors(prev: &[f64], size: usize, x: usize, y: usize) -> u32 {
    let s = size as isize;
    let mut count = 0;
    for dy in -1_isize..=1 {
        for dx in -1_isize..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let nx = x as isize + dx;
            let ny = y as isize + dy;
            if nx < 0 || ny < 0 || nx >= s || ny >= s {
                continue;
            }
            if prev[ny as usize * size + nx as usize] > ACTIVE_NEIGHBOR_INTENSITY {
                count += 1;
            }
        }
    }
    count
}
