#![deny(unsafe_code)]
//! Bounded greedy solvability validation.
//!
//! Certifies that a grid snapshot can reach a target clean percentage by
//! simulating greedy clearing actions against a private copy: find the
//! dirtiest cluster via a coarse stride-sampled scan, clear it with linear
//! radial falloff, re-measure, and repeat until the target, an iteration
//! cap, or a wall-clock budget is hit.
//!
//! A failed verdict is advisory. The greedy strategy under a budget proves
//! nothing about unsolvability; callers flag the level for review instead
//! of rejecting it. The wall-clock budget here is a generation-time compute
//! limit, unrelated to the in-game timer on the level descriptor.

use scrubgen_core::HazardGrid;
use std::time::{Duration, Instant};

/// Radius of the averaging window around each sampled cell in the
/// dirtiest-cluster scan.
const CLUSTER_WINDOW_RADIUS: isize = 5;

/// Grid-size divisor for the sampling stride of the cluster scan.
///
/// The stride scan deliberately stays coarse to bound cost; it can miss a
/// globally dirtier but under-sampled region. Level tuning depends on this
/// pass/fail bias, so keep the scan as it is.
const SCAN_STRIDE_DIVISOR: usize = 32;

/// Inputs of one validation run.
#[derive(Debug, Clone, Copy)]
pub struct ValidationParams {
    /// Clean percentage, in [0, 100], the greedy simulation must reach.
    pub target_clean_percentage: f64,
    /// Radius of each simulated clearing action, in cells.
    pub clear_radius: f64,
    /// Cap on clearing actions.
    pub max_iterations: u32,
    /// Wall-clock compute budget. Checked after every clearing action;
    /// overrun aborts the loop fail-soft.
    pub budget: Duration,
}

/// Outcome of a validation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    /// Whether the achieved percentage reached the target.
    pub solvable: bool,
    /// Clean percentage at loop exit, in [0, 100].
    pub achieved_clean_percentage: f64,
    /// Clearing actions performed.
    pub iterations: u32,
    /// True when the loop stopped because the compute budget ran out.
    pub budget_exhausted: bool,
}

/// Runs the greedy simulation against a private copy of `grid`.
///
/// An input that already satisfies the target returns immediately with
/// zero iterations. The loop always terminates: it is bounded by
/// `max_iterations` and by the wall-clock budget.
pub fn validate(grid: &HazardGrid, params: &ValidationParams) -> Verdict {
    let mut work = grid.clone();
    let start = Instant::now();

    let mut achieved = work.clean_percentage();
    let mut iterations = 0;
    let mut budget_exhausted = false;

    while achieved < params.target_clean_percentage && iterations < params.max_iterations {
        let (cx, cy) = dirtiest_cluster(&work);
        clear_with_falloff(&mut work, cx, cy, params.clear_radius);
        iterations += 1;
        achieved = work.clean_percentage();

        if start.elapsed() >= params.budget {
            budget_exhausted = true;
            break;
        }
    }

    Verdict {
        solvable: achieved >= params.target_clean_percentage,
        achieved_clean_percentage: achieved,
        iterations,
        budget_exhausted,
    }
}

/// Locates the approximate dirtiest cluster.
///
/// Samples the grid at a stride of `size / 32` (minimum 1) and scores each
/// sampled cell by the mean intensity of the in-bounds window of radius
/// [`CLUSTER_WINDOW_RADIUS`] around it, keeping the maximum.
fn dirtiest_cluster(grid: &HazardGrid) -> (usize, usize) {
    let size = grid.size();
    let stride = (size / SCAN_STRIDE_DIVISOR).max(1);

    let mut best = (0, 0);
    let mut best_score = f64::NEG_INFINITY;
    let mut y = 0;
    while y < size {
        let mut x = 0;
        while x < size {
            let score = window_mean(grid, x, y);
            if score > best_score {
                best_score = score;
                best = (x, y);
            }
            x += stride;
        }
        y += stride;
    }
    best
}

/// Mean intensity over the in-bounds square window of radius
/// [`CLUSTER_WINDOW_RADIUS`] centered at `(cx, cy)`.
fn window_mean(grid: &HazardGrid, cx: usize, cy: usize) -> f64 {
    let mut sum = 0.0;
    let mut count = 0;
    for dy in -CLUSTER_WINDOW_RADIUS..=CLUSTER_WINDOW_RADIUS {
        for dx in -CLUSTER_WINDOW_RADIUS..=CLUSTER_WINDOW_RADIUS {
            if let Some(v) = grid.get_checked(cx as isize + dx, cy as isize + dy) {
                sum += v;
                count += 1;
            }
        }
    }
    sum / count as f64
}

/// Simulates one clearing action at `(cx, cy)` with linear radial falloff.
///
/// Each cell within `radius` loses `1 - distance / radius` intensity,
/// clamped at zero by the grid. A non-positive radius degenerates to
/// clearing the center cell alone.
fn clear_with_falloff(grid: &mut HazardGrid, cx: usize, cy: usize, radius: f64) {
    let (cx, cy) = (cx as isize, cy as isize);
    if radius <= 0.0 {
        if let Some(v) = grid.get_checked(cx, cy) {
            grid.set(cx, cy, v - 1.0);
        }
        return;
    }

    let reach = radius.ceil() as isize;
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let distance = ((dx * dx + dy * dy) as f64).sqrt();
            if distance > radius {
                continue;
            }
            let reduction = 1.0 - distance / radius;
            if let Some(v) = grid.get_checked(cx + dx, cy + dy) {
                grid.set(cx + dx, cy + dy, v - reduction);
            }
        }
    }
}
