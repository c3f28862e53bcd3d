#![deny(unsafe_code)]
//! Blue-noise point placement via Bridson's algorithm.
//!
//! Produces hazard-anchor candidates inside a square region with a
//! guaranteed minimum pairwise distance. A background occupancy grid with
//! cell size `min_distance / sqrt(2)` holds at most one point per cell, so
//! each candidate is checked against a constant-size neighborhood instead
//! of every accepted point.
//!
//! The accept/reject order is part of the deterministic output: every step
//! depends on prior state, so this stage is strictly sequential. Do not
//! parallelize it.

use glam::DVec2;
use scrubgen_core::Xorshift64;

/// Blue-noise sampler over the square region `[0, region_size)^2`.
#[derive(Debug, Clone, Copy)]
pub struct BlueNoiseSampler {
    min_distance: f64,
    region_size: f64,
    rejection_attempts: u32,
}

impl BlueNoiseSampler {
    /// Creates a sampler. Degenerate parameters (non-positive or non-finite
    /// distance or region) are tolerated and produce an empty sample set.
    pub fn new(min_distance: f64, region_size: f64, rejection_attempts: u32) -> Self {
        Self {
            min_distance,
            region_size,
            rejection_attempts,
        }
    }

    /// Generates the full point set for `seed`.
    ///
    /// Maintains an active list seeded with one random point. Each round
    /// picks a random active point and tries up to `rejection_attempts`
    /// candidates in the annulus `[min_distance, 2 * min_distance]` around
    /// it; the first conflict-free candidate inside the region is accepted.
    /// A point whose attempts are exhausted is dropped from the active
    /// list, so the loop terminates once the region is saturated.
    pub fn sample(&self, seed: u64) -> Vec<DVec2> {
        if !self.min_distance.is_finite()
            || self.min_distance <= 0.0
            || !self.region_size.is_finite()
            || self.region_size <= 0.0
        {
            return Vec::new();
        }

        let mut rng = Xorshift64::new(seed);
        let mut grid = OccupancyGrid::new(self.min_distance, self.region_size);
        let mut points: Vec<DVec2> = Vec::new();
        let mut active: Vec<usize> = Vec::new();

        let first = DVec2::new(
            rng.next_range(0.0, self.region_size),
            rng.next_range(0.0, self.region_size),
        );
        grid.insert(first, 0);
        points.push(first);
        active.push(0);

        while !active.is_empty() {
            let pick = rng.next_usize(active.len());
            let parent = points[active[pick]];
            let mut accepted = false;

            for _ in 0..self.rejection_attempts {
                let angle = rng.next_range(0.0, std::f64::consts::TAU);
                let radius = self.min_distance * (1.0 + rng.next_f64());
                let candidate = parent + DVec2::new(angle.cos(), angle.sin()) * radius;

                if !self.in_region(candidate) {
                    continue;
                }
                if grid.has_conflict(candidate, self.min_distance, &points) {
                    continue;
                }

                let index = points.len();
                grid.insert(candidate, index);
                points.push(candidate);
                active.push(index);
                accepted = true;
                break;
            }

            if !accepted {
                // Exhausted: this point will never spawn a neighbor.
                let _ = active.swap_remove(pick);
            }
        }

        points
    }

    fn in_region(&self, p: DVec2) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x < self.region_size && p.y < self.region_size
    }
}

/// Uniform background grid holding at most one accepted point per cell.
///
/// Cell side is `min_distance / sqrt(2)`, the largest size for which two
/// points in one cell would necessarily violate the minimum distance.
#[derive(Debug, Clone)]
struct OccupancyGrid {
    cell_size: f64,
    cols: usize,
    cells: Vec<Option<usize>>,
}

impl OccupancyGrid {
    fn new(min_distance: f64, region_size: f64) -> Self {
        let cell_size = min_distance / std::f64::consts::SQRT_2;
        let cols = ((region_size / cell_size).ceil() as usize).max(1);
        Self {
            cell_size,
            cols,
            cells: vec![None; cols * cols],
        }
    }

    fn cell_of(&self, p: DVec2) -> (usize, usize) {
        let cx = ((p.x / self.cell_size) as usize).min(self.cols - 1);
        let cy = ((p.y / self.cell_size) as usize).min(self.cols - 1);
        (cx, cy)
    }

    fn insert(&mut self, p: DVec2, index: usize) {
        let (cx, cy) = self.cell_of(p);
        self.cells[cy * self.cols + cx] = Some(index);
    }

    /// True if any accepted point within the 5x5 cell neighborhood of
    /// `candidate` is closer than `min_distance`.
    fn has_conflict(&self, candidate: DVec2, min_distance: f64, points: &[DVec2]) -> bool {
        let (cx, cy) = self.cell_of(candidate);
        let limit = min_distance * min_distance;
        for dy in -2_isize..=2 {
            for dx in -2_isize..=2 {
                let nx = cx as isize + dx;
                let ny = cy as isize + dy;
                if nx < 0 || ny < 0 || nx >= self.cols as isize || ny >= self.cols as isize {
                    continue;
                }
                if let Some(index) = self.cells[ny as usize * self.cols + nx as usize] {
                    if points[index].distance_squared(candidate) < limit {
                        return true;
                    }
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Brute-force check of the pairwise minimum-distance invariant.
    fn assert_min_distance(points: &[DVec2], min_distance: f64) {
        for (i, a) in points.iter().enumerate() {
            for b in points.iter().skip(i + 1) {
                let d = a.distance(*b);
                assert!(
                    d >= min_distance - 1e-9,
                    "points {a:?} and {b:?} are {d} apart, minimum {min_distance}"
                );
            }
        }
    }

    // -- Invariants --

    #[test]
    fn accepted_points_respect_minimum_distance() {
        let points = BlueNoiseSampler::new(5.0, 64.0, 30).sample(42);
        assert!(points.len() > 10, "only {} points", points.len());
        assert_min_distance(&points, 5.0);
    }

    #[test]
    fn all_points_lie_inside_region() {
        let points = BlueNoiseSampler::new(4.0, 50.0, 30).sample(7);
        for p in &points {
            assert!(p.x >= 0.0 && p.x < 50.0 && p.y >= 0.0 && p.y < 50.0, "{p:?}");
        }
    }

    // -- Determinism --

    #[test]
    fn same_seed_reproduces_the_exact_point_sequence() {
        let sampler = BlueNoiseSampler::new(6.0, 64.0, 30);
        let a = sampler.sample(1234);
        let b = sampler.sample(1234);
        assert_eq!(a.len(), b.len());
        for (pa, pb) in a.iter().zip(b.iter()) {
            assert_eq!(pa.x.to_bits(), pb.x.to_bits());
            assert_eq!(pa.y.to_bits(), pb.y.to_bits());
        }
    }

    #[test]
    fn different_seeds_give_different_layouts() {
        let sampler = BlueNoiseSampler::new(6.0, 64.0, 30);
        assert_ne!(sampler.sample(1), sampler.sample(2));
    }

    // -- Degenerate inputs --

    #[test]
    fn non_positive_min_distance_yields_empty_set() {
        assert!(BlueNoiseSampler::new(0.0, 64.0, 30).sample(1).is_empty());
        assert!(BlueNoiseSampler::new(-1.0, 64.0, 30).sample(1).is_empty());
        assert!(BlueNoiseSampler::new(f64::NAN, 64.0, 30).sample(1).is_empty());
    }

    #[test]
    fn non_positive_region_yields_empty_set() {
        assert!(BlueNoiseSampler::new(5.0, 0.0, 30).sample(1).is_empty());
        assert!(BlueNoiseSampler::new(5.0, -3.0, 30).sample(1).is_empty());
    }

    #[test]
    fn region_smaller_than_min_distance_yields_single_point() {
        let points = BlueNoiseSampler::new(10.0, 4.0, 30).sample(5);
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn zero_attempts_yields_single_point() {
        // Every active point exhausts immediately; only the initial
        // point survives.
        let points = BlueNoiseSampler::new(5.0, 64.0, 0).sample(9);
        assert_eq!(points.len(), 1);
    }

    // -- Saturation --

    #[test]
    fn dense_sampling_covers_the_region() {
        // With k = 30, Bridson saturates the region; expect a point count
        // near the packing bound rather than a handful.
        let points = BlueNoiseSampler::new(5.0, 100.0, 30).sample(11);
        assert!(points.len() > 100, "only {} points", points.len());
    }

    // -- Property-based tests --

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            #[test]
            fn invariant_holds_for_any_seed(seed: u64) {
                let points = BlueNoiseSampler::new(6.0, 48.0, 20).sample(seed);
                prop_assert!(!points.is_empty());
                for (i, a) in points.iter().enumerate() {
                    for b in points.iter().skip(i + 1) {
                        prop_assert!(a.distance(*b) >= 6.0 - 1e-9);
                    }
                }
            }

            #[test]
            fn points_stay_in_region_for_any_geometry(
                seed: u64,
                min_distance in 2.0_f64..=10.0,
                region in 10.0_f64..=80.0,
            ) {
                let points = BlueNoiseSampler::new(min_distance, region, 15).sample(seed);
                for p in &points {
                    prop_assert!(p.x >= 0.0 && p.x < region);
                    prop_assert!(p.y >= 0.0 && p.y < region);
                }
            }
        }
    }
}
