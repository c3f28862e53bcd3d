//! Square scalar grid of hazard intensity with values clamped to [0, 1].
//!
//! A `HazardGrid` stores `size * size` f64 values in row-major layout. Every
//! mutating operation clamps to [0, 1], so a grid that started valid stays
//! valid. Addressing is bounded: reads outside the grid return `None` rather
//! than wrapping, because a room has walls.

use crate::error::GenError;

/// Intensity below which a cell counts as clean for percentage bookkeeping.
pub const CLEAN_INTENSITY_THRESHOLD: f64 = 0.1;

/// A fixed-size N x N hazard-intensity grid, every value in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct HazardGrid {
    size: usize,
    data: Vec<f64>,
}

impl HazardGrid {
    /// Creates a zero-filled (all clean) grid.
    ///
    /// Returns `GenError::InvalidDimensions` if `size` is zero or
    /// `size * size` overflows `usize`.
    pub fn new(size: usize) -> Result<Self, GenError> {
        Self::filled(size, 0.0)
    }

    /// Creates a grid filled with `value`, clamped to [0, 1].
    pub fn filled(size: usize, value: f64) -> Result<Self, GenError> {
        if size == 0 {
            return Err(GenError::InvalidDimensions);
        }
        let len = size.checked_mul(size).ok_or(GenError::InvalidDimensions)?;
        Ok(Self {
            size,
            data: vec![value.clamp(0.0, 1.0); len],
        })
    }

    /// Creates a grid from a pre-built row-major vector.
    ///
    /// The length must equal `size * size`. Values are clamped to [0, 1] on
    /// ingest so the grid invariant holds regardless of the source.
    pub fn from_data(size: usize, mut data: Vec<f64>) -> Result<Self, GenError> {
        if size == 0 {
            return Err(GenError::InvalidDimensions);
        }
        let expected = size.checked_mul(size).ok_or(GenError::InvalidDimensions)?;
        if data.len() != expected {
            return Err(GenError::DataLengthMismatch {
                size,
                got: data.len(),
            });
        }
        for v in &mut data {
            *v = v.clamp(0.0, 1.0);
        }
        Ok(Self { size, data })
    }

    /// Grid side length in cells.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Read-only access to the underlying row-major data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Mutable access to the underlying row-major data.
    ///
    /// Writes here bypass the [0, 1] clamp. Hot paths that clamp on their
    /// own (the automaton step, the noise fill) use this.
    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Gets the value at in-bounds coordinates.
    ///
    /// # Panics
    ///
    /// Panics if `x` or `y` is out of bounds. Use [`get_checked`] for
    /// signed or possibly-out-of-range coordinates.
    ///
    /// [`get_checked`]: HazardGrid::get_checked
    pub fn get(&self, x: usize, y: usize) -> f64 {
        assert!(x < self.size && y < self.size, "({x}, {y}) out of bounds");
        self.data[y * self.size + x]
    }

    /// Gets the value at signed coordinates, or `None` outside the grid.
    pub fn get_checked(&self, x: isize, y: isize) -> Option<f64> {
        let s = self.size as isize;
        if x < 0 || y < 0 || x >= s || y >= s {
            return None;
        }
        Some(self.data[y as usize * self.size + x as usize])
    }

    /// Sets the value at `(x, y)`, clamped to [0, 1]. Out-of-bounds
    /// coordinates are ignored, which lets disc stamps overlap the edge.
    pub fn set(&mut self, x: isize, y: isize, value: f64) {
        let s = self.size as isize;
        if x < 0 || y < 0 || x >= s || y >= s {
            return;
        }
        self.data[y as usize * self.size + x as usize] = value.clamp(0.0, 1.0);
    }

    /// Stamps a filled disc of `value` centered at `(cx, cy)`.
    ///
    /// Cells with `dx*dx + dy*dy <= radius*radius` are set; parts of the
    /// disc outside the grid are dropped.
    pub fn stamp_disc(&mut self, cx: isize, cy: isize, radius: isize, value: f64) {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    self.set(cx + dx, cy + dy, value);
                }
            }
        }
    }

    /// Share of cells with intensity below [`CLEAN_INTENSITY_THRESHOLD`],
    /// as a percentage in [0, 100].
    pub fn clean_percentage(&self) -> f64 {
        let clean = self
            .data
            .iter()
            .filter(|&&v| v < CLEAN_INTENSITY_THRESHOLD)
            .count();
        clean as f64 / self.data.len() as f64 * 100.0
    }

    /// Iterates over all cells yielding `(x, y, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.data.iter().enumerate().map(|(i, &v)| {
            let x = i % self.size;
            let y = i / self.size;
            (x, y, v)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Constructors --

    #[test]
    fn new_creates_all_clean_grid() {
        let grid = HazardGrid::new(8).unwrap();
        assert_eq!(grid.size(), 8);
        assert_eq!(grid.data().len(), 64);
        assert!(grid.data().iter().all(|&v| v == 0.0));
        assert!((grid.clean_percentage() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn new_with_zero_size_returns_error() {
        assert!(matches!(
            HazardGrid::new(0),
            Err(GenError::InvalidDimensions)
        ));
    }

    #[test]
    fn new_with_overflow_size_returns_error() {
        assert!(HazardGrid::new(usize::MAX).is_err());
    }

    #[test]
    fn filled_clamps_out_of_range_values() {
        let high = HazardGrid::filled(4, 3.0).unwrap();
        assert!(high.data().iter().all(|&v| (v - 1.0).abs() < f64::EPSILON));
        let low = HazardGrid::filled(4, -1.0).unwrap();
        assert!(low.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn from_data_accepts_matching_length() {
        let grid = HazardGrid::from_data(2, vec![0.1, 0.2, 0.3, 0.4]).unwrap();
        assert!((grid.get(1, 1) - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn from_data_clamps_values_on_ingest() {
        let grid = HazardGrid::from_data(2, vec![-0.5, 1.7, 0.5, 0.0]).unwrap();
        assert_eq!(grid.get(0, 0), 0.0);
        assert!((grid.get(1, 0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn from_data_rejects_wrong_length() {
        assert!(matches!(
            HazardGrid::from_data(3, vec![0.0; 8]),
            Err(GenError::DataLengthMismatch { size: 3, got: 8 })
        ));
    }

    #[test]
    fn from_data_rejects_zero_size() {
        assert!(HazardGrid::from_data(0, vec![]).is_err());
    }

    // -- Bounded addressing --

    #[test]
    fn get_checked_returns_none_outside_grid() {
        let grid = HazardGrid::new(4).unwrap();
        assert!(grid.get_checked(-1, 0).is_none());
        assert!(grid.get_checked(0, -1).is_none());
        assert!(grid.get_checked(4, 0).is_none());
        assert!(grid.get_checked(0, 4).is_none());
        assert!(grid.get_checked(3, 3).is_some());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn get_panics_outside_grid() {
        let grid = HazardGrid::new(4).unwrap();
        let _ = grid.get(4, 0);
    }

    #[test]
    fn set_outside_grid_is_ignored() {
        let mut grid = HazardGrid::new(4).unwrap();
        grid.set(-1, 2, 1.0);
        grid.set(2, 9, 1.0);
        assert!(grid.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn set_clamps_value() {
        let mut grid = HazardGrid::new(4).unwrap();
        grid.set(1, 1, 2.5);
        assert!((grid.get(1, 1) - 1.0).abs() < f64::EPSILON);
        grid.set(1, 1, -2.5);
        assert_eq!(grid.get(1, 1), 0.0);
    }

    // -- Disc stamping --

    #[test]
    fn stamp_disc_fills_circle() {
        let mut grid = HazardGrid::new(9).unwrap();
        grid.stamp_disc(4, 4, 2, 1.0);
        assert!((grid.get(4, 4) - 1.0).abs() < f64::EPSILON);
        assert!((grid.get(4, 2) - 1.0).abs() < f64::EPSILON);
        // A corner of the bounding square is outside the disc.
        assert_eq!(grid.get(2, 2), 0.0);
    }

    #[test]
    fn stamp_disc_overlapping_edge_is_truncated() {
        let mut grid = HazardGrid::new(4).unwrap();
        grid.stamp_disc(0, 0, 2, 1.0);
        assert!((grid.get(0, 0) - 1.0).abs() < f64::EPSILON);
        // Nothing wrapped to the far edge.
        assert_eq!(grid.get(3, 3), 0.0);
    }

    // -- Clean percentage --

    #[test]
    fn clean_percentage_counts_cells_below_threshold() {
        let mut grid = HazardGrid::new(2).unwrap();
        grid.set(0, 0, 0.9);
        grid.set(1, 0, 0.9);
        // Two dirty, two clean.
        assert!((grid.clean_percentage() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn clean_percentage_threshold_boundary_is_exclusive() {
        let grid = HazardGrid::filled(2, CLEAN_INTENSITY_THRESHOLD).unwrap();
        assert_eq!(grid.clean_percentage(), 0.0);
    }

    // -- Iterator --

    #[test]
    fn iter_yields_row_major_triples() {
        let grid = HazardGrid::from_data(2, vec![0.1, 0.2, 0.3, 0.4]).unwrap();
        let triples: Vec<_> = grid.iter().collect();
        assert_eq!(triples[0], (0, 0, 0.1));
        assert_eq!(triples[1], (1, 0, 0.2));
        assert_eq!(triples[2], (0, 1, 0.3));
        assert_eq!(triples[3], (1, 1, 0.4));
    }

    // -- Clone independence --

    #[test]
    fn clone_is_independent() {
        let mut original = HazardGrid::new(3).unwrap();
        original.set(1, 1, 0.5);
        let copy = original.clone();
        original.set(1, 1, 0.9);
        assert!((copy.get(1, 1) - 0.5).abs() < f64::EPSILON);
    }

    // -- Property-based tests --

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn set_then_get_returns_clamped_value(
                size in 1_usize..=48,
                x in -100_isize..=100,
                y in -100_isize..=100,
                v in -10.0_f64..=10.0,
            ) {
                let mut grid = HazardGrid::new(size).unwrap();
                grid.set(x, y, v);
                if let Some(got) = grid.get_checked(x, y) {
                    let expected = v.clamp(0.0, 1.0);
                    prop_assert!((got - expected).abs() < f64::EPSILON);
                }
                // Out-of-bounds writes must never corrupt other cells.
                prop_assert!(grid.data().iter().all(|&c| (0.0..=1.0).contains(&c)));
            }

            #[test]
            fn clean_percentage_is_always_in_0_100(
                size in 1_usize..=32,
                values in prop::collection::vec(-2.0_f64..=2.0, 1..=1024),
            ) {
                let mut grid = HazardGrid::new(size).unwrap();
                for (i, v) in values.iter().enumerate() {
                    let x = (i % size) as isize;
                    let y = ((i / size) % size) as isize;
                    grid.set(x, y, *v);
                }
                let pct = grid.clean_percentage();
                prop_assert!((0.0..=100.0).contains(&pct), "pct = {pct}");
            }
        }
    }
}
