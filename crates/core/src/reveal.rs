//! Sparse exposure grid behind the "sprinkle filings to reveal the field"
//! interaction.
//!
//! Each sprinkled filing bumps a counter in the cell it lands in. A field
//! line point is drawn with an opacity taken from the counts in the 3x3
//! block of cells around it, so lines only show where filings have been
//! dropped.

use std::collections::HashMap;

use glam::DVec2;

/// Default cell edge length in canvas units.
pub const DEFAULT_CELL_SIZE: f64 = 20.0;
/// Default intensity per nearby exposure; 13 exposures saturate at 100.
pub const DEFAULT_SCALE: f64 = 8.0;
/// Maximum value returned by [`RevealGrid::intensity`].
pub const MAX_INTENSITY: f64 = 100.0;
/// Non-empty cells required before the "show all lines" toggle unlocks.
pub const UNLOCK_CELLS: usize = 25;

/// Quantized cell coordinate.
pub type Cell = (i32, i32);

/// Sparse map from cell to exposure count. Counts only ever grow until
/// [`clear`](RevealGrid::clear).
#[derive(Debug, Clone)]
pub struct RevealGrid {
    cell_size: f64,
    scale: f64,
    counts: HashMap<Cell, u32>,
}

impl Default for RevealGrid {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE, DEFAULT_SCALE)
    }
}

impl RevealGrid {
    /// Creates an empty grid. Non-positive or non-finite arguments fall
    /// back to the defaults.
    pub fn new(cell_size: f64, scale: f64) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            DEFAULT_CELL_SIZE
        };
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            DEFAULT_SCALE
        };
        Self {
            cell_size,
            scale,
            counts: HashMap::new(),
        }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Cell containing `point`. Cells are half-open: `[k * size, (k + 1) * size)`.
    pub fn cell_of(&self, point: DVec2) -> Cell {
        let q = (point / self.cell_size).floor();
        (q.x as i32, q.y as i32)
    }

    /// Records one exposure at `point`.
    pub fn record(&mut self, point: DVec2) {
        let cell = self.cell_of(point);
        let count = self.counts.entry(cell).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Smoothed exposure around `point` in `[0, 100]`.
    ///
    /// Sums the 3x3 neighbourhood of cells centered on the cell holding
    /// `point`; 0 when none of them has been exposed.
    pub fn intensity(&self, point: DVec2) -> f64 {
        let (cx, cy) = self.cell_of(point);
        let mut sum: u64 = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                let key = (cx.saturating_add(dx), cy.saturating_add(dy));
                if let Some(&count) = self.counts.get(&key) {
                    sum += u64::from(count);
                }
            }
        }
        if sum == 0 {
            return 0.0;
        }
        (sum as f64 * self.scale).min(MAX_INTENSITY)
    }

    /// Removes every entry. Calling it on an empty grid is a no-op.
    pub fn clear(&mut self) {
        if !self.counts.is_empty() {
            log::info!("reveal grid cleared ({} cells)", self.counts.len());
        }
        self.counts.clear();
    }

    /// Number of cells with at least one exposure.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// True once enough distinct cells are exposed to offer the
    /// "show all lines" toggle.
    pub fn is_unlocked(&self) -> bool {
        self.len() > UNLOCK_CELLS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_grid_has_zero_intensity() {
        let grid = RevealGrid::default();
        assert_eq!(grid.intensity(DVec2::new(55.0, 12.0)), 0.0);
        assert!(grid.is_empty());
        assert_eq!(grid.len(), 0);
    }

    #[test]
    fn record_creates_and_increments_cell() {
        let mut grid = RevealGrid::default();
        grid.record(DVec2::new(5.0, 5.0));
        grid.record(DVec2::new(19.9, 0.1));
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.intensity(DVec2::new(10.0, 10.0)), 16.0);
    }

    #[test]
    fn negative_coordinates_floor_into_their_own_cells() {
        let grid = RevealGrid::default();
        assert_eq!(grid.cell_of(DVec2::new(-0.5, -0.5)), (-1, -1));
        assert_eq!(grid.cell_of(DVec2::new(0.0, 0.0)), (0, 0));
        assert_eq!(grid.cell_of(DVec2::new(-20.0, 39.9)), (-1, 1));
    }

    #[test]
    fn intensity_scales_with_neighbourhood_sum() {
        let mut grid = RevealGrid::default();
        grid.record(DVec2::new(30.0, 30.0)); // cell (1, 1)
        grid.record(DVec2::new(50.0, 30.0)); // cell (2, 1)
        grid.record(DVec2::new(10.0, 10.0)); // cell (0, 0)
        // Centered on (1, 1): all three are neighbours.
        assert!((grid.intensity(DVec2::new(30.0, 30.0)) - 24.0).abs() < 1e-12);
        // Centered on (3, 1): only (2, 1) is a neighbour.
        assert!((grid.intensity(DVec2::new(70.0, 30.0)) - 8.0).abs() < 1e-12);
        // Centered on (5, 5): nothing nearby.
        assert_eq!(grid.intensity(DVec2::new(110.0, 110.0)), 0.0);
    }

    #[test]
    fn intensity_saturates_at_one_hundred() {
        let mut grid = RevealGrid::default();
        for _ in 0..12 {
            grid.record(DVec2::new(100.0, 100.0));
        }
        assert!((grid.intensity(DVec2::new(100.0, 100.0)) - 96.0).abs() < 1e-12);
        grid.record(DVec2::new(100.0, 100.0));
        assert_eq!(grid.intensity(DVec2::new(100.0, 100.0)), MAX_INTENSITY);
        for _ in 0..50 {
            grid.record(DVec2::new(100.0, 100.0));
        }
        assert_eq!(grid.intensity(DVec2::new(100.0, 100.0)), MAX_INTENSITY);
    }

    #[test]
    fn clear_empties_and_is_idempotent() {
        let mut grid = RevealGrid::default();
        for i in 0..40 {
            grid.record(DVec2::new(i as f64 * 25.0, 0.0));
        }
        assert!(!grid.is_empty());
        grid.clear();
        assert_eq!(grid.len(), 0);
        assert_eq!(grid.intensity(DVec2::ZERO), 0.0);
        grid.clear();
        assert_eq!(grid.len(), 0);
    }

    #[test]
    fn unlock_needs_more_than_threshold_cells() {
        let mut grid = RevealGrid::default();
        for i in 0..UNLOCK_CELLS {
            grid.record(DVec2::new(i as f64 * DEFAULT_CELL_SIZE, 0.0));
        }
        assert_eq!(grid.len(), UNLOCK_CELLS);
        assert!(!grid.is_unlocked());
        // Re-exposing an existing cell does not unlock.
        grid.record(DVec2::ZERO);
        assert!(!grid.is_unlocked());
        grid.record(DVec2::new(0.0, 500.0));
        assert!(grid.is_unlocked());
    }

    #[test]
    fn invalid_construction_falls_back_to_defaults() {
        let grid = RevealGrid::new(0.0, f64::NAN);
        assert_eq!(grid.cell_size(), DEFAULT_CELL_SIZE);
        assert_eq!(grid.scale(), DEFAULT_SCALE);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn point() -> impl Strategy<Value = DVec2> {
            (-1000.0_f64..1000.0, -1000.0_f64..1000.0).prop_map(|(x, y)| DVec2::new(x, y))
        }

        proptest! {
            #[test]
            fn intensity_never_decreases_with_more_records(
                records in prop::collection::vec(point(), 0..60),
                spot in point(),
            ) {
                let mut grid = RevealGrid::default();
                let mut last = grid.intensity(spot);
                for p in records {
                    grid.record(p);
                    let now = grid.intensity(spot);
                    prop_assert!(now >= last, "intensity dropped from {} to {}", last, now);
                    prop_assert!((0.0..=MAX_INTENSITY).contains(&now));
                    last = now;
                }
            }

            #[test]
            fn cleared_grid_is_dark_everywhere(
                records in prop::collection::vec(point(), 1..60),
                spot in point(),
            ) {
                let mut grid = RevealGrid::default();
                for p in records {
                    grid.record(p);
                }
                grid.clear();
                prop_assert_eq!(grid.len(), 0);
                prop_assert_eq!(grid.intensity(spot), 0.0);
            }
        }
    }
}
