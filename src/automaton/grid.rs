//! Toroidal grid of binary cells advanced under a Life-like rule

use super::RuleSet;
use crate::error::AutomatonError;
use std::fmt;

/// Moore neighborhood offsets `(dx, dy)`, excluding the cell itself
#[rustfmt::skip]
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0),           (1, 0),
    (-1, 1),  (0, 1),  (1, 1),
];

/// A fixed-size automaton grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
    generation: usize,
    rules: RuleSet,
}

impl Grid {
    /// Create a grid of dead cells at generation 0.
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: usize, height: usize, rules: RuleSet) -> Self {
        assert!(
            width > 0 && height > 0,
            "Grid dimensions must be positive, got {}x{}",
            width,
            height
        );

        Self {
            width,
            height,
            cells: vec![0; width * height],
            generation: 0,
            rules,
        }
    }

    /// Replace every cell from a `height` x `width` map and reset the generation.
    ///
    /// The whole map is checked before anything is written, so a mismatch
    /// leaves the grid untouched.
    pub fn init_map<R: AsRef<[u8]>>(&mut self, map: &[R]) -> Result<(), AutomatonError> {
        let got_height = map.len();
        let mismatch = |got_width| AutomatonError::DimensionMismatch {
            expected_width: self.width,
            expected_height: self.height,
            got_width,
            got_height,
        };

        if got_height != self.height {
            return Err(mismatch(map.first().map_or(0, |row| row.as_ref().len())));
        }
        if let Some(row) = map.iter().find(|row| row.as_ref().len() != self.width) {
            return Err(mismatch(row.as_ref().len()));
        }

        for (y, row) in map.iter().enumerate() {
            let start = y * self.width;
            self.cells[start..start + self.width].copy_from_slice(row.as_ref());
        }
        self.generation = 0;

        log::debug!("Initialized {}x{} map, {} living cells", self.width, self.height, self.living_count());
        Ok(())
    }

    /// Bring a coordinate back onto one axis.
    ///
    /// Below zero goes to `max`, above `max` goes to zero. This is a single
    /// comparison, not modulo: anything further out lands on the same index
    /// as a one-step overflow.
    #[inline]
    fn wrap(coordinate: isize, max: usize) -> usize {
        if coordinate < 0 {
            max
        } else if coordinate as usize > max {
            0
        } else {
            coordinate as usize
        }
    }

    #[inline]
    fn index(&self, x: isize, y: isize) -> usize {
        let x = Self::wrap(x, self.width - 1);
        let y = Self::wrap(y, self.height - 1);
        y * self.width + x
    }

    pub fn get_cell(&self, x: isize, y: isize) -> u8 {
        self.cells[self.index(x, y)]
    }

    pub fn set_cell(&mut self, x: isize, y: isize, value: u8) {
        let idx = self.index(x, y);
        self.cells[idx] = value;
    }

    pub fn is_alive(&self, x: isize, y: isize) -> bool {
        self.get_cell(x, y) != 0
    }

    /// Count living cells among the eight wrapped neighbors of `(x, y)`
    pub fn count_neighbors(&self, x: isize, y: isize) -> u8 {
        NEIGHBOR_OFFSETS
            .iter()
            .filter(|&&(dx, dy)| self.is_alive(x.saturating_add(dx), y.saturating_add(dy)))
            .count() as u8
    }

    /// Advance one generation.
    ///
    /// Every transition is computed from the current cells; the result
    /// replaces them in one step.
    pub fn update(&mut self) {
        let mut next = self.cells.clone();

        for y in 0..self.height {
            for x in 0..self.width {
                let (cx, cy) = (x as isize, y as isize);
                let neighbors = self.count_neighbors(cx, cy);
                let idx = y * self.width + x;

                if self.is_alive(cx, cy) {
                    if !self.rules.is_survival(neighbors) {
                        next[idx] = 0;
                    }
                } else if self.rules.is_birth(neighbors) {
                    next[idx] = 1;
                }
            }
        }

        self.cells = next;
        self.generation += 1;
        log::trace!("Generation {}: {} living cells", self.generation, self.living_count());
    }

    /// Scatter live cells, each with probability `spawn_probability`.
    ///
    /// Cells that lose the draw keep their current value. A fixed `seed` gives
    /// the same board every time; `None` seeds from entropy.
    pub fn randomize(&mut self, spawn_probability: f64, seed: Option<u64>) {
        use rand::{Rng, SeedableRng};
        use rand_chacha::ChaCha8Rng;

        let mut rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        for cell in self.cells.iter_mut() {
            if rng.gen::<f64>() < spawn_probability {
                *cell = 1;
            }
        }
        log::debug!("Randomized grid with p={}: {} living cells", spawn_probability, self.living_count());
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Row-major cell storage
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| cell == 0)
    }

    /// Cells as rows, in the shape `init_map` accepts
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells.chunks(self.width).map(<[u8]>::to_vec).collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for &cell in row {
                write!(f, "{}", if cell != 0 { '1' } else { '0' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grid_from(rows: &[&[u8]], rules: RuleSet) -> Grid {
        let mut grid = Grid::new(rows[0].len(), rows.len(), rules);
        grid.init_map(rows).unwrap();
        grid
    }

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(4, 3, RuleSet::classic_life());
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.cells().len(), 12);
        assert_eq!(grid.generation(), 0);
        assert!(grid.is_empty());
    }

    #[test]
    #[should_panic]
    fn test_zero_dimension_panics() {
        Grid::new(0, 3, RuleSet::classic_life());
    }

    #[test]
    fn test_init_map_row_major() {
        let grid = grid_from(&[&[1, 0, 0], &[0, 0, 1]], RuleSet::classic_life());
        assert_eq!(grid.cells(), &[1, 0, 0, 0, 0, 1]);
        assert_eq!(grid.get_cell(2, 1), 1);
        assert_eq!(grid.get_cell(1, 0), 0);
    }

    #[test]
    fn test_init_map_resets_generation() {
        let mut grid = Grid::new(2, 2, RuleSet::classic_life());
        grid.update();
        grid.update();
        assert_eq!(grid.generation(), 2);

        grid.init_map(&[[0u8, 1], [1, 0]]).unwrap();
        assert_eq!(grid.generation(), 0);
        assert_eq!(grid.living_count(), 2);
    }

    #[test]
    fn test_init_map_wrong_height() {
        let mut grid = Grid::new(2, 2, RuleSet::classic_life());
        grid.set_cell(0, 0, 1);
        grid.update();
        let before = grid.clone();

        let err = grid.init_map(&[vec![0u8, 0]]).unwrap_err();
        assert_eq!(
            err,
            AutomatonError::DimensionMismatch {
                expected_width: 2,
                expected_height: 2,
                got_width: 2,
                got_height: 1,
            }
        );
        assert_eq!(grid, before);
    }

    #[test]
    fn test_init_map_ragged_row_leaves_grid_unchanged() {
        let mut grid = Grid::new(3, 3, RuleSet::classic_life());
        grid.set_cell(1, 1, 1);
        let before = grid.clone();

        let map = vec![vec![1u8, 1, 1], vec![1, 1], vec![1, 1, 1]];
        let err = grid.init_map(&map).unwrap_err();
        assert!(matches!(err, AutomatonError::DimensionMismatch { got_width: 2, got_height: 3, .. }));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_init_map_empty_map() {
        let mut grid = Grid::new(2, 2, RuleSet::classic_life());
        let empty: Vec<Vec<u8>> = Vec::new();
        assert!(grid.init_map(&empty).is_err());
    }

    #[test]
    fn test_wrap_one_step_out() {
        let mut grid = Grid::new(3, 2, RuleSet::classic_life());
        grid.set_cell(2, 0, 1);
        grid.set_cell(0, 1, 1);

        assert_eq!(grid.get_cell(-1, 0), 1); // x -1 -> 2
        assert_eq!(grid.get_cell(3, 1), 1); // x 3 -> 0
        assert_eq!(grid.get_cell(0, -1), 1); // y -1 -> 1
        assert_eq!(grid.get_cell(2, 2), 1); // y 2 -> 0
    }

    #[test]
    fn test_wrap_far_out_clamps() {
        let mut grid = Grid::new(5, 5, RuleSet::classic_life());
        grid.set_cell(4, 4, 1);
        grid.set_cell(0, 0, 1);

        assert_eq!(grid.get_cell(-7, -100), 1); // both axes -> 4
        assert_eq!(grid.get_cell(12, 40), 1); // both axes -> 0
        // True modulo would give (3, 3) for (-2, -2); single-step wrap gives (4, 4)
        assert_eq!(grid.get_cell(-2, -2), 1);
    }

    #[test]
    fn test_neighbors_at_extreme_coordinates() {
        let mut grid = Grid::new(3, 3, RuleSet::classic_life());
        grid.set_cell(0, 0, 1);
        grid.set_cell(2, 2, 1);

        // Every neighbor column of isize::MAX lands on column 0, so (0, 0) is seen twice
        assert_eq!(grid.count_neighbors(isize::MAX, 0), 2);
        // Every neighbor of (isize::MIN, isize::MIN) lands on (2, 2)
        assert_eq!(grid.count_neighbors(isize::MIN, isize::MIN), 8);
        assert_eq!(grid.get_cell(isize::MIN, isize::MIN), 1);
    }

    #[test]
    fn test_set_cell_wraps() {
        let mut grid = Grid::new(4, 4, RuleSet::classic_life());
        grid.set_cell(-1, 4, 1);
        assert_eq!(grid.get_cell(3, 0), 1);
        assert_eq!(grid.living_count(), 1);
    }

    #[test]
    fn test_neighbor_counting() {
        let grid = grid_from(
            &[&[1, 1, 1, 0, 0], &[1, 0, 1, 0, 0], &[1, 1, 1, 0, 0], &[0, 0, 0, 0, 0], &[0, 0, 0, 0, 0]],
            RuleSet::classic_life(),
        );
        assert_eq!(grid.count_neighbors(1, 1), 8);
        assert_eq!(grid.count_neighbors(0, 0), 2);
        // Column 5 wraps onto the ring's left edge
        assert_eq!(grid.count_neighbors(4, 1), 3);
    }

    #[test]
    fn test_corner_neighbors_on_small_torus() {
        let grid = grid_from(&[&[1, 0], &[0, 1]], RuleSet::classic_life());
        // (1, 1) is reached through four different offsets
        assert_eq!(grid.count_neighbors(0, 0), 4);
        assert_eq!(grid.count_neighbors(1, 0), 4);
    }

    #[test]
    fn test_all_dead_stays_dead() {
        let mut grid = Grid::new(4, 4, RuleSet::life_34());
        grid.init_map(&[[0u8; 4]; 4]).unwrap();
        grid.update();
        assert!(grid.is_empty());
        assert_eq!(grid.generation(), 1);
    }

    #[test]
    fn test_zero_in_birth_set_fills_empty_grid() {
        let mut grid = Grid::new(3, 3, RuleSet::parse("B0/S"));
        grid.update();
        assert_eq!(grid.living_count(), 9);
    }

    #[test]
    fn test_isolated_cell_dies() {
        let mut grid = Grid::new(5, 5, RuleSet::classic_life());
        grid.set_cell(2, 2, 1);
        grid.update();
        assert!(grid.is_empty());
    }

    #[test]
    fn test_still_life_block() {
        let mut grid = grid_from(
            &[
                &[0, 0, 0, 0, 0, 0],
                &[0, 0, 0, 0, 0, 0],
                &[0, 0, 1, 1, 0, 0],
                &[0, 0, 1, 1, 0, 0],
                &[0, 0, 0, 0, 0, 0],
                &[0, 0, 0, 0, 0, 0],
            ],
            RuleSet::classic_life(),
        );
        let before = grid.cells().to_vec();
        grid.update();
        assert_eq!(grid.cells(), before.as_slice());
    }

    #[test]
    fn test_oscillator_blinker() {
        let horizontal: &[&[u8]] = &[
            &[0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0],
            &[0, 1, 1, 1, 0],
            &[0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0],
        ];
        let mut grid = grid_from(horizontal, RuleSet::classic_life());
        grid.update();

        let vertical = grid_from(
            &[
                &[0, 0, 0, 0, 0],
                &[0, 0, 1, 0, 0],
                &[0, 0, 1, 0, 0],
                &[0, 0, 1, 0, 0],
                &[0, 0, 0, 0, 0],
            ],
            RuleSet::classic_life(),
        );
        assert_eq!(grid.cells(), vertical.cells());

        grid.update();
        assert_eq!(grid.to_rows(), horizontal.iter().map(|row| row.to_vec()).collect::<Vec<_>>());
        assert_eq!(grid.generation(), 2);
    }

    #[test]
    fn test_blinker_across_the_seam() {
        // Horizontal blinker centered on column 0 of a 5x5 torus
        let mut grid = Grid::new(5, 5, RuleSet::classic_life());
        for x in [-1, 0, 1] {
            grid.set_cell(x, 2, 1);
        }
        grid.update();

        assert_eq!(grid.living_count(), 3);
        assert!(grid.is_alive(0, 1));
        assert!(grid.is_alive(0, 2));
        assert!(grid.is_alive(0, 3));
    }

    #[test]
    fn test_full_3x3_under_life_34() {
        let mut grid = grid_from(&[&[1, 1, 1], &[1, 1, 1], &[1, 1, 1]], RuleSet::life_34());
        grid.update();
        // Every neighbor of every cell is alive: 8 is not a survival count
        assert_eq!(grid.to_rows(), vec![vec![0, 0, 0]; 3]);
    }

    #[test]
    fn test_update_is_synchronous() {
        // Under B1/S a left-to-right in-place update would cascade across the row
        let mut grid = Grid::new(7, 3, RuleSet::parse("B1/S"));
        grid.set_cell(3, 1, 1);
        grid.update();

        assert!(!grid.is_alive(3, 1));
        assert_eq!(grid.living_count(), 8);
        for (x, y) in [(2, 0), (3, 0), (4, 0), (2, 1), (4, 1), (2, 2), (3, 2), (4, 2)] {
            assert!(grid.is_alive(x, y), "({}, {}) should be born", x, y);
        }
    }

    #[test]
    fn test_nonzero_cells_count_as_alive() {
        let mut grid = grid_from(&[&[0, 0, 0, 0], &[0, 7, 9, 0], &[0, 0, 5, 0], &[0, 0, 0, 0]], RuleSet::classic_life());
        assert_eq!(grid.count_neighbors(1, 2), 3);
        grid.update();
        assert_eq!(grid.get_cell(1, 2), 1);
        // Survivors keep their stored value
        assert_eq!(grid.get_cell(1, 1), 7);
    }

    #[test]
    fn test_invalid_rules_still_run() {
        let mut grid = Grid::new(3, 3, RuleSet::parse("9"));
        grid.set_cell(1, 1, 1);
        grid.update();
        assert!(grid.is_empty());
        assert_eq!(grid.generation(), 1);
    }

    #[test]
    fn test_randomize_is_reproducible() {
        let mut a = Grid::new(25, 25, RuleSet::life_34());
        let mut b = Grid::new(25, 25, RuleSet::life_34());
        a.randomize(0.15, Some(7));
        b.randomize(0.15, Some(7));
        assert_eq!(a, b);
        assert!(!a.is_empty());
        assert!(a.living_count() < 25 * 25);

        let mut none = Grid::new(10, 10, RuleSet::life_34());
        none.randomize(0.0, Some(1));
        assert!(none.is_empty());
    }

    #[test]
    fn test_display() {
        let grid = grid_from(&[&[0, 1], &[1, 0]], RuleSet::classic_life());
        assert_eq!(grid.to_string(), "01\n10\n");
    }

    proptest! {
        #[test]
        fn prop_generation_counts_updates(
            width in 1usize..8,
            height in 1usize..8,
            steps in 0usize..12,
            seed in any::<u64>(),
        ) {
            let mut grid = Grid::new(width, height, RuleSet::life_34());
            grid.randomize(0.4, Some(seed));
            for step in 0..steps {
                prop_assert_eq!(grid.generation(), step);
                grid.update();
            }
            prop_assert_eq!(grid.generation(), steps);
        }

        #[test]
        fn prop_out_of_range_hits_opposite_boundary(
            width in 1usize..10,
            height in 1usize..10,
            distance in 1isize..50,
        ) {
            let mut grid = Grid::new(width, height, RuleSet::classic_life());
            let (max_x, max_y) = (width as isize - 1, height as isize - 1);
            grid.set_cell(max_x, max_y, 1);

            prop_assert_eq!(grid.get_cell(-distance, -distance), 1);
            prop_assert_eq!(grid.get_cell(max_x + distance, max_y + distance), grid.get_cell(0, 0));
        }
    }
}
