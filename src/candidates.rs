//! This module contains the candidate engine: a per-cell cache of the digits
//! that are not excluded by any row, column or block peer. It is analogous to
//! the pencil markings a human player would make.
//!
//! The cache is consistent with the grid state at the moment it was last
//! computed - it is *not* a live view. After any cell mutation it must be
//! refreshed, either wholesale with [CandidateGrid::recompute_all] or, after
//! a single assignment, with the cheaper
//! [CandidateGrid::update_after_assignment]. Both are required to agree for
//! every grid state.

use crate::{NUM_CELLS, SIZE, SudokuGrid, index};
use crate::util::DigitSet;

/// The candidates of a single cell.
///
/// An occupied cell is `Fixed`: it is not a search variable and carries no
/// digit options. An empty cell is `Open` and carries the set of digits no
/// peer excludes. An `Open` cell with an empty set is a dead end - the grid
/// cannot be completed from this state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CellCandidates {

    /// The cell is occupied and not subject to search.
    Fixed,

    /// The cell is empty and may hold any digit of the contained set.
    Open(DigitSet)
}

impl CellCandidates {

    /// Indicates whether this cell is occupied.
    pub fn is_fixed(&self) -> bool {
        matches!(self, CellCandidates::Fixed)
    }

    /// Returns the candidate set of an open cell, or `None` for a fixed one.
    pub fn open(&self) -> Option<DigitSet> {
        match self {
            CellCandidates::Fixed => None,
            CellCandidates::Open(set) => Some(*set)
        }
    }
}

/// Tracks the [CellCandidates] of all 81 cells of one [SudokuGrid] in
/// row-major order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CandidateGrid {
    cells: Vec<CellCandidates>
}

/// Computes the candidates of a single cell directly from the grid. This is
/// the primitive both the full and the incremental recomputation are built
/// on: an occupied cell is fixed, an empty cell may hold every digit that
/// does not occur as a non-zero value in its row, column or block.
fn candidates_of(grid: &SudokuGrid, column: usize, row: usize)
        -> CellCandidates {
    if grid.get_cell(column, row).unwrap() != 0 {
        return CellCandidates::Fixed;
    }

    let mut excluded = DigitSet::new();
    let block = (row / 3) * 3 + column / 3;

    for &value in grid.row(row).iter()
            .chain(grid.column(column).iter())
            .chain(grid.block(block).iter()) {
        if value != 0 {
            excluded.insert(value);
        }
    }

    CellCandidates::Open(DigitSet::all() - excluded)
}

impl CandidateGrid {

    /// Creates a new candidate grid consistent with the current state of the
    /// given grid.
    pub fn from_grid(grid: &SudokuGrid) -> CandidateGrid {
        let mut candidates = CandidateGrid {
            cells: vec![CellCandidates::Fixed; NUM_CELLS]
        };
        candidates.recompute_all(grid);
        candidates
    }

    /// Recomputes the candidates of every cell from the current state of the
    /// given grid.
    pub fn recompute_all(&mut self, grid: &SudokuGrid) {
        for row in 0..SIZE {
            for column in 0..SIZE {
                self.recompute_cell(grid, column, row);
            }
        }
    }

    /// Recomputes the candidates of the single cell at the specified
    /// position. Out-of-range coordinates are a no-op.
    pub fn recompute_cell(&mut self, grid: &SudokuGrid, column: usize,
            row: usize) {
        if column < SIZE && row < SIZE {
            self.cells[index(column, row)] = candidates_of(grid, column, row);
        }
    }

    /// Refreshes the cache after a single assignment to (or clearing of) the
    /// cell at the specified position: the cell itself and all cells sharing
    /// its row, column or block are recomputed. This touches at most 21
    /// distinct cells instead of 81 and must yield the same cache as a full
    /// recomputation.
    pub fn update_after_assignment(&mut self, grid: &SudokuGrid,
            column: usize, row: usize) {
        if column >= SIZE || row >= SIZE {
            return;
        }

        for i in 0..SIZE {
            self.recompute_cell(grid, i, row);
            self.recompute_cell(grid, column, i);
        }

        let base_column = (column / 3) * 3;
        let base_row = (row / 3) * 3;

        for y in base_row..(base_row + 3) {
            for x in base_column..(base_column + 3) {
                self.recompute_cell(grid, x, y);
            }
        }
    }

    /// Gets the candidates of the cell at the specified position, or `None`
    /// if the coordinates are out of range.
    pub fn get(&self, column: usize, row: usize) -> Option<&CellCandidates> {
        if column >= SIZE || row >= SIZE {
            None
        }
        else {
            Some(&self.cells[index(column, row)])
        }
    }

    /// Gets a mutable reference to the candidates of the cell at the
    /// specified position, or `None` if the coordinates are out of range.
    /// The propagator uses this to collapse candidate sets.
    pub fn get_mut(&mut self, column: usize, row: usize)
            -> Option<&mut CellCandidates> {
        if column >= SIZE || row >= SIZE {
            None
        }
        else {
            Some(&mut self.cells[index(column, row)])
        }
    }

    /// Indicates whether this cache proves the grid unsolvable from here,
    /// i.e. whether any open cell has no candidates left.
    pub fn is_dead_end(&self) -> bool {
        self.cells.iter()
            .any(|c| matches!(c, CellCandidates::Open(set) if set.is_empty()))
    }

    fn extremum_by(&self, better: impl Fn(usize, usize) -> bool)
            -> Option<(usize, usize, DigitSet)> {
        let mut result: Option<(usize, usize, DigitSet)> = None;

        for row in 0..SIZE {
            for column in 0..SIZE {
                let set = match self.cells[index(column, row)] {
                    CellCandidates::Fixed => continue,
                    CellCandidates::Open(set) => set
                };

                let replace = match result {
                    Some((_, _, best)) => better(set.len(), best.len()),
                    None => true
                };

                if replace {
                    result = Some((column, row, set));
                }
            }
        }

        result
    }

    /// Finds the open cell with the fewest candidates, the branch point of
    /// the minimum-remaining-candidates search. Ties are broken by the first
    /// cell encountered in row-major order; `None` is returned when no open
    /// cell remains.
    pub fn fewest_candidates(&self) -> Option<(usize, usize, DigitSet)> {
        self.extremum_by(|len, best| len < best)
    }

    /// Finds the open cell with the most candidates. This is not used by the
    /// default search order; it is provided for instrumentation and alternate
    /// heuristics. Ties are broken like in
    /// [CandidateGrid::fewest_candidates].
    pub fn most_candidates(&self) -> Option<(usize, usize, DigitSet)> {
        self.extremum_by(|len, best| len > best)
    }

    /// Sums the candidate-set sizes of all open cells. External difficulty
    /// pipelines consume this as the `sum_of_candidates` feature of a puzzle.
    pub fn total_candidates(&self) -> usize {
        self.cells.iter()
            .filter_map(|c| c.open())
            .map(|set| set.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    use crate::digits;

    const EXAMPLE: &str = "
        700036040
        040100070
        300000100
        530000000
        209640000
        060970080
        020704005
        000008004
        054069001";

    fn example_candidates() -> CandidateGrid {
        let grid = SudokuGrid::parse(EXAMPLE).unwrap();
        CandidateGrid::from_grid(&grid)
    }

    #[test]
    fn occupied_cell_is_fixed() {
        let candidates = example_candidates();
        assert_eq!(Some(&CellCandidates::Fixed), candidates.get(0, 0));
    }

    #[test]
    fn open_cells_have_expected_candidates() {
        let candidates = example_candidates();

        assert_eq!(Some(&CellCandidates::Open(digits!(6, 8, 9))),
            candidates.get(0, 1));
        assert_eq!(Some(&CellCandidates::Open(digits!(2, 8, 9))),
            candidates.get(8, 0));
    }

    #[test]
    fn out_of_range_is_none() {
        let candidates = example_candidates();
        assert_eq!(None, candidates.get(9, 0));
        assert_eq!(None, candidates.get(0, 9));
    }

    #[test]
    fn recompute_all_is_idempotent() {
        let grid = SudokuGrid::parse(EXAMPLE).unwrap();
        let mut candidates = CandidateGrid::from_grid(&grid);
        let first = candidates.clone();

        candidates.recompute_all(&grid);
        assert_eq!(first, candidates);
    }

    #[test]
    fn incremental_update_matches_full_recompute() {
        let mut grid = SudokuGrid::parse(EXAMPLE).unwrap();
        let mut incremental = CandidateGrid::from_grid(&grid);

        grid.set_cell(0, 1, 6);
        incremental.update_after_assignment(&grid, 0, 1);
        assert_eq!(CandidateGrid::from_grid(&grid), incremental);

        grid.set_cell(8, 0, 2);
        incremental.update_after_assignment(&grid, 8, 0);
        assert_eq!(CandidateGrid::from_grid(&grid), incremental);

        grid.clear_cell(0, 1);
        incremental.update_after_assignment(&grid, 0, 1);
        assert_eq!(CandidateGrid::from_grid(&grid), incremental);
    }

    #[test]
    fn exhausted_open_cell_is_dead_end() {
        // (0, 0) is empty, its row excludes 1 to 8 and its column the 9
        let grid = SudokuGrid::parse("
            012345678
            900000000
            000000000
            000000000
            000000000
            000000000
            000000000
            000000000
            000000000").unwrap();
        let candidates = CandidateGrid::from_grid(&grid);

        assert_eq!(Some(&CellCandidates::Open(DigitSet::new())),
            candidates.get(0, 0));
        assert!(candidates.is_dead_end());
    }

    #[test]
    fn example_is_not_dead_end() {
        assert!(!example_candidates().is_dead_end());
    }

    #[test]
    fn fewest_candidates_on_nearly_solved_grid() {
        let mut grid = SudokuGrid::parse("\
            534678912672195348198342567859761423426853791\
            713924856961537284287419635345286179").unwrap();
        grid.clear_given(4, 0);
        grid.clear_given(7, 2);
        let candidates = CandidateGrid::from_grid(&grid);

        // both cleared cells have a single candidate; row-major tie-break
        assert_eq!(Some((4, 0, digits!(7))), candidates.fewest_candidates());
        assert_eq!(2, candidates.total_candidates());
    }

    #[test]
    fn fewest_candidates_on_full_grid_is_none() {
        let grid = SudokuGrid::parse("\
            534678912672195348198342567859761423426853791\
            713924856961537284287419635345286179").unwrap();
        let candidates = CandidateGrid::from_grid(&grid);

        assert_eq!(None, candidates.fewest_candidates());
        assert_eq!(None, candidates.most_candidates());
        assert_eq!(0, candidates.total_candidates());
    }

    #[test]
    fn most_candidates_on_empty_grid() {
        let grid = SudokuGrid::empty();
        let candidates = CandidateGrid::from_grid(&grid);

        assert_eq!(Some((0, 0, DigitSet::all())),
            candidates.most_candidates());
        assert_eq!(Some((0, 0, DigitSet::all())),
            candidates.fewest_candidates());
        assert_eq!(9 * 81, candidates.total_candidates());
    }
}
