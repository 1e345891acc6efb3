//! Hidden-single propagation over the [CandidateGrid].
//!
//! In every unit (row, column or block), a digit that fits in exactly one
//! open cell must go there, even if that cell still lists other candidates.
//! Propagation collapses such a cell's candidate set to the single digit. It
//! narrows the cache only and never writes digits into the grid; the solver
//! decides placements. Passes over all 27 units repeat until one pass changes
//! nothing.

use crate::SIZE;
use crate::candidates::{CandidateGrid, CellCandidates};
use crate::util::DigitSet;

/// Tracks how often a digit was found to fit in a unit while scanning its
/// cells. Only the exactly-once case retains the position.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Location {
    None,
    One(usize, usize),
    Multiple
}

impl Location {
    fn union(self, column: usize, row: usize) -> Location {
        match self {
            Location::None => Location::One(column, row),
            _ => Location::Multiple
        }
    }
}

fn row_unit(row: usize) -> [(usize, usize); 9] {
    let mut coords = [(0, 0); 9];

    for (column, entry) in coords.iter_mut().enumerate() {
        *entry = (column, row);
    }

    coords
}

fn column_unit(column: usize) -> [(usize, usize); 9] {
    let mut coords = [(0, 0); 9];

    for (row, entry) in coords.iter_mut().enumerate() {
        *entry = (column, row);
    }

    coords
}

fn block_unit(block: usize) -> [(usize, usize); 9] {
    let base_column = (block % 3) * 3;
    let base_row = (block / 3) * 3;
    let mut coords = [(0, 0); 9];

    for (i, entry) in coords.iter_mut().enumerate() {
        *entry = (base_column + i % 3, base_row + i / 3);
    }

    coords
}

/// Collapses all hidden singles of one unit. Returns `true` if any candidate
/// set changed.
fn propagate_unit(candidates: &mut CandidateGrid, unit: [(usize, usize); 9])
        -> bool {
    let mut changed = false;

    for digit in 1..=9 {
        let mut location = Location::None;

        for &(column, row) in &unit {
            if let Some(CellCandidates::Open(set)) =
                    candidates.get(column, row) {
                if set.contains(digit) {
                    location = location.union(column, row);
                }
            }
        }

        if let Location::One(column, row) = location {
            let cell = candidates.get_mut(column, row).unwrap();

            if let CellCandidates::Open(set) = cell {
                if set.len() > 1 {
                    *cell = CellCandidates::Open(DigitSet::singleton(digit));
                    changed = true;
                }
            }
        }
    }

    changed
}

/// Runs one full pass over all 9 rows, 9 columns and 9 blocks. Returns `true`
/// if any candidate set changed.
fn propagate_once(candidates: &mut CandidateGrid) -> bool {
    let mut changed = false;

    for i in 0..SIZE {
        changed |= propagate_unit(candidates, row_unit(i));
        changed |= propagate_unit(candidates, column_unit(i));
        changed |= propagate_unit(candidates, block_unit(i));
    }

    changed
}

/// Collapses hidden singles until a full pass over all units changes no
/// candidate set. Candidate sets only ever shrink, so this terminates.
pub fn propagate_to_fixpoint(candidates: &mut CandidateGrid) {
    while propagate_once(candidates) { }
}

#[cfg(test)]
mod tests {

    use super::*;

    use crate::{SudokuGrid, digits};

    // Every column except 0 contains a 5, while row 0, column 0 and block 0
    // are free of it. That excludes 5 from all of row 0 except (0, 0), making
    // it a hidden single there.
    const HIDDEN_SINGLE: &str = "
        000000000
        000000050
        000000005
        050000000
        005000000
        000500000
        000050000
        000005000
        000000500";

    #[test]
    fn hidden_single_is_collapsed() {
        let grid = SudokuGrid::parse(HIDDEN_SINGLE).unwrap();
        let mut candidates = CandidateGrid::from_grid(&grid);
        assert_eq!(Some(&CellCandidates::Open(DigitSet::all())),
            candidates.get(0, 0));

        propagate_to_fixpoint(&mut candidates);

        assert_eq!(Some(&CellCandidates::Open(digits!(5))),
            candidates.get(0, 0));
    }

    #[test]
    fn propagation_does_not_touch_grid() {
        let grid = SudokuGrid::parse(HIDDEN_SINGLE).unwrap();
        let mut candidates = CandidateGrid::from_grid(&grid);
        propagate_to_fixpoint(&mut candidates);

        assert_eq!(Some(0), grid.get_cell(0, 0));
    }

    #[test]
    fn fixpoint_is_idempotent() {
        let grid = SudokuGrid::parse("
            700036040
            040100070
            300000100
            530000000
            209640000
            060970080
            020704005
            000008004
            054069001").unwrap();
        let mut candidates = CandidateGrid::from_grid(&grid);

        propagate_to_fixpoint(&mut candidates);
        let first = candidates.clone();
        propagate_to_fixpoint(&mut candidates);

        assert_eq!(first, candidates);
    }

    #[test]
    fn propagation_only_shrinks_candidate_sets() {
        let grid = SudokuGrid::parse("
            700036040
            040100070
            300000100
            530000000
            209640000
            060970080
            020704005
            000008004
            054069001").unwrap();
        let before = CandidateGrid::from_grid(&grid);
        let mut after = before.clone();
        propagate_to_fixpoint(&mut after);

        for row in 0..SIZE {
            for column in 0..SIZE {
                match (before.get(column, row), after.get(column, row)) {
                    (Some(CellCandidates::Open(old)),
                            Some(CellCandidates::Open(new))) => {
                        assert_eq!(*new, *new & *old);
                        assert!(!new.is_empty());
                    },
                    (old, new) => assert_eq!(old, new)
                }
            }
        }
    }

    #[test]
    fn solvable_grid_stays_solvable() {
        let grid = SudokuGrid::parse("
            700036040
            040100070
            300000100
            530000000
            209640000
            060970080
            020704005
            000008004
            054069001").unwrap();
        let mut candidates = CandidateGrid::from_grid(&grid);
        propagate_to_fixpoint(&mut candidates);

        assert!(!candidates.is_dead_end());
    }

    #[test]
    fn empty_grid_is_unchanged() {
        let grid = SudokuGrid::empty();
        let mut candidates = CandidateGrid::from_grid(&grid);
        let before = candidates.clone();

        propagate_to_fixpoint(&mut candidates);

        assert_eq!(before, candidates);
    }
}
