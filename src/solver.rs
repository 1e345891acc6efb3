//! This module contains the solver and its supporting definitions.
//!
//! The [BacktrackingSolver] is the main way to solve Sudoku in this crate. It
//! interleaves hidden-single propagation (see the [propagate] module) with a
//! depth-first search that always branches on the open cell with the fewest
//! candidates. The search is fully deterministic: ties are broken in
//! row-major order and candidate digits are tried in ascending order.
//!
//! Solving is layered. [BacktrackingSolver::find_one] finds any one
//! completion, [BacktrackingSolver::classify] distinguishes unsolvable,
//! uniquely solvable and ambiguous grids, and [BacktrackingSolver::solve]
//! reduces that to an `Option` for callers that only accept proper puzzles.
//!
//! # Example
//!
//! ```
//! use sudoku_mill::SudokuGrid;
//! use sudoku_mill::solver::{BacktrackingSolver, Solution};
//!
//! let mut grid = SudokuGrid::parse("
//!     000081000
//!     002007800
//!     053000170
//!     370000000
//!     600000003
//!     000000024
//!     069000230
//!     005900400
//!     000650000").unwrap();
//! let mut solver = BacktrackingSolver::new();
//!
//! match solver.classify(&mut grid) {
//!     Solution::Unique(solution) => assert!(solution.is_solved()),
//!     _ => panic!("grid should have a unique solution")
//! }
//! ```

use std::io::Write;

use crate::SudokuGrid;
use crate::candidates::CandidateGrid;

pub mod propagate;

/// An enumeration of the ways a grid can relate to its completions.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Solution {

    /// Indicates that the grid has no valid completion.
    Impossible,

    /// Indicates that the grid has exactly one valid completion, which is
    /// wrapped in this variant.
    Unique(SudokuGrid),

    /// Indicates that the grid has more than one valid completion.
    Ambiguous
}

/// The result of one recursive search. Unlike [Solution], this carries no
/// uniqueness information: the search stops at the first completion it finds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SearchOutcome {

    /// A completion was found, which is wrapped in this variant.
    Success(SudokuGrid),

    /// No completion is reachable from the searched state.
    DeadEnd
}

/// A solver that executes a propagating, minimum-remaining-candidates
/// backtracking search.
///
/// The solver counts its recursive search invocations in a step counter,
/// which is a rough measure of how hard a grid is, and can write a trace of
/// its tentative placements to an installed writer (see
/// [BacktrackingSolver::with_trace]). One solver owns no grid state; the same
/// instance can solve any number of grids in sequence, with the step counter
/// accumulating until [BacktrackingSolver::reset_steps] is called.
pub struct BacktrackingSolver {
    steps: u64,
    trace: Option<Box<dyn Write>>,
    suppress_trace: bool
}

impl BacktrackingSolver {

    /// Creates a new solver without a trace writer and with a step counter
    /// of zero.
    pub fn new() -> BacktrackingSolver {
        BacktrackingSolver {
            steps: 0,
            trace: None,
            suppress_trace: false
        }
    }

    /// Creates a new solver that writes a search trace to the given writer.
    ///
    /// During a primary search, every tentative placement emits a line of the
    /// form `x y value depth` and every undo emits `x y 0 depth`, where `x`
    /// and `y` are the column and row of the affected cell and `depth` is the
    /// recursion depth of the placement. The verification pass of
    /// [BacktrackingSolver::classify] emits nothing. Write errors are
    /// ignored.
    pub fn with_trace(writer: impl Write + 'static) -> BacktrackingSolver {
        BacktrackingSolver {
            steps: 0,
            trace: Some(Box::new(writer)),
            suppress_trace: false
        }
    }

    /// Returns the number of search steps this solver has taken since its
    /// creation or the last [BacktrackingSolver::reset_steps] call. Every
    /// invocation of the recursive search counts as one step.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Resets the step counter to zero.
    pub fn reset_steps(&mut self) {
        self.steps = 0;
    }

    fn trace_step(&mut self, column: usize, row: usize, value: u8,
            depth: u32) {
        if self.suppress_trace {
            return;
        }

        if let Some(writer) = &mut self.trace {
            let _ = writeln!(writer, "{} {} {} {}", column, row, value, depth);
        }
    }

    fn search(&mut self, grid: &mut SudokuGrid,
            candidates: &mut CandidateGrid, exclude: Option<&SudokuGrid>,
            depth: u32) -> SearchOutcome {
        self.steps += 1;

        if let Some(excluded) = exclude {
            if grid == excluded {
                return SearchOutcome::DeadEnd;
            }
        }

        if candidates.is_dead_end() {
            return SearchOutcome::DeadEnd;
        }

        if grid.is_solved() {
            return SearchOutcome::Success(grid.clone());
        }

        propagate::propagate_to_fixpoint(candidates);

        let (column, row, digits) = match candidates.fewest_candidates() {
            Some(branch) => branch,
            // full but invalid, which only an invalid input can cause
            None => return SearchOutcome::DeadEnd
        };
        let saved = candidates.clone();

        for digit in digits.iter() {
            grid.set_cell(column, row, digit);
            candidates.update_after_assignment(grid, column, row);
            self.trace_step(column, row, digit, depth);

            match self.search(grid, candidates, exclude, depth + 1) {
                outcome @ SearchOutcome::Success(_) => return outcome,
                SearchOutcome::DeadEnd => {
                    grid.clear_cell(column, row);
                    *candidates = saved.clone();
                    self.trace_step(column, row, 0, depth);
                }
            }
        }

        SearchOutcome::DeadEnd
    }

    /// Searches for any one completion of the given grid, ignoring whether
    /// others exist. If `exclude` is provided, the search treats that
    /// completion as a dead end, which [BacktrackingSolver::verify] uses to
    /// probe for second solutions.
    ///
    /// On [SearchOutcome::Success] the grid is left holding the found
    /// completion; on [SearchOutcome::DeadEnd] all tentative placements have
    /// been undone.
    pub fn find_one(&mut self, grid: &mut SudokuGrid,
            exclude: Option<&SudokuGrid>) -> SearchOutcome {
        let mut candidates = CandidateGrid::from_grid(grid);
        self.search(grid, &mut candidates, exclude, 0)
    }

    /// Checks whether `solution` is the only completion of the given grid by
    /// resetting the grid and searching for a different completion. Returns
    /// [Solution::Unique] if none exists and [Solution::Ambiguous] otherwise.
    pub fn verify(&mut self, grid: &mut SudokuGrid, solution: &SudokuGrid)
            -> Solution {
        grid.reset();
        self.suppress_trace = true;
        let outcome = self.find_one(grid, Some(solution));
        self.suppress_trace = false;

        match outcome {
            SearchOutcome::Success(_) => Solution::Ambiguous,
            SearchOutcome::DeadEnd => Solution::Unique(solution.clone())
        }
    }

    /// Determines whether the given grid is unsolvable, uniquely solvable or
    /// ambiguous. This runs a primary search and, if it succeeds, a
    /// verification search that excludes the found completion.
    ///
    /// The grid is left reset to its initial state. If the result is
    /// [Solution::Unique], the step counter is restored to its value after
    /// the primary search, so the reported count reflects only the effort of
    /// finding the solution.
    pub fn classify(&mut self, grid: &mut SudokuGrid) -> Solution {
        let solution = match self.find_one(grid, None) {
            SearchOutcome::DeadEnd => {
                grid.reset();
                return Solution::Impossible;
            },
            SearchOutcome::Success(solution) => solution
        };
        let primary_steps = self.steps;
        let result = self.verify(grid, &solution);
        grid.reset();

        if let Solution::Unique(_) = result {
            self.steps = primary_steps;
        }

        result
    }

    /// Solves the given grid if it is a proper puzzle, i.e. has exactly one
    /// completion. Grids with no completion and grids with several are both
    /// answered with `None`; use [BacktrackingSolver::classify] to tell them
    /// apart. The grid is left reset to its initial state.
    pub fn solve(&mut self, grid: &mut SudokuGrid) -> Option<SudokuGrid> {
        match self.classify(grid) {
            Solution::Unique(solution) => Some(solution),
            _ => None
        }
    }
}

impl Default for BacktrackingSolver {
    fn default() -> BacktrackingSolver {
        BacktrackingSolver::new()
    }
}
