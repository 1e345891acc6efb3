//! This module contains functionality for carving smaller puzzles out of a
//! uniquely solvable grid.
//!
//! The [Reducer] removes givens depth-first and keeps only states that still
//! solve to the same solution as the input. Since removing a given can never
//! rule out a completion, a state with two solutions stays ambiguous no
//! matter which further givens are removed, so the whole subtree below it is
//! pruned. States are deduplicated by fingerprint across calls through a
//! caller-owned seen-set.
//!
//! [random_subsets] is the sampling counterpart: instead of walking removal
//! subsets exhaustively, it draws them at random, which scales to removal
//! counts where the exhaustive walk is hopeless.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::index::sample;

use crate::SudokuGrid;
use crate::error::GridParseResult;
use crate::solver::{BacktrackingSolver, SearchOutcome};

/// Explores the removal subsets of a grid's givens and collects the
/// fingerprints of those states at the target depth that are still uniquely
/// solvable.
pub struct Reducer {

    /// The number of givens to remove from the input grid. Every emitted
    /// fingerprint has exactly this many givens fewer than the input.
    pub target_depth: usize,

    /// The maximum number of fingerprints to emit. Once it is reached, the
    /// entire search stops.
    pub limit: usize
}

impl Reducer {

    /// Creates a new reducer that removes `target_depth` givens and emits at
    /// most `limit` fingerprints per [Reducer::reduce] call.
    pub fn new(target_depth: usize, limit: usize) -> Reducer {
        Reducer {
            target_depth,
            limit
        }
    }

    fn descend(&self, grid: &mut SudokuGrid, solution: &SudokuGrid,
            positions: &[(usize, usize)], depth: usize,
            seen: &mut HashSet<String>, results: &mut Vec<String>,
            solver: &mut BacktrackingSolver) {
        if results.len() >= self.limit {
            return;
        }

        let fingerprint = grid.fingerprint();

        if seen.contains(&fingerprint) {
            return;
        }

        match solver.find_one(grid, Some(solution)) {
            SearchOutcome::Success(_) => {
                // a second solution exists, so does one in every child state
                grid.reset();
                return;
            },
            SearchOutcome::DeadEnd => { }
        }

        seen.insert(fingerprint.clone());

        if depth == self.target_depth {
            results.push(fingerprint);
            return;
        }

        for (i, &(column, row)) in positions.iter().enumerate() {
            if let Some(value) = grid.clear_given(column, row) {
                self.descend(grid, solution, &positions[(i + 1)..],
                    depth + 1, seen, results, solver);
                grid.restore_given(column, row, value);
            }

            if results.len() >= self.limit {
                return;
            }
        }
    }

    /// Removes [Reducer::target_depth] givens from the given grid in every
    /// possible way, in row-major removal order, and returns the fingerprints
    /// of the resulting states that still have the input's solution as their
    /// only completion. At most [Reducer::limit] fingerprints are returned.
    ///
    /// States whose fingerprint is already in `seen` are skipped together
    /// with their subtrees; all states visited by this call are added to it.
    /// Passing the same set to successive calls on overlapping grids avoids
    /// re-deriving known states.
    ///
    /// If the grid is not uniquely solvable, no state qualifies and an empty
    /// vector is returned. The grid is restored to its input state before
    /// this method returns.
    pub fn reduce(&self, grid: &mut SudokuGrid, seen: &mut HashSet<String>)
            -> Vec<String> {
        let mut solver = BacktrackingSolver::new();
        let solution = match solver.solve(grid) {
            Some(solution) => solution,
            None => return Vec::new()
        };

        let positions = grid.given_positions();
        let mut results = Vec::new();
        self.descend(grid, &solution, &positions, 0, seen, &mut results,
            &mut solver);
        grid.reset();
        results
    }
}

/// Counts the subsets of size `k` of an `n`-element set, i.e. the binomial
/// coefficient. `u128` is wide enough for all arguments up to `n = 81`.
fn count_combinations(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }

    let mut count = 1u128;

    for i in 0..k {
        count = count * (n - i) as u128 / (i + 1) as u128;
    }

    count
}

fn clear_all(grid: &mut SudokuGrid, positions: &[(usize, usize)],
        chosen: &[usize]) -> String {
    let mut values = Vec::with_capacity(chosen.len());

    for &i in chosen {
        let (column, row) = positions[i];
        values.push(grid.clear_given(column, row));
    }

    let fingerprint = grid.fingerprint();

    for (&i, value) in chosen.iter().zip(values).rev() {
        if let Some(value) = value {
            let (column, row) = positions[i];
            grid.restore_given(column, row, value);
        }
    }

    fingerprint
}

fn enumerate_subsets(grid: &mut SudokuGrid, positions: &[(usize, usize)],
        remove: usize, limit: usize, start: usize, chosen: &mut Vec<usize>,
        results: &mut Vec<String>) {
    if results.len() >= limit {
        return;
    }

    if chosen.len() == remove {
        results.push(clear_all(grid, positions, chosen));
        return;
    }

    for i in start..positions.len() {
        chosen.push(i);
        enumerate_subsets(grid, positions, remove, limit, i + 1, chosen,
            results);
        chosen.pop();

        if results.len() >= limit {
            return;
        }
    }
}

/// Produces up to `limit` distinct fingerprints obtained by clearing `remove`
/// givens from the grid described by `fingerprint`.
///
/// If the number of possible removal subsets does not exceed `limit`, all of
/// them are enumerated in lexicographic order of the removed positions.
/// Otherwise, distinct subsets are sampled with the provided random number
/// generator until `limit` fingerprints have been collected. No uniqueness
/// check is performed on the results; callers that need proper puzzles run
/// them through the solver afterwards.
///
/// # Errors
///
/// Any [GridParseError](crate::error::GridParseError) raised when parsing the
/// fingerprint.
pub fn random_subsets(fingerprint: &str, remove: usize, limit: usize,
        rng: &mut impl Rng) -> GridParseResult<Vec<String>> {
    let mut grid = SudokuGrid::parse(fingerprint)?;
    let positions = grid.given_positions();
    let total = count_combinations(positions.len(), remove);

    if total <= limit as u128 {
        let mut results = Vec::new();
        enumerate_subsets(&mut grid, &positions, remove, limit, 0,
            &mut Vec::new(), &mut results);
        return Ok(results);
    }

    let mut seen = HashSet::new();
    let mut results = Vec::new();

    while results.len() < limit {
        let mut chosen: Vec<usize> =
            sample(rng, positions.len(), remove).into_iter().collect();
        chosen.sort_unstable();

        if seen.insert(chosen.clone()) {
            results.push(clear_all(&mut grid, &positions, &chosen));
        }
    }

    Ok(results)
}
