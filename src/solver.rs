//! Driver wiring placements through the exact-cover engine into the
//! unique-solution set.
//!
//! The solver owns one search: the placement list doubles as the row
//! universe of the DLX matrix, every raw cover is verified before it may
//! enter the solution set, and callers pull distinct solutions one at a
//! time. A failed verification means the engine itself is broken and
//! aborts the run.

use crate::dlx::{Matrix, Solutions};
use crate::pieces::{in_bounds, Piece, Solution, NUM_CELLS, NUM_PIECES};
use crate::placements::{enumerate_placements, Placement};
use crate::symmetry::SolutionSet;

/// Incremental search for rotationally distinct tilings.
pub struct Solver {
    placements: Vec<Placement>,
    stream: Solutions,
    set: SolutionSet,
    raw_count: u64,
}

impl Solver {
    /// Builds the placement list and the exact-cover matrix.
    pub fn new() -> Self {
        let placements = enumerate_placements();

        let mut matrix = Matrix::new(NUM_CELLS);
        for placement in &placements {
            matrix.add_row(&placement.cells);
        }
        debug_assert_eq!(matrix.num_rows(), placements.len());

        Solver {
            placements,
            stream: matrix.solutions(),
            set: SolutionSet::new(),
            raw_count: 0,
        }
    }

    /// Converts a cover's row ids into the pieces they place.
    fn rows_to_pieces(&self, rows: &[usize]) -> Solution {
        rows.iter()
            .map(|&row| self.placements[row].to_piece())
            .collect()
    }

    /// Pulls raw covers until one is rotationally new, and returns it.
    ///
    /// Returns `None` once the search space is exhausted. Every cover is
    /// verified on the way; the caller may stop pulling at any point.
    pub fn next_unique(&mut self) -> Option<Solution> {
        while let Some(rows) = self.stream.next() {
            self.raw_count += 1;
            let pieces = self.rows_to_pieces(&rows);
            verify_cover(&pieces);
            if self.set.add(pieces.clone()) {
                return Some(pieces);
            }
        }
        None
    }

    /// Raw covers pulled from the engine so far.
    pub fn raw_count(&self) -> u64 {
        self.raw_count
    }

    /// Distinct solutions accepted so far.
    pub fn unique_count(&self) -> usize {
        self.set.len()
    }

    /// The growing set of accepted representatives.
    pub fn solutions(&self) -> &SolutionSet {
        &self.set
    }

    /// Collects unique solutions up to `max` (`None` runs to exhaustion).
    pub fn solve(&mut self, max: Option<usize>) -> Vec<Solution> {
        let mut found = Vec::new();
        while max.map_or(true, |limit| found.len() < limit) {
            match self.next_unique() {
                Some(solution) => found.push(solution),
                None => break,
            }
        }
        found
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

/// Checks that a cover really partitions the cube.
///
/// Violations are bugs in the exact-cover engine, not recoverable input
/// errors, so they abort with a diagnostic.
fn verify_cover(solution: &[Piece]) {
    assert_eq!(
        solution.len(),
        NUM_PIECES,
        "cover has {} pieces, expected {NUM_PIECES}",
        solution.len()
    );

    let mut covered = [false; NUM_CELLS];
    for piece in solution {
        for &cell in piece {
            assert!(in_bounds(cell), "cover contains out-of-bounds cell {cell:?}");
            let id = crate::grid::point_to_index(cell.0, cell.1, cell.2);
            assert!(!covered[id], "cover places two pieces on cell {cell:?}");
            covered[id] = true;
        }
    }
    // 54 pieces x 4 distinct in-bounds cells leave no gap to check
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::rotation_matrices;
    use crate::symmetry::canonical_form;

    #[test]
    fn test_first_raw_cover_partitions_the_cube() {
        let placements = enumerate_placements();
        let mut matrix = Matrix::new(NUM_CELLS);
        for placement in &placements {
            matrix.add_row(&placement.cells);
        }

        let rows = matrix.solutions().next().expect("the cube is tileable");
        assert_eq!(rows.len(), NUM_PIECES);

        let mut covered = [false; NUM_CELLS];
        for &row in &rows {
            for id in placements[row].cells {
                assert!(!covered[id], "cell {id} covered twice");
                covered[id] = true;
            }
        }
        assert!(covered.iter().all(|&c| c));
    }

    #[test]
    fn test_first_unique_solutions_are_canonically_distinct() {
        let mut solver = Solver::new();
        let found = solver.solve(Some(5));
        assert_eq!(found.len(), 5);
        assert_eq!(solver.unique_count(), 5);

        let rotations = rotation_matrices();
        let keys: Vec<_> = found
            .iter()
            .map(|solution| canonical_form(&rotations, solution))
            .collect();
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a, b, "two accepted solutions share a canonical form");
            }
        }
    }

    #[test]
    fn test_solve_respects_the_limit_and_the_set_grows() {
        let mut solver = Solver::new();
        assert_eq!(solver.solve(Some(2)).len(), 2);
        assert_eq!(solver.unique_count(), 2);
        assert!(solver.raw_count() >= 2);

        // pulling again continues from where the stream stopped
        let third = solver.next_unique().expect("more solutions exist");
        assert_eq!(solver.unique_count(), 3);
        assert_eq!(solver.solutions().get(2), Some(&third));
    }

    #[test]
    fn test_verify_accepts_a_real_cover() {
        let mut solver = Solver::new();
        let solution = solver.next_unique().expect("the cube is tileable");
        verify_cover(&solution);
    }

    #[test]
    #[should_panic(expected = "cover has")]
    fn test_verify_rejects_wrong_piece_count() {
        verify_cover(&[[(0, 0, 0), (1, 0, 0), (2, 0, 0), (1, 1, 0)]]);
    }
}
