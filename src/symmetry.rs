//! Canonical forms and rotational deduplication of solutions.
//!
//! Two tilings are the same up to symmetry iff one is a whole-cube
//! rotation of the other. The canonical form of a solution is the
//! lexicographically smallest sorted-piece representation over the 24
//! cube rotations; the solution set keys on that form and keeps the first
//! representative of each equivalence class.

use rustc_hash::FxHashSet;

use crate::geometry::{rotation_matrices, Rotation};
use crate::grid::{index_to_point, rotate_about_center, rotate_piece};
use crate::pieces::{in_bounds, Piece, Solution, NUM_CELLS};

/// A solution with every piece sorted and the piece list sorted.
pub type CanonicalForm = Vec<Piece>;

/// Sorts each piece's cells and then the piece list itself.
fn sorted_form(solution: &[Piece]) -> CanonicalForm {
    let mut pieces: Vec<Piece> = solution
        .iter()
        .map(|piece| {
            let mut cells = *piece;
            cells.sort_unstable();
            cells
        })
        .collect();
    pieces.sort_unstable();
    pieces
}

/// Computes the canonical form of a solution.
///
/// Applies every rotation of the whole cube, sorts the result, and keeps
/// the lexicographic minimum. Which rotation attains the minimum is
/// irrelevant; only the key matters.
pub fn canonical_form(rotations: &[Rotation], solution: &[Piece]) -> CanonicalForm {
    rotations
        .iter()
        .map(|m| {
            let rotated: Vec<Piece> = solution.iter().map(|piece| rotate_piece(m, piece)).collect();
            sorted_form(&rotated)
        })
        .min()
        .expect("rotation group is never empty")
}

/// The growing set of solutions that are distinct up to rotation.
pub struct SolutionSet {
    rotations: Vec<Rotation>,
    seen: FxHashSet<CanonicalForm>,
    representatives: Vec<Solution>,
}

impl SolutionSet {
    pub fn new() -> Self {
        let rotations = rotation_matrices();

        // centered rotation must keep every cell inside the cube
        for m in &rotations {
            for id in 0..NUM_CELLS {
                let rotated = rotate_about_center(m, index_to_point(id));
                assert!(
                    in_bounds(rotated),
                    "rotation {m:?} moved cell {id} outside the cube"
                );
            }
        }

        SolutionSet {
            rotations,
            seen: FxHashSet::default(),
            representatives: Vec::new(),
        }
    }

    /// Inserts a solution if its canonical form is new.
    ///
    /// Returns `true` and stores the given representative on first sight
    /// of the equivalence class, `false` otherwise.
    pub fn add(&mut self, solution: Solution) -> bool {
        let key = canonical_form(&self.rotations, &solution);
        if self.seen.insert(key) {
            self.representatives.push(solution);
            true
        } else {
            false
        }
    }

    /// Number of distinct solutions seen so far.
    pub fn len(&self) -> usize {
        self.representatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.representatives.is_empty()
    }

    /// The stored representative for a solution id, if it exists.
    pub fn get(&self, id: usize) -> Option<&Solution> {
        self.representatives.get(id)
    }

    /// Representatives in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &Solution> {
        self.representatives.iter()
    }

    /// The rotation group shared by all canonicalization in this set.
    pub fn rotations(&self) -> &[Rotation] {
        &self.rotations
    }
}

impl Default for SolutionSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_piece_solution() -> Solution {
        vec![[(0, 0, 0), (1, 0, 0), (2, 0, 0), (1, 1, 0)]]
    }

    fn rotate_solution(m: &Rotation, solution: &[Piece]) -> Solution {
        solution.iter().map(|piece| rotate_piece(m, piece)).collect()
    }

    #[test]
    fn test_canonical_form_is_rotation_invariant() {
        let rotations = rotation_matrices();
        let solution = single_piece_solution();
        let canonical = canonical_form(&rotations, &solution);

        for m in &rotations {
            let rotated = rotate_solution(m, &solution);
            assert_eq!(
                canonical_form(&rotations, &rotated),
                canonical,
                "rotation {m:?} changed the canonical form"
            );
        }
    }

    #[test]
    fn test_canonical_form_ignores_piece_and_cell_order() {
        let rotations = rotation_matrices();
        let a = vec![
            [(0, 0, 0), (1, 0, 0), (2, 0, 0), (1, 1, 0)],
            [(0, 5, 5), (1, 5, 5), (2, 5, 5), (1, 4, 5)],
        ];
        let mut b = vec![a[1], a[0]];
        b[0].reverse();
        assert_eq!(canonical_form(&rotations, &a), canonical_form(&rotations, &b));
    }

    #[test]
    fn test_solution_set_rejects_rotated_duplicates() {
        let mut set = SolutionSet::new();
        let solution = single_piece_solution();
        assert!(set.add(solution.clone()));
        assert_eq!(set.len(), 1);

        let rotations = rotation_matrices();
        for m in &rotations[1..] {
            let rotated = rotate_solution(m, &solution);
            assert!(!set.add(rotated), "rotation {m:?} slipped past the set");
        }
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_solution_set_keeps_first_seen_representative() {
        let mut set = SolutionSet::new();
        let solution = single_piece_solution();
        set.add(solution.clone());

        let rotations = rotation_matrices();
        set.add(rotate_solution(&rotations[5], &solution));
        assert_eq!(set.get(0), Some(&solution));
        assert_eq!(set.get(1), None);
    }

    #[test]
    fn test_distinct_solutions_both_enter() {
        let mut set = SolutionSet::new();
        assert!(set.add(single_piece_solution()));
        // a genuinely different arrangement, not any rotation of the first
        assert!(set.add(vec![[(0, 0, 0), (1, 0, 0), (2, 0, 0), (1, 0, 1)]]));
        assert_eq!(set.len(), 2);
    }
}
