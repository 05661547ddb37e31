//! Enumeration of every legal T-piece placement in the cube.
//!
//! A placement is one orientation translated to an in-bounds position,
//! recorded as the ascending 4-tuple of the cell ids it occupies. Row ids
//! into this list are stable across runs: orientations are generated in a
//! fixed order and translations are walked x, then y, then z.

use rustc_hash::FxHashSet;

use crate::geometry::all_orientations;
use crate::grid::point_to_index;
use crate::pieces::{Piece, CUBE_SIZE};

/// Total number of legal placements: 12 orientations, each sliding over
/// a 4 x 5 x 6 box of translations.
pub const NUM_PLACEMENTS: usize = 1440;

/// One legal placement: the four cell ids it covers, strictly ascending.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Placement {
    pub cells: [usize; 4],
}

impl Placement {
    /// The placement's cells as absolute cube coordinates.
    pub fn to_piece(self) -> Piece {
        self.cells.map(crate::grid::index_to_point)
    }
}

/// Enumerates all legal placements in deterministic order.
///
/// For each orientation the translation range per axis is bounded by the
/// orientation's extent, so every translated cell is in bounds by
/// construction. Duplicate tuples would indicate a geometry bug.
pub fn enumerate_placements() -> Vec<Placement> {
    let orientations = all_orientations();
    let mut placements = Vec::with_capacity(NUM_PLACEMENTS);
    let mut seen: FxHashSet<[usize; 4]> = FxHashSet::default();

    for cells in &orientations {
        let max_x = cells.iter().map(|&(x, _, _)| x).max().unwrap();
        let max_y = cells.iter().map(|&(_, y, _)| y).max().unwrap();
        let max_z = cells.iter().map(|&(_, _, z)| z).max().unwrap();

        for dz in 0..CUBE_SIZE - max_z {
            for dy in 0..CUBE_SIZE - max_y {
                for dx in 0..CUBE_SIZE - max_x {
                    let mut ids = cells.map(|(x, y, z)| point_to_index(x + dx, y + dy, z + dz));
                    ids.sort_unstable();

                    assert!(
                        seen.insert(ids),
                        "duplicate placement tuple {ids:?} across orientations"
                    );
                    placements.push(Placement { cells: ids });
                }
            }
        }
    }

    assert_eq!(
        placements.len(),
        NUM_PLACEMENTS,
        "placement count must be fixed by the geometry"
    );
    placements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::NUM_CELLS;

    #[test]
    fn test_placement_count_is_locked() {
        assert_eq!(enumerate_placements().len(), 1440);
    }

    #[test]
    fn test_placements_are_ascending_and_in_range() {
        for placement in enumerate_placements() {
            let cells = placement.cells;
            assert!(cells[0] < cells[1] && cells[1] < cells[2] && cells[2] < cells[3]);
            assert!(cells[3] < NUM_CELLS);
        }
    }

    #[test]
    fn test_placement_order_is_deterministic() {
        assert_eq!(enumerate_placements(), enumerate_placements());
    }

    #[test]
    fn test_every_cell_is_coverable() {
        let mut covered = [false; NUM_CELLS];
        for placement in enumerate_placements() {
            for id in placement.cells {
                covered[id] = true;
            }
        }
        assert!(covered.iter().all(|&c| c), "some cell appears in no placement");
    }

    #[test]
    fn test_placement_roundtrips_to_coordinates() {
        let placements = enumerate_placements();
        let piece = placements[0].to_piece();
        let mut ids = piece.map(|(x, y, z)| point_to_index(x, y, z));
        ids.sort_unstable();
        assert_eq!(ids, placements[0].cells);
    }
}
