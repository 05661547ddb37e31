//! Cell indexing and whole-cube transforms for the 6x6x6 grid.
//!
//! Cell ids follow the external contract `id = x + 6*y + 36*z`; every
//! payload and every exact-cover column uses this mapping. Whole-cube
//! rotation spins the grid around its center point `(2.5, 2.5, 2.5)`.

use crate::geometry::{apply, Rotation};
use crate::pieces::{Coord, Piece, CUBE_SIZE, NUM_CELLS};

/// Converts (x, y, z) coordinates to a linear cell id.
///
/// Id order is z-major: `id = x + 6*y + 36*z`.
#[inline(always)]
pub const fn point_to_index(x: i32, y: i32, z: i32) -> usize {
    x as usize + (y as usize) * 6 + (z as usize) * 36
}

/// Converts a linear cell id back to (x, y, z) coordinates.
#[inline(always)]
pub const fn index_to_point(id: usize) -> Coord {
    ((id % 6) as i32, ((id / 6) % 6) as i32, (id / 36) as i32)
}

/// Rotates a cell around the cube center `(2.5, 2.5, 2.5)`.
///
/// Works in doubled coordinates to avoid the half-integer center:
/// `c' = (R * (2c - 5) + 5) / 2`. For the 24 cube rotations the doubled
/// result is always odd, so the division back is exact.
#[inline]
pub fn rotate_about_center(m: &Rotation, (x, y, z): Coord) -> Coord {
    let doubled = (2 * x - 5, 2 * y - 5, 2 * z - 5);
    let (rx, ry, rz) = apply(m, doubled);
    ((rx + 5) / 2, (ry + 5) / 2, (rz + 5) / 2)
}

/// Rotates every cell of a piece around the cube center and re-sorts.
#[inline]
pub fn rotate_piece(m: &Rotation, piece: &Piece) -> Piece {
    let mut rotated = piece.map(|cell| rotate_about_center(m, cell));
    rotated.sort_unstable();
    rotated
}

/// Converts a solution (list of pieces) to a flat grid.
///
/// Each cell contains a 1-based piece number, or 0 for empty.
pub fn solution_to_grid(solution: &[Piece]) -> [u8; NUM_CELLS] {
    let mut grid = [0u8; NUM_CELLS];

    for (piece_index, piece) in solution.iter().enumerate() {
        let piece_number = (piece_index + 1) as u8;
        for &(x, y, z) in piece {
            grid[point_to_index(x, y, z)] = piece_number;
        }
    }

    grid
}

/// Display character for a 1-based piece number.
///
/// 1-9 as digits, 10-35 as 'A'-'Z', 36 and up as 'a'-'z'; 54 pieces fit.
fn piece_char(piece_number: u8) -> char {
    match piece_number {
        0 => '.',
        1..=9 => char::from(b'0' + piece_number),
        10..=35 => char::from(b'A' + piece_number - 10),
        _ => char::from(b'a' + piece_number - 36),
    }
}

/// Formats a solution as a human-readable string.
///
/// Displays the six z-slices side by side, rows from y=5 down to y=0.
pub fn format_solution(solution: &[Piece]) -> String {
    let grid = solution_to_grid(solution);
    let dim = CUBE_SIZE as usize;

    let mut output = String::new();
    for z in 0..dim {
        if z > 0 {
            output.push_str("  ");
        }
        output.push_str(&format!("z={z:<6}"));
    }
    output.push('\n');

    for y in (0..dim).rev() {
        for z in 0..dim {
            if z > 0 {
                output.push_str("  ");
            }
            for x in 0..dim {
                output.push(piece_char(grid[point_to_index(x as i32, y as i32, z as i32)]));
            }
        }
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::rotation_matrices;
    use crate::pieces::in_bounds;

    #[test]
    fn test_index_roundtrip_all_cells() {
        for id in 0..NUM_CELLS {
            let (x, y, z) = index_to_point(id);
            assert!(in_bounds((x, y, z)), "id {id} decoded out of bounds");
            assert_eq!(point_to_index(x, y, z), id, "roundtrip failed for id {id}");
        }
    }

    #[test]
    fn test_index_convention_is_z_major() {
        assert_eq!(point_to_index(1, 2, 4), 157);
        assert_eq!(index_to_point(157), (1, 2, 4));
        assert_eq!(point_to_index(5, 0, 0), 5);
        assert_eq!(point_to_index(0, 1, 0), 6);
        assert_eq!(point_to_index(0, 0, 1), 36);
    }

    #[test]
    fn test_centered_rotation_stays_in_bounds() {
        for m in &rotation_matrices() {
            for id in 0..NUM_CELLS {
                let rotated = rotate_about_center(m, index_to_point(id));
                assert!(in_bounds(rotated), "rotation {m:?} moved cell {id} out of bounds");
            }
        }
    }

    #[test]
    fn test_centered_rotations_are_permutations() {
        for m in &rotation_matrices() {
            let mut seen = [false; NUM_CELLS];
            for id in 0..NUM_CELLS {
                let (x, y, z) = rotate_about_center(m, index_to_point(id));
                let dest = point_to_index(x, y, z);
                assert!(!seen[dest], "rotation {m:?} maps two cells to {dest}");
                seen[dest] = true;
            }
        }
    }

    #[test]
    fn test_format_solution_marks_piece_cells() {
        let solution = vec![[(0, 0, 0), (1, 0, 0), (2, 0, 0), (1, 1, 0)]];
        let text = format_solution(&solution);
        // z=0 slice, bottom row (y=0) starts with the bar "111"
        let bottom = text.lines().last().unwrap();
        assert!(bottom.starts_with("111..."), "unexpected bottom row: {bottom}");
        // four piece cells, counted below the slice header line
        let body: String = text.lines().skip(1).collect();
        assert_eq!(body.matches('1').count(), 4);
    }

    #[test]
    fn test_piece_char_covers_all_54_pieces() {
        let labels: Vec<char> = (1..=54).map(piece_char).collect();
        let mut unique = labels.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), 54);
        assert_eq!(labels[0], '1');
        assert_eq!(labels[9], 'A');
        assert_eq!(labels[35], 'a');
    }
}
