//! Piece definition and coordinate types for the T-tetracube puzzle.
//!
//! The puzzle fills a 6x6x6 cube with 54 identical T-tetracubes. A piece
//! is a set of unit cube positions; the canonical T is centered on its
//! stem so that rotations act symmetrically around it.

/// A 3D lattice point.
pub type Coord = (i32, i32, i32);

/// One placed piece: its four cells in absolute cube coordinates.
pub type Piece = [Coord; 4];

/// A complete tiling: 54 pieces partitioning the cube.
pub type Solution = Vec<Piece>;

/// Edge length of the cube.
pub const CUBE_SIZE: i32 = 6;

/// Total number of cells in the cube.
pub const NUM_CELLS: usize = 216;

/// Cells per piece.
pub const PIECE_CELLS: usize = 4;

/// Pieces per solution: 216 / 4.
pub const NUM_PIECES: usize = 54;

/// The canonical T-tetracube: a three-cell bar along x with a stem at +y.
///
/// The bar is centered on the origin so the stem cell sits directly above
/// the rotation center; orientations are normalized afterwards.
pub const T_TETRACUBE: [Coord; PIECE_CELLS] = [(0, 0, 0), (1, 0, 0), (-1, 0, 0), (0, 1, 0)];

const _: () = assert!(NUM_CELLS == (CUBE_SIZE * CUBE_SIZE * CUBE_SIZE) as usize);
const _: () = assert!(NUM_PIECES * PIECE_CELLS == NUM_CELLS);

/// Returns true if a point lies inside the cube.
#[inline]
pub fn in_bounds((x, y, z): Coord) -> bool {
    (0..CUBE_SIZE).contains(&x) && (0..CUBE_SIZE).contains(&y) && (0..CUBE_SIZE).contains(&z)
}
