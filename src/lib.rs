//! T-Tetracube Cube Solver Library
//!
//! Enumerates, up to cube rotations, the tilings of a 6x6x6 cube by 54
//! identical T-tetracubes. An exact-cover formulation (Algorithm X over
//! dancing links) produces raw tilings lazily; canonical forms over the
//! 24-element cube rotation group reduce them to distinct solutions; a
//! tutorial pass reorders a finished tiling into a buildable sequence.

pub mod dlx;
pub mod geometry;
pub mod grid;
pub mod persistence;
pub mod pieces;
pub mod placements;
pub mod solver;
pub mod symmetry;
pub mod tutorial;

pub use pieces::{Coord, Piece, Solution};
pub use solver::Solver;
