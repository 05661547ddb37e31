//! Step-by-step assembly ordering for finished solutions.
//!
//! A raw solution lists its pieces in search-discovery order, which is
//! useless for building the cube by hand. This module re-sequences the 54
//! pieces corner-first so that every step is gravity-supported and can be
//! slid in from outside the cube, and emits per-step metadata for guided
//! assembly.

use std::collections::BTreeMap;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::pieces::{in_bounds, Coord, Piece};

/// Weight of the piece's lowest layer in the placement score.
const LAYER_WEIGHT: f64 = 1000.0;
/// Weight of the distance from the origin corner.
const CORNER_WEIGHT: f64 = 10.0;
/// Reward per face contact with already-placed cells.
const CONTACT_WEIGHT: f64 = 5.0;

/// Metadata for one assembly step.
#[derive(Clone, Debug, PartialEq)]
pub struct TutorialStep {
    /// 1-based step number.
    pub step: usize,
    /// 1-based index of the piece in the ordered sequence.
    pub piece: usize,
    /// The piece's four cells.
    pub cells: Piece,
    /// The piece rests on the floor of the cube.
    pub grounded: bool,
    /// The piece's lowest z layer.
    pub layer: i32,
    /// Distance from the origin corner to the nearest cell, 2 decimals.
    pub corner_distance: f64,
    /// 1-based indices of earlier pieces sharing a face, ascending.
    pub touches: Vec<usize>,
    /// The piece can be reached from outside at placement time.
    pub accessible: bool,
    /// Human-readable placement hint.
    pub tip: String,
}

/// Orientation class of a piece, by which coordinate is degenerate.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OrientationClass {
    /// All cells share one z value.
    Flat,
    /// All cells share one y value.
    WallXz,
    /// All cells share one x value.
    WallYz,
    /// Cells vary in all three coordinates.
    ThreeD,
}

/// Classifies a piece by its degenerate coordinate, z before y before x.
pub fn classify_orientation(piece: &Piece) -> OrientationClass {
    if piece.iter().all(|&(_, _, z)| z == piece[0].2) {
        OrientationClass::Flat
    } else if piece.iter().all(|&(_, y, _)| y == piece[0].1) {
        OrientationClass::WallXz
    } else if piece.iter().all(|&(x, _, _)| x == piece[0].0) {
        OrientationClass::WallYz
    } else {
        OrientationClass::ThreeD
    }
}

/// Per-class piece counts for a solution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrientationCounts {
    pub flat: usize,
    pub wall_xz: usize,
    pub wall_yz: usize,
    pub three_d: usize,
}

/// Aggregate statistics over an ordered solution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Statistics {
    pub total_pieces: usize,
    /// Piece count per lowest-z layer.
    pub by_layer: BTreeMap<i32, usize>,
    pub orientations: OrientationCounts,
}

/// A full tutorial payload for one solution.
pub struct Tutorial {
    pub total_pieces: usize,
    pub statistics: Statistics,
    pub ordered_pieces: Vec<Piece>,
    pub steps: Vec<TutorialStep>,
}

/// Builds the complete tutorial for a solution.
pub fn build_tutorial(solution: &[Piece]) -> Tutorial {
    let ordered = order_for_assembly(solution);
    let steps = tutorial_steps(&ordered);
    let statistics = analyze(&ordered);
    Tutorial {
        total_pieces: ordered.len(),
        statistics,
        ordered_pieces: ordered,
        steps,
    }
}

fn min_z(piece: &Piece) -> i32 {
    piece.iter().map(|&(_, _, z)| z).min().unwrap()
}

fn min_x(piece: &Piece) -> i32 {
    piece.iter().map(|&(x, _, _)| x).min().unwrap()
}

fn min_y(piece: &Piece) -> i32 {
    piece.iter().map(|&(_, y, _)| y).min().unwrap()
}

/// Squared distance from the origin to the piece's nearest cell.
fn corner_distance_sq(piece: &Piece) -> i32 {
    piece
        .iter()
        .map(|&(x, y, z)| x * x + y * y + z * z)
        .min()
        .unwrap()
}

/// Euclidean distance from the origin to the piece's nearest cell.
fn corner_distance(piece: &Piece) -> f64 {
    (corner_distance_sq(piece) as f64).sqrt()
}

const FACE_DIRECTIONS: [Coord; 6] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
];

/// Counts face contacts between a piece and the placed cells.
fn contact_count(piece: &Piece, placed: &FxHashSet<Coord>) -> usize {
    piece
        .iter()
        .flat_map(|&(x, y, z)| {
            FACE_DIRECTIONS
                .iter()
                .map(move |&(dx, dy, dz)| (x + dx, y + dy, z + dz))
        })
        .filter(|neighbor| placed.contains(neighbor))
        .count()
}

/// A piece will not fall: it rests on the floor, or every cell of its
/// lowest layer sits on an already-placed cell.
fn is_gravity_supported(piece: &Piece, placed: &FxHashSet<Coord>) -> bool {
    let lowest = min_z(piece);
    lowest == 0
        || piece
            .iter()
            .filter(|&&(_, _, z)| z == lowest)
            .all(|&(x, y, z)| placed.contains(&(x, y, z - 1)))
}

/// Walks from `cell` in direction `dir` and reports whether the line of
/// sight to the outside of the cube is free of placed cells.
fn ray_is_clear(placed: &FxHashSet<Coord>, cell: Coord, dir: Coord) -> bool {
    let (mut x, mut y, mut z) = (cell.0 + dir.0, cell.1 + dir.1, cell.2 + dir.2);
    while in_bounds((x, y, z)) {
        if placed.contains(&(x, y, z)) {
            return false;
        }
        x += dir.0;
        y += dir.1;
        z += dir.2;
    }
    true
}

/// A piece can be slid in from outside along +x, +y or +z.
fn is_accessible(piece: &Piece, placed: &FxHashSet<Coord>) -> bool {
    placed.is_empty()
        || piece.iter().any(|&cell| {
            [(1, 0, 0), (0, 1, 0), (0, 0, 1)]
                .iter()
                .any(|&dir| ray_is_clear(placed, cell, dir))
        })
}

/// Placement preference: lower layers first, then closer to the origin
/// corner, rewarding contact with what is already built.
fn placement_score(piece: &Piece, placed: &FxHashSet<Coord>) -> f64 {
    LAYER_WEIGHT * min_z(piece) as f64 + CORNER_WEIGHT * corner_distance(piece)
        - CONTACT_WEIGHT * contact_count(piece, placed) as f64
        + (min_x(piece) + min_y(piece)) as f64
}

/// Picks the next piece to place from the remaining ones.
///
/// Prefers the admissible piece with the lowest score; if nothing is
/// admissible (a solution can wedge pieces that only fit early), falls
/// back to the lowest, then corner-closest piece. Ties keep the first
/// candidate in iteration order.
fn pick_next(remaining: &[Piece], placed: &FxHashSet<Coord>) -> usize {
    let mut best: Option<(usize, f64)> = None;
    for (index, piece) in remaining.iter().enumerate() {
        if !is_gravity_supported(piece, placed) || !is_accessible(piece, placed) {
            continue;
        }
        let score = placement_score(piece, placed);
        if best.map_or(true, |(_, s)| score < s) {
            best = Some((index, score));
        }
    }
    if let Some((index, _)) = best {
        return index;
    }

    let mut fallback = 0;
    let mut fallback_key = (min_z(&remaining[0]), corner_distance_sq(&remaining[0]));
    for (index, piece) in remaining.iter().enumerate().skip(1) {
        let key = (min_z(piece), corner_distance_sq(piece));
        if key < fallback_key {
            fallback = index;
            fallback_key = key;
        }
    }
    fallback
}

/// Re-sequences a solution's pieces into a buildable order.
pub fn order_for_assembly(solution: &[Piece]) -> Vec<Piece> {
    let mut remaining: Vec<Piece> = solution.to_vec();
    let mut placed: FxHashSet<Coord> = FxHashSet::default();
    let mut ordered = Vec::with_capacity(solution.len());

    while !remaining.is_empty() {
        let index = pick_next(&remaining, &placed);
        let piece = remaining.remove(index);
        placed.extend(piece.iter().copied());
        ordered.push(piece);
    }

    ordered
}

fn format_touch_list(touches: &[usize]) -> String {
    let items: Vec<String> = touches.iter().map(usize::to_string).collect();
    items.join(", ")
}

/// Emits per-step metadata for an already-ordered solution.
pub fn tutorial_steps(ordered: &[Piece]) -> Vec<TutorialStep> {
    let mut placed: FxHashSet<Coord> = FxHashSet::default();
    let mut owner: FxHashMap<Coord, usize> = FxHashMap::default();
    let mut steps = Vec::with_capacity(ordered.len());

    for (index, piece) in ordered.iter().enumerate() {
        let step = index + 1;
        let layer = min_z(piece);
        let grounded = layer == 0;
        let distance = corner_distance(piece);
        let accessible = is_accessible(piece, &placed);

        let mut touches: Vec<usize> = piece
            .iter()
            .flat_map(|&(x, y, z)| {
                FACE_DIRECTIONS
                    .iter()
                    .map(move |&(dx, dy, dz)| (x + dx, y + dy, z + dz))
            })
            .filter_map(|neighbor| owner.get(&neighbor).copied())
            .collect();
        touches.sort_unstable();
        touches.dedup();

        let tip = if step == 1 {
            "Start in the corner closest to the origin".to_string()
        } else if grounded && distance < 3.0 {
            "Expanding from the corner".to_string()
        } else if grounded {
            "Ground level piece".to_string()
        } else if !touches.is_empty() {
            format!(
                "Layer z={layer}: connects to piece(s) {}",
                format_touch_list(&touches)
            )
        } else {
            format!("Layer z={layer}: place carefully")
        };

        steps.push(TutorialStep {
            step,
            piece: step,
            cells: *piece,
            grounded,
            layer,
            corner_distance: (distance * 100.0).round() / 100.0,
            touches,
            accessible,
            tip,
        });

        for &cell in piece {
            placed.insert(cell);
            owner.insert(cell, step);
        }
    }

    steps
}

/// Aggregates layer and orientation statistics over an ordered solution.
pub fn analyze(ordered: &[Piece]) -> Statistics {
    let mut by_layer: BTreeMap<i32, usize> = BTreeMap::new();
    let mut orientations = OrientationCounts::default();

    for piece in ordered {
        *by_layer.entry(min_z(piece)).or_insert(0) += 1;
        match classify_orientation(piece) {
            OrientationClass::Flat => orientations.flat += 1,
            OrientationClass::WallXz => orientations.wall_xz += 1,
            OrientationClass::WallYz => orientations.wall_yz += 1,
            OrientationClass::ThreeD => orientations.three_d += 1,
        }
    }

    Statistics {
        total_pieces: ordered.len(),
        by_layer,
        orientations,
    }
}
