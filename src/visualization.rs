//! Interactive kiss3d viewer for browsing tilings.
//!
//! Arrow keys page through the loaded tilings. Holding W drifts every
//! piece away from the cube center along its own direction so the
//! interior becomes visible; S drifts them back and R snaps the cube
//! together again.

use kiss3d::prelude::*;

use tcube::pieces::{CUBE_SIZE, NUM_PIECES};
use tcube::Solution;

/// How far the cube moves apart per frame while W or S is held.
const DRIFT_SPEED: f32 = 0.1;
/// Upper bound on the drift so pieces never leave the camera orbit.
const DRIFT_MAX: f32 = 8.0;
/// Edge length of a rendered cell; slightly under 1 leaves seams.
const UNIT: f32 = 0.9;

/// Returns a distinct color for a piece index by spacing hues evenly.
///
/// With 54 pieces neighbouring hues are close; saturation and lightness
/// alternate by index so adjacent pieces still separate visually.
fn piece_color(piece_index: usize) -> Color {
    let hue = (piece_index as f32) / (NUM_PIECES as f32);
    let s: f32 = if piece_index % 2 == 0 { 0.8 } else { 0.6 };
    let l: f32 = if piece_index % 3 == 0 { 0.5 } else { 0.4 };

    // HSL to RGB
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h_prime = hue * 6.0;
    let x = c * (1.0 - (h_prime % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h_prime as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Color::new(r + m, g + m, b + m, 1.0)
}

/// One rendered cell, with everything the per-frame update needs.
struct RenderedCube {
    node: SceneNode3d,
    /// Resting position with the cube assembled.
    home: Vec3,
    /// Unit vector this cell travels along while the cube is spread out.
    drift: Vec3,
}

/// Populates the scene with one tiling and returns its cells.
///
/// The lattice is recentered on the origin. Each piece gets a single
/// drift direction, from the cube center through the piece centroid, so
/// its four cells stay together while spreading.
fn build_scene(scene: &mut SceneNode3d, tiling: &Solution) -> Vec<RenderedCube> {
    let half = (CUBE_SIZE as f32 - 1.0) / 2.0;
    let center = Vec3::new(half, half, half);

    let mut cubes = Vec::with_capacity(tiling.len() * 4);
    for (piece_index, piece) in tiling.iter().enumerate() {
        let centroid = piece.iter().fold(Vec3::ZERO, |acc, &(x, y, z)| {
            acc + Vec3::new(x as f32, y as f32, z as f32)
        }) / piece.len() as f32;
        let drift = (centroid - center).normalize_or_zero();

        for &(x, y, z) in piece {
            let home = Vec3::new(x as f32 - half, y as f32 - half, z as f32 - half);
            let node = scene
                .add_cube(UNIT, UNIT, UNIT)
                .set_color(piece_color(piece_index))
                .set_position(home);
            cubes.push(RenderedCube { node, home, drift });
        }
    }

    cubes
}

fn viewer_title(current: usize, total: usize) -> String {
    format!(
        "Tiling {}/{} | arrows switch, W/S pull apart, R snap back",
        current + 1,
        total
    )
}

/// Opens the viewer on a batch of tilings.
pub fn display(tilings: Vec<Solution>) {
    pollster::block_on(display_async(tilings));
}

async fn display_async(tilings: Vec<Solution>) {
    if tilings.is_empty() {
        println!("Nothing to display: no tilings loaded");
        return;
    }

    let mut window = Window::new(&viewer_title(0, tilings.len())).await;

    let mut camera = OrbitCamera3d::default();
    camera.set_dist(CUBE_SIZE as f32 * 2.5);

    let mut scene = SceneNode3d::empty();
    scene
        .add_light(Light::point(100.0))
        .set_position(Vec3::new(10.0, 10.0, 10.0));

    let mut current = 0;
    let mut cubes = build_scene(&mut scene, &tilings[current]);

    // signed while W or S is held, zero otherwise
    let mut drift_dir: f32 = 0.0;
    let mut spread: f32 = 0.0;

    loop {
        let mut switched = false;

        for event in window.events().iter() {
            if let kiss3d::event::WindowEvent::Key(key, action, _) = event.value {
                use kiss3d::event::{Action, Key};
                match (key, action) {
                    (Key::W, Action::Press) => drift_dir = 1.0,
                    (Key::S, Action::Press) => drift_dir = -1.0,
                    // releasing a key only cancels its own direction
                    (Key::W, Action::Release) => drift_dir = drift_dir.min(0.0),
                    (Key::S, Action::Release) => drift_dir = drift_dir.max(0.0),
                    (Key::R, Action::Press) => spread = 0.0,
                    (Key::Right, Action::Press) => {
                        current = (current + 1) % tilings.len();
                        switched = true;
                    }
                    (Key::Left, Action::Press) => {
                        current = (current + tilings.len() - 1) % tilings.len();
                        switched = true;
                    }
                    _ => {}
                }
            }
        }

        spread = (spread + drift_dir * DRIFT_SPEED).clamp(0.0, DRIFT_MAX);

        if switched {
            // tear the old tiling out of the scene before adding the next
            for mut cube in cubes.drain(..) {
                cube.node.remove();
            }
            cubes = build_scene(&mut scene, &tilings[current]);
            window.set_title(&viewer_title(current, tilings.len()));
        }

        for cube in &mut cubes {
            cube.node.set_position(cube.home + cube.drift * spread);
        }

        if !window.render_3d(&mut scene, &mut camera).await {
            break;
        }
    }
}
