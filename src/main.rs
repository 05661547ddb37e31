//! T-Tetracube Cube Solver
//!
//! Enumerates the distinct ways to fill a 6x6x6 cube with 54 identical
//! T-tetracubes, up to rotations of the whole cube. Solutions can be
//! saved, replayed in an interactive 3D viewer, exported as JSON, or
//! turned into a step-by-step assembly tutorial.

mod visualization;

use clap::{Parser, Subcommand};

use tcube::tutorial::{build_tutorial, Tutorial};
use tcube::{persistence, pieces, Piece, Solution, Solver};

/// Solves the 6x6x6 T-tetracube packing puzzle.
#[derive(Parser)]
#[command(name = "tcube")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Solve the puzzle and save solutions to disk.
    Solve {
        /// Stop after this many unique solutions (0 = run to exhaustion).
        #[arg(long, default_value_t = 50)]
        max: usize,
    },
    /// Display saved solutions in an interactive 3D viewer.
    Display,
    /// Show the number of saved solutions.
    Count,
    /// Print the assembly tutorial for a saved solution as JSON.
    Tutorial {
        /// 0-based id of the saved solution.
        id: usize,
    },
    /// Export saved solutions as JSON.
    Export,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Solve { max }) => {
            run_solve(max);
        }
        Some(Command::Display) => run_display(),
        Some(Command::Count) => run_count(),
        Some(Command::Tutorial { id }) => run_tutorial(id),
        Some(Command::Export) => run_export(),
        None => {
            // default: solve a batch and open it in the viewer
            let solutions = run_solve(50);
            if !solutions.is_empty() {
                println!("Opening viewer: arrows switch, W/S pull apart, R snap back");
                visualization::display(solutions);
            }
        }
    }
}

/// Pulls unique solutions up to `max`, saves them, and returns them.
fn run_solve(max: usize) -> Vec<Solution> {
    let limit = if max == 0 { None } else { Some(max) };
    let mut solver = Solver::new();
    let mut solutions = Vec::new();

    while limit.map_or(true, |n| solutions.len() < n) {
        match solver.next_unique() {
            Some(solution) => {
                solutions.push(solution);
                if solutions.len() % 10 == 0 {
                    println!(
                        "  {} unique solutions ({} raw covers examined)",
                        solutions.len(),
                        solver.raw_count()
                    );
                }
            }
            None => break,
        }
    }

    println!(
        "Found {} unique solutions ({} raw covers examined)",
        solutions.len(),
        solver.raw_count()
    );

    if let Err(e) = persistence::save(&solutions) {
        eprintln!("Could not write solution files: {}", e);
    } else {
        println!("Saved to solutions.bin (and solutions.txt for reading)");
    }

    solutions
}

/// Opens the viewer on whatever a previous solve saved.
fn run_display() {
    let Some(solutions) = persistence::load_all() else {
        eprintln!("Nothing saved yet: run 'tcube solve' to generate solutions");
        return;
    };
    println!(
        "Showing {} saved tilings (arrows switch, W/S pull apart, R snap back)",
        solutions.len()
    );
    visualization::display(solutions);
}

/// Reports how many tilings the save file holds.
fn run_count() {
    match persistence::count() {
        Some(n) => println!("{n} tilings saved"),
        None => eprintln!("Nothing saved yet: run 'tcube solve' to generate solutions"),
    }
}

/// Prints the assembly tutorial for one saved solution as JSON.
fn run_tutorial(id: usize) {
    let Some(solutions) = persistence::load_all() else {
        eprintln!("Nothing saved yet: run 'tcube solve' to generate solutions");
        std::process::exit(1);
    };
    let Some(solution) = solutions.get(id) else {
        eprintln!("Solution {} not found ({} saved)", id, solutions.len());
        std::process::exit(1);
    };

    print_tutorial_json(&build_tutorial(solution));
}

/// Exports saved solutions in the JSON payload format.
fn run_export() {
    let Some(solutions) = persistence::load_all() else {
        eprintln!("Nothing saved yet: run 'tcube solve' to generate solutions");
        std::process::exit(1);
    };

    println!("{{");
    println!("  \"metadata\": {{");
    println!("    \"problem\": \"6x6x6 cube with T-tetracubes\",");
    println!("    \"cube_size\": {},", pieces::CUBE_SIZE);
    println!("    \"total_cells\": {},", pieces::NUM_CELLS);
    println!("    \"pieces_per_solution\": {},", pieces::NUM_PIECES);
    println!("    \"piece_type\": \"T-tetracube\",");
    println!("    \"cells_per_piece\": {},", pieces::PIECE_CELLS);
    println!("    \"symmetry_group\": \"cube rotations (24 elements)\",");
    println!("    \"total_solutions\": {}", solutions.len());
    println!("  }},");
    println!("  \"solutions\": [");
    for (i, solution) in solutions.iter().enumerate() {
        let comma = if i + 1 < solutions.len() { "," } else { "" };
        println!(
            "    {{\"id\": {}, \"pieces\": {}}}{}",
            i,
            solution_to_json(solution),
            comma
        );
    }
    println!("  ]");
    println!("}}");
}

/// Renders a piece as a JSON array of [x,y,z] triples.
fn piece_to_json(piece: &Piece) -> String {
    let cells: Vec<String> = piece
        .iter()
        .map(|(x, y, z)| format!("[{},{},{}]", x, y, z))
        .collect();
    format!("[{}]", cells.join(","))
}

/// Renders a solution as a JSON array of pieces.
fn solution_to_json(solution: &[Piece]) -> String {
    let pieces: Vec<String> = solution.iter().map(piece_to_json).collect();
    format!("[{}]", pieces.join(","))
}

/// Prints the tutorial payload; tips are plain ASCII so no JSON string
/// escaping is needed.
fn print_tutorial_json(tutorial: &Tutorial) {
    println!("{{");
    println!("  \"total_pieces\": {},", tutorial.total_pieces);

    let stats = &tutorial.statistics;
    let layers: Vec<String> = stats
        .by_layer
        .iter()
        .map(|(z, count)| format!("\"{}\": {}", z, count))
        .collect();
    println!("  \"statistics\": {{");
    println!("    \"total_pieces\": {},", stats.total_pieces);
    println!("    \"by_layer\": {{{}}},", layers.join(", "));
    println!(
        "    \"orientations\": {{\"flat\": {}, \"wall_xz\": {}, \"wall_yz\": {}, \"3d\": {}}}",
        stats.orientations.flat,
        stats.orientations.wall_xz,
        stats.orientations.wall_yz,
        stats.orientations.three_d
    );
    println!("  }},");

    let ordered: Vec<String> = tutorial.ordered_pieces.iter().map(piece_to_json).collect();
    println!("  \"ordered_pieces\": [{}],", ordered.join(","));

    println!("  \"steps\": [");
    for (i, step) in tutorial.steps.iter().enumerate() {
        let touches: Vec<String> = step.touches.iter().map(usize::to_string).collect();
        let comma = if i + 1 < tutorial.steps.len() { "," } else { "" };
        println!(
            "    {{\"step\": {}, \"piece\": {}, \"cells\": {}, \"grounded\": {}, \"layer\": {}, \
             \"corner_distance\": {}, \"touches\": [{}], \"accessible\": {}, \"tip\": \"{}\"}}{}",
            step.step,
            step.piece,
            piece_to_json(&step.cells),
            step.grounded,
            step.layer,
            step.corner_distance,
            touches.join(","),
            step.accessible,
            step.tip,
            comma
        );
    }
    println!("  ]");
    println!("}}");
}
