//! File I/O for saving and loading found tilings.
//!
//! Binary format for `solutions.bin` (little endian):
//! - 4 bytes: magic (`TCUB`)
//! - u8: format version
//! - u8: cube dimension
//! - u8: cell count
//! - u8: pieces per solution
//! - u32: solution count
//! - repeat per solution: 54 pieces, each 4 cells of 3 bytes (x, y, z)
//!
//! Loading validates the header and every solution; any mismatch reads
//! as "no saved solutions" rather than an error.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::grid::{format_solution, point_to_index};
use crate::pieces::{Solution, CUBE_SIZE, NUM_CELLS, NUM_PIECES, PIECE_CELLS};

const SOLUTIONS_BIN: &str = "solutions.bin";
const SOLUTIONS_TXT: &str = "solutions.txt";
const FILE_MAGIC: [u8; 4] = *b"TCUB";
const FILE_VERSION: u8 = 1;

/// Saves solutions to both binary and text files in the working directory.
pub fn save(solutions: &[Solution]) -> std::io::Result<()> {
    save_text(Path::new(SOLUTIONS_TXT), solutions)?;
    save_binary(Path::new(SOLUTIONS_BIN), solutions)?;
    Ok(())
}

/// Loads all solutions from the binary file.
pub fn load_all() -> Option<Vec<Solution>> {
    load_all_from(Path::new(SOLUTIONS_BIN))
}

/// Returns the number of saved solutions without loading them all.
pub fn count() -> Option<usize> {
    count_from(Path::new(SOLUTIONS_BIN))
}

/// Saves solutions in human-readable text format.
fn save_text(path: &Path, solutions: &[Solution]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "{} distinct tilings:\n", solutions.len())?;
    for (i, solution) in solutions.iter().enumerate() {
        writeln!(file, "Tiling {}:", i + 1)?;
        write!(file, "{}", format_solution(solution))?;
        writeln!(file)?;
    }
    Ok(())
}

/// Saves solutions in compact binary format for fast loading.
fn save_binary(path: &Path, solutions: &[Solution]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(&FILE_MAGIC)?;
    file.write_all(&[
        FILE_VERSION,
        CUBE_SIZE as u8,
        NUM_CELLS as u8,
        NUM_PIECES as u8,
    ])?;
    file.write_all(&(solutions.len() as u32).to_le_bytes())?;

    for solution in solutions {
        for piece in solution {
            for &(x, y, z) in piece {
                file.write_all(&[x as u8, y as u8, z as u8])?;
            }
        }
    }

    Ok(())
}

#[inline]
fn read_u32<R: Read>(reader: &mut R) -> Option<u32> {
    let mut buffer = [0u8; 4];
    reader.read_exact(&mut buffer).ok()?;
    Some(u32::from_le_bytes(buffer))
}

/// Reads and validates the fixed header, returning the solution count.
fn read_header(file: &mut File) -> Option<usize> {
    let mut header = [0u8; 8];
    file.read_exact(&mut header).ok()?;

    if header[..4] != FILE_MAGIC
        || header[4] != FILE_VERSION
        || header[5] != CUBE_SIZE as u8
        || header[6] != NUM_CELLS as u8
        || header[7] != NUM_PIECES as u8
    {
        return None;
    }

    Some(read_u32(file)? as usize)
}

fn parse_solutions(file: &mut File, solution_count: usize) -> Option<Vec<Solution>> {
    let mut solutions = Vec::with_capacity(solution_count);

    for _ in 0..solution_count {
        let mut covered = [false; NUM_CELLS];
        let mut solution = Vec::with_capacity(NUM_PIECES);

        for _ in 0..NUM_PIECES {
            let mut piece = [(0, 0, 0); PIECE_CELLS];
            for cell in &mut piece {
                let mut coords = [0u8; 3];
                file.read_exact(&mut coords).ok()?;
                let (x, y, z) = (coords[0] as i32, coords[1] as i32, coords[2] as i32);
                if x >= CUBE_SIZE || y >= CUBE_SIZE || z >= CUBE_SIZE {
                    return None;
                }

                let id = point_to_index(x, y, z);
                if covered[id] {
                    // overlapping pieces mean a corrupt file
                    return None;
                }
                covered[id] = true;
                *cell = (x, y, z);
            }
            solution.push(piece);
        }

        // 54 pieces x 4 distinct cells necessarily cover all 216
        solutions.push(solution);
    }

    Some(solutions)
}

fn load_all_from(path: &Path) -> Option<Vec<Solution>> {
    let mut file = File::open(path).ok()?;
    let solution_count = read_header(&mut file)?;
    parse_solutions(&mut file, solution_count)
}

fn count_from(path: &Path) -> Option<usize> {
    let mut file = File::open(path).ok()?;
    read_header(&mut file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::Solver;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("tcube-test-{name}-{}", std::process::id()));
        path
    }

    #[test]
    fn test_binary_roundtrip_preserves_solutions() {
        let mut solver = Solver::new();
        let solutions = solver.solve(Some(2));
        let path = temp_path("roundtrip.bin");

        save_binary(&path, &solutions).unwrap();
        let loaded = load_all_from(&path).expect("saved file should load");
        assert_eq!(loaded, solutions);
        assert_eq!(count_from(&path), Some(2));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_loads_as_none() {
        assert_eq!(load_all_from(Path::new("no-such-solutions.bin")), None);
        assert_eq!(count_from(Path::new("no-such-solutions.bin")), None);
    }

    #[test]
    fn test_bad_magic_is_rejected() {
        let path = temp_path("bad-magic.bin");
        std::fs::write(&path, b"XXXX\x01\x06\xd8\x36\x00\x00\x00\x00").unwrap();
        assert_eq!(load_all_from(&path), None);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_truncated_body_is_rejected() {
        let mut solver = Solver::new();
        let solutions = solver.solve(Some(1));
        let path = temp_path("truncated.bin");

        save_binary(&path, &solutions).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        std::fs::write(&path, &bytes[..bytes.len() - 1]).unwrap();
        assert_eq!(load_all_from(&path), None);
        // the header alone still answers the count question
        assert_eq!(count_from(&path), Some(1));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_out_of_bounds_coordinate_is_rejected() {
        let path = temp_path("oob.bin");
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&FILE_MAGIC);
        bytes.extend_from_slice(&[FILE_VERSION, 6, 216, 54]);
        bytes.extend_from_slice(&1u32.to_le_bytes());
        bytes.extend_from_slice(&[9, 0, 0]); // x = 9 is outside the cube
        bytes.resize(bytes.len() + 54 * 4 * 3 - 3, 0);
        std::fs::write(&path, &bytes).unwrap();

        assert_eq!(load_all_from(&path), None);
        std::fs::remove_file(&path).ok();
    }
}
