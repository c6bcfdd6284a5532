//! Seed map loading for automaton grids

use super::{Grid, RuleSet};
use anyhow::{Context, Result};
use std::path::Path;

/// Seed used for the example game board written by `create_example_seeds`
const EXAMPLE_BOARD_SEED: u64 = 2100;

/// Load a seed map from a text file
/// Format: Each line represents a row, with '1' for alive cells and '0' for dead cells
pub fn load_seed_map_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<u8>>> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read seed file: {}", path.as_ref().display()))?;

    parse_seed_map(&content)
        .with_context(|| format!("Failed to parse seed map from file: {}", path.as_ref().display()))
}

/// Parse a seed map from its text representation.
///
/// Row lengths are not checked against each other; `Grid::init_map` reports
/// any shape mismatch against the target grid.
pub fn parse_seed_map(content: &str) -> Result<Vec<Vec<u8>>> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Seed map is empty or contains no valid rows");
    }

    let mut rows = Vec::with_capacity(lines.len());

    for (row_idx, line) in lines.iter().enumerate() {
        let mut row = Vec::with_capacity(line.len());
        for (col_idx, ch) in line.chars().enumerate() {
            match ch {
                '0' => row.push(0),
                '1' => row.push(1),
                _ => anyhow::bail!(
                    "Invalid character '{}' at position ({}, {}). Only '0' and '1' are allowed",
                    ch,
                    row_idx,
                    col_idx
                ),
            }
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Create example seed files for the `simulate` command
pub fn create_example_seeds<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    // Glider pattern
    let glider_content = "00100\n10100\n01100\n00000\n00000\n";
    std::fs::write(dir.join("glider.txt"), glider_content)
        .context("Failed to write glider.txt")?;

    // Blinker pattern
    let blinker_content = "00000\n00000\n01110\n00000\n00000\n";
    std::fs::write(dir.join("blinker.txt"), blinker_content)
        .context("Failed to write blinker.txt")?;

    // Block pattern (still life)
    let block_content = "0000\n0110\n0110\n0000\n";
    std::fs::write(dir.join("block.txt"), block_content)
        .context("Failed to write block.txt")?;

    // Sparse 25x25 board like the one the game starts with
    let mut board = Grid::new(25, 25, RuleSet::life_34());
    board.randomize(0.15, Some(EXAMPLE_BOARD_SEED));
    std::fs::write(dir.join("board.txt"), board.to_string())
        .context("Failed to write board.txt")?;

    log::debug!("Wrote example seeds to {}", dir.display());
    Ok(())
}
