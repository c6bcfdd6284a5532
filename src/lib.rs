//! Life-like cellular automaton engine and the Arkanoid game built on it
//!
//! The core is [`automaton::Grid`], a toroidal grid of cells advanced under a
//! birth/survival [`automaton::RuleSet`] parsed from `B.../S...` notation.

pub mod automaton;
pub mod config;
pub mod error;
pub mod game;
pub mod utils;

pub use automaton::{Grid, RuleSet};
pub use config::Settings;
pub use error::AutomatonError;

use anyhow::Result;

/// Build a grid from settings: rule, dimensions and either the seed file or random seeding
pub fn build_grid(settings: &Settings) -> Result<Grid> {
    settings.validate()?;
    let mut grid = Grid::new(settings.automaton.width, settings.automaton.height, settings.rules()?);

    match settings.seeding.seed_file {
        Some(ref path) => {
            let map = automaton::load_seed_map_from_file(path)?;
            grid.init_map(&map)?;
        }
        None => grid.randomize(settings.seeding.spawn_probability, settings.seeding.seed),
    }

    Ok(grid)
}
