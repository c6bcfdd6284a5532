//! Life-like cellular automaton core

pub mod grid;
pub mod io;
pub mod rules;

pub use grid::Grid;
pub use io::{create_example_seeds, load_seed_map_from_file, parse_seed_map};
pub use rules::RuleSet;
