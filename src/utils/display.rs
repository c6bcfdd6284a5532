//! Display and output formatting utilities

use crate::automaton::{Grid, RuleSet};
use itertools::Itertools;
use serde::Serialize;

/// Format grids and rules for the console
pub struct GridFormatter;

impl GridFormatter {
    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &Grid) -> String {
        let mut output = String::with_capacity(grid.height() * (grid.width() + 1));
        for row in grid.cells().chunks(grid.width()) {
            for &cell in row {
                output.push(if cell != 0 { '█' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for x in 0..grid.width() {
            output.push_str(&format!("{:2}", x % 10));
        }
        output.push('\n');

        // Rows with row numbers
        for (y, row) in grid.cells().chunks(grid.width()).enumerate() {
            output.push_str(&format!("{:2} ", y));
            for &cell in row {
                output.push_str(if cell != 0 { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// Format one generation with a header line
    pub fn format_generation(grid: &Grid, with_coords: bool) -> String {
        let body = if with_coords {
            Self::format_grid_with_coords(grid)
        } else {
            Self::format_grid_compact(grid)
        };
        format!("Generation {} (Living: {}):\n{}", grid.generation(), grid.living_count(), body)
    }

    /// Describe a parsed rule set
    pub fn format_rule(rules: &RuleSet) -> String {
        let mut output = String::new();
        output.push_str(&format!("Notation: {:?}\n", rules.notation()));
        output.push_str(&format!("Valid:    {}\n", if rules.is_valid() { "yes" } else { "no" }));
        if rules.is_valid() {
            output.push_str(&format!("Birth:    {{{}}}\n", rules.birth().iter().join(", ")));
            output.push_str(&format!("Survival: {{{}}}\n", rules.survival().iter().join(", ")));
            output.push_str(&format!("Canonical: {}\n", rules));
        }
        output
    }
}

/// Summary of a finished simulation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationReport {
    pub rule: String,
    pub width: usize,
    pub height: usize,
    pub generations: usize,
    pub initial_living: usize,
    pub final_living: usize,
    /// Living cell count after each generation, starting with the seed
    pub population: Vec<usize>,
}

impl SimulationReport {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && std::env::var("TERM").map_or(true, |term| term != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
