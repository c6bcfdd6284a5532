//! Error types for the automaton core

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomatonError {
    /// A bulk seed map did not match the grid's dimensions
    #[error("Dimension mismatch; expected {expected_width}x{expected_height}, got {got_width}x{got_height}")]
    DimensionMismatch {
        expected_width: usize,
        expected_height: usize,
        got_width: usize,
        got_height: usize,
    },

    /// Rule notation contained a premature or duplicate digit
    #[error("Malformed rule notation: {notation:?}")]
    MalformedRule { notation: String },
}
