//! Birth/survival rule notation for Life-like automata
//!
//! See https://en.wikipedia.org/wiki/Life-like_cellular_automaton

use crate::error::AutomatonError;
use itertools::Itertools;
use std::collections::BTreeSet;
use std::fmt;

/// Parser state while scanning a rule notation string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    Start,
    Birth,
    Survival,
    Error,
}

/// Neighbor counts that cause birth and survival, parsed from `B.../S...` notation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    birth: BTreeSet<u8>,
    survival: BTreeSet<u8>,
    valid: bool,
    notation: String,
}

impl RuleSet {
    /// Parse a rule notation string.
    ///
    /// Never fails: a digit before any `B`/`S` letter, or a digit repeated
    /// within one group, marks the rule set invalid and stops parsing.
    /// Characters other than `B`, `S`, `/` and digits are ignored.
    pub fn parse(notation: &str) -> Self {
        let mut birth = BTreeSet::new();
        let mut survival = BTreeSet::new();
        let mut state = ParserState::Start;

        for ch in notation.chars() {
            match ch {
                'B' => state = ParserState::Birth,
                'S' => state = ParserState::Survival,
                '/' => {}
                '0'..='9' => {
                    let count = ch as u8 - b'0';
                    let inserted = match state {
                        ParserState::Birth => birth.insert(count),
                        ParserState::Survival => survival.insert(count),
                        ParserState::Start | ParserState::Error => false,
                    };
                    if !inserted {
                        state = ParserState::Error;
                        break;
                    }
                }
                _ => {}
            }
        }

        let valid = state != ParserState::Error;
        if !valid {
            log::debug!("Rule notation {:?} is malformed", notation);
        }

        Self {
            birth,
            survival,
            valid,
            notation: notation.to_string(),
        }
    }

    /// Conway's Game of Life, `B3/S23`
    pub fn classic_life() -> Self {
        Self::parse("B3/S23")
    }

    /// `B34/S34`, the rule of the game board
    pub fn life_34() -> Self {
        Self::parse("B34/S34")
    }

    pub fn birth(&self) -> &BTreeSet<u8> {
        &self.birth
    }

    pub fn survival(&self) -> &BTreeSet<u8> {
        &self.survival
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The notation this rule set was parsed from
    pub fn notation(&self) -> &str {
        &self.notation
    }

    /// Does a dead cell with `count` live neighbors come alive?
    #[inline]
    pub fn is_birth(&self, count: u8) -> bool {
        self.birth.contains(&count)
    }

    /// Does a live cell with `count` live neighbors stay alive?
    #[inline]
    pub fn is_survival(&self, count: u8) -> bool {
        self.survival.contains(&count)
    }

    /// Turn the validity flag into an error for callers that reject bad notation
    pub fn ensure_valid(&self) -> Result<(), AutomatonError> {
        if self.valid {
            Ok(())
        } else {
            Err(AutomatonError::MalformedRule {
                notation: self.notation.clone(),
            })
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::classic_life()
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "B{}/S{}",
            self.birth.iter().join(""),
            self.survival.iter().join("")
        )
    }
}
