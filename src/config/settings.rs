//! Configuration settings for the automaton and the game around it

use crate::automaton::RuleSet;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Milliseconds of play per automaton generation
pub const DEFAULT_CELL_UPDATE_INTERVAL_MS: f32 = 2100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub automaton: AutomatonConfig,
    pub seeding: SeedingConfig,
    pub timing: TimingConfig,
    pub arena: ArenaConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomatonConfig {
    pub width: usize,
    pub height: usize,
    /// Birth/survival notation, e.g. `B34/S34`
    pub rule: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedingConfig {
    pub spawn_probability: f64,
    /// Fixed RNG seed; entropy when absent
    pub seed: Option<u64>,
    /// Seed map file used instead of random seeding
    pub seed_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    pub cell_update_interval_ms: f32,
}

/// Playfield geometry in pixels and speeds in pixels per second
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Gap between the paddle and the bottom edge
    pub paddle_margin: f32,
    pub paddle_speed: f32,
    pub ball_radius: f32,
    pub ball_speed: f32,
    pub cell_width: f32,
    pub cell_height: f32,
    /// Distance from the top edge to the first row of cells
    pub cell_offset_y: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            automaton: AutomatonConfig {
                width: 25,
                height: 25,
                rule: "B34/S34".to_string(),
            },
            seeding: SeedingConfig {
                spawn_probability: 0.15,
                seed: None,
                seed_file: None,
            },
            timing: TimingConfig {
                cell_update_interval_ms: DEFAULT_CELL_UPDATE_INTERVAL_MS,
            },
            arena: ArenaConfig::default(),
        }
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            paddle_width: 64.0,
            paddle_height: 12.0,
            paddle_margin: 32.0,
            paddle_speed: 240.0,
            ball_radius: 8.0,
            ball_speed: 160.0,
            cell_width: 32.0,
            cell_height: 16.0,
            cell_offset_y: 32.0,
        }
    }
}

impl ArenaConfig {
    /// Top edge of the paddle
    pub fn paddle_y(&self) -> f32 {
        self.height - self.paddle_height - self.paddle_margin
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Parsed rule set; fails on malformed notation
    pub fn rules(&self) -> Result<RuleSet> {
        let rules = RuleSet::parse(&self.automaton.rule);
        rules.ensure_valid()?;
        Ok(rules)
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.automaton.width == 0 || self.automaton.height == 0 {
            anyhow::bail!(
                "Grid dimensions must be positive, got {}x{}",
                self.automaton.width,
                self.automaton.height
            );
        }

        self.rules().context("Invalid automaton rule")?;

        if !(0.0..=1.0).contains(&self.seeding.spawn_probability) {
            anyhow::bail!(
                "Spawn probability must be within [0, 1], got {}",
                self.seeding.spawn_probability
            );
        }

        if let Some(ref seed_file) = self.seeding.seed_file {
            if !seed_file.exists() {
                anyhow::bail!("Seed file does not exist: {}", seed_file.display());
            }
        }

        if !(self.timing.cell_update_interval_ms > 0.0) {
            anyhow::bail!("Cell update interval must be positive");
        }

        let arena = &self.arena;
        if arena.width <= 0.0 || arena.height <= 0.0 {
            anyhow::bail!("Arena dimensions must be positive");
        }
        if arena.cell_width <= 0.0 || arena.cell_height <= 0.0 {
            anyhow::bail!("Cell dimensions must be positive");
        }
        if arena.paddle_width > arena.width {
            anyhow::bail!("Paddle is wider than the arena");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(width) = cli_overrides.width {
            self.automaton.width = width;
        }
        if let Some(height) = cli_overrides.height {
            self.automaton.height = height;
        }
        if let Some(ref rule) = cli_overrides.rule {
            self.automaton.rule = rule.clone();
        }
        if let Some(seed) = cli_overrides.seed {
            self.seeding.seed = Some(seed);
        }
        if let Some(spawn_probability) = cli_overrides.spawn_probability {
            self.seeding.spawn_probability = spawn_probability;
        }
        if let Some(ref seed_file) = cli_overrides.seed_file {
            self.seeding.seed_file = Some(seed_file.clone());
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub rule: Option<String>,
    pub seed: Option<u64>,
    pub spawn_probability: Option<f64>,
    pub seed_file: Option<PathBuf>,
}
