//! Configuration management

pub mod settings;

pub use settings::{
    Settings, AutomatonConfig, SeedingConfig, TimingConfig, ArenaConfig, CliOverrides,
    DEFAULT_CELL_UPDATE_INTERVAL_MS
};
