//! Command line front end for the automaton and the headless Arkanoid game

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use life_arkanoid::{
    automaton::{create_example_seeds, RuleSet},
    build_grid,
    error::AutomatonError,
    config::{CliOverrides, Settings},
    game::{ArkanoidScene, FrameInput, Game, KEY_LEFT, KEY_RIGHT, KEY_SPACE},
    utils::{ColorOutput, GridFormatter, SimulationReport},
};
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "life_arkanoid")]
#[command(about = "Life-like cellular automaton and the Arkanoid built on it")]
#[command(version = "0.1.0")]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the automaton for a number of generations
    Simulate {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Rule notation, e.g. B3/S23 (overrides config)
        #[arg(short, long)]
        rule: Option<String>,

        /// Grid width (overrides config)
        #[arg(long)]
        width: Option<usize>,

        /// Grid height (overrides config)
        #[arg(long)]
        height: Option<usize>,

        /// Seed map file (overrides config)
        #[arg(long)]
        seed_file: Option<PathBuf>,

        /// Random seed (overrides config)
        #[arg(long)]
        seed: Option<u64>,

        /// Probability of a cell starting alive (overrides config)
        #[arg(long)]
        spawn_probability: Option<f64>,

        /// Number of generations to run
        #[arg(short, long, default_value_t = 10)]
        generations: usize,

        /// Print the grid every N generations (0 prints only the final state)
        #[arg(long, default_value_t = 1)]
        show_every: usize,

        /// Print grids with row and column numbers
        #[arg(long)]
        coords: bool,

        /// Print a JSON report instead of grids
        #[arg(long)]
        json: bool,
    },

    /// Parse a rule notation and show its birth/survival sets
    Rule {
        /// Rule notation, e.g. B34/S34
        notation: String,
    },

    /// Play the Arkanoid scene headlessly with a paddle autopilot
    Play {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Random seed for the board (overrides config)
        #[arg(long)]
        seed: Option<u64>,

        /// Number of frames to run
        #[arg(long, default_value_t = 3600)]
        frames: usize,

        /// Milliseconds per frame
        #[arg(long, default_value_t = 16.0)]
        frame_ms: f32,

        /// Print the HUD every N frames
        #[arg(long, default_value_t = 600)]
        hud_every: usize,
    },

    /// Create example configuration and seed files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    simple_logger::SimpleLogger::new()
        .with_level(level)
        .init()
        .context("Failed to initialize logger")?;
    debug!("Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Simulate {
            config,
            rule,
            width,
            height,
            seed_file,
            seed,
            spawn_probability,
            generations,
            show_every,
            coords,
            json,
        } => {
            let overrides = CliOverrides {
                width,
                height,
                rule,
                seed,
                spawn_probability,
                seed_file,
            };
            let output = SimulateOutput {
                show_every,
                coords,
                json,
            };
            simulate_command(config, overrides, generations, &output)
        }
        Commands::Rule { notation } => rule_command(&notation),
        Commands::Play { config, seed, frames, frame_ms, hud_every } => {
            play_command(config, seed, frames, frame_ms, hud_every)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

/// How `simulate` prints its progress
struct SimulateOutput {
    /// Print the grid every N generations, 0 for the final state only
    show_every: usize,
    coords: bool,
    json: bool,
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        println!("{}", ColorOutput::warning(&format!(
            "Config file {} not found, using defaults", config_path.display()
        )));
        Ok(Settings::default())
    }
}

fn simulate_command(
    config_path: PathBuf,
    overrides: CliOverrides,
    generations: usize,
    output: &SimulateOutput,
) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&overrides);
    settings.validate()
        .context("Configuration validation failed")?;

    let mut grid = build_grid(&settings)
        .context("Failed to build grid")?;
    info!(
        "Simulating {}x{} grid under {} for {} generations",
        grid.width(), grid.height(), grid.rules(), generations
    );

    let show = !output.json && output.show_every > 0;
    if show {
        println!("{}", GridFormatter::format_generation(&grid, output.coords));
    }

    let start_time = Instant::now();
    let initial_living = grid.living_count();
    let mut population = Vec::with_capacity(generations + 1);
    population.push(initial_living);

    for _ in 0..generations {
        grid.update();
        population.push(grid.living_count());
        if show && grid.generation() % output.show_every == 0 {
            println!("{}", GridFormatter::format_generation(&grid, output.coords));
        }
    }
    debug!("Ran {} generations in {:.3}s", generations, start_time.elapsed().as_secs_f64());

    let report = SimulationReport {
        rule: grid.rules().to_string(),
        width: grid.width(),
        height: grid.height(),
        generations: grid.generation(),
        initial_living,
        final_living: grid.living_count(),
        population,
    };

    if output.json {
        println!("{}", report.to_json().context("Failed to serialize report")?);
    } else {
        if !show {
            println!("{}", GridFormatter::format_generation(&grid, output.coords));
        }
        println!("{}", ColorOutput::success(&format!(
            "Living cells: {} → {} after {} generations",
            report.initial_living, report.final_living, report.generations
        )));
    }

    Ok(())
}

fn rule_command(notation: &str) -> Result<()> {
    let rules = RuleSet::parse(notation);
    print!("{}", GridFormatter::format_rule(&rules));

    if let Err(err) = rules.ensure_valid() {
        println!("{}", ColorOutput::error(&err.to_string()));
        return Err(err.into());
    }
    println!("{}", ColorOutput::success("Rule is valid"));
    Ok(())
}

fn play_command(
    config_path: PathBuf,
    seed: Option<u64>,
    frames: usize,
    frame_ms: f32,
    hud_every: usize,
) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&CliOverrides { seed, ..Default::default() });

    let scene = ArkanoidScene::from_settings(&settings)
        .context("Failed to create Arkanoid scene")?;
    let mut game = Game::new(scene);
    game.attach();

    println!("{}", ColorOutput::info("Starting board:"));
    println!("{}", GridFormatter::format_grid_compact(game.scene().automaton()));

    let paddle_center = settings.arena.paddle_width / 2.0;
    for frame in 0..frames {
        let input = autopilot(game.scene(), paddle_center);
        game.frame(&input, frame_ms);

        if hud_every > 0 && (frame + 1) % hud_every == 0 {
            println!("[frame {:5}] {}", frame + 1, game.scene().hud_text());
        }
    }

    let scene = game.into_scene();
    println!("{}", ColorOutput::info("Final board:"));
    println!("{}", GridFormatter::format_grid_compact(scene.automaton()));
    println!("{}", ColorOutput::success(&scene.hud_text()));
    Ok(())
}

/// Launch the ball when idle and keep the paddle under it
fn autopilot(scene: &ArkanoidScene, paddle_center: f32) -> FrameInput {
    let mut input = FrameInput::default();
    if !scene.is_started() {
        input.pressed_keys.push(KEY_SPACE);
        input.held_keys.push(KEY_SPACE);
        return input;
    }

    let offset = scene.ball().x - (scene.paddle_x() + paddle_center);
    let key = if offset < -4.0 {
        Some(KEY_LEFT)
    } else if offset > 4.0 {
        Some(KEY_RIGHT)
    } else {
        None
    };
    if let Some(key) = key {
        input.pressed_keys.push(key);
        input.held_keys.push(key);
    }
    input
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let seeds_dir = directory.join("input/seeds");

    for dir in [&config_dir, &seeds_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    // Create default configuration
    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default().to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_seeds(&seeds_dir)
        .context("Failed to create example seeds")?;
    println!("Created example seed maps in: {}", seeds_dir.display());

    // Classic Life on the glider, for `simulate`
    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    let mut glider_config = Settings::default();
    glider_config.automaton.width = 5;
    glider_config.automaton.height = 5;
    glider_config.automaton.rule = "B3/S23".to_string();
    glider_config.seeding.seed_file = Some(seeds_dir.join("glider.txt"));
    glider_config.to_file(&examples_dir.join("glider.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Run: cargo run -- simulate --config {}", examples_dir.join("glider.yaml").display());
    println!("2. Run: cargo run -- play --config {}", config_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use life_arkanoid::game::Scene;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(&[
            "life_arkanoid",
            "simulate",
            "--rule", "B3/S23",
            "--generations", "5",
            "--width", "8",
            "--coords",
        ]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(&["life_arkanoid", "-v", "rule", "B34/S34"]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(&["life_arkanoid", "simulate", "--generations", "many"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_rule_command() {
        assert!(rule_command("B34/S34").is_ok());
        assert!(rule_command("B33/S23").is_err());
        assert!(rule_command("3/S23").is_err());

        let err = rule_command("B33").unwrap_err();
        assert!(err.downcast_ref::<AutomatonError>().is_some());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        let result = setup_command(temp_dir.path().to_path_buf(), false);

        assert!(result.is_ok());
        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("input/seeds/glider.txt").exists());

        let glider = Settings::from_file(&temp_dir.path().join("config/examples/glider.yaml")).unwrap();
        let grid = build_grid(&glider).unwrap();
        assert_eq!(grid.living_count(), 5);
    }

    #[test]
    fn test_simulate_command() {
        let temp_dir = tempdir().unwrap();
        let overrides = CliOverrides {
            width: Some(6),
            height: Some(6),
            seed: Some(1),
            ..Default::default()
        };
        let output = SimulateOutput { show_every: 0, coords: false, json: true };
        let result = simulate_command(temp_dir.path().join("missing.yaml"), overrides, 3, &output);
        assert!(result.is_ok());

        let overrides = CliOverrides {
            rule: Some("B33".to_string()),
            ..Default::default()
        };
        let output = SimulateOutput { show_every: 1, coords: true, json: false };
        assert!(simulate_command(temp_dir.path().join("missing.yaml"), overrides, 3, &output).is_err());
    }

    #[test]
    fn test_autopilot_launches_and_tracks() {
        let settings = Settings::default();
        let mut scene = ArkanoidScene::from_settings(&settings).unwrap();
        scene.on_attach();

        let input = autopilot(&scene, 32.0);
        assert_eq!(input.pressed_keys, vec![KEY_SPACE]);

        let mut game = Game::new(scene);
        game.frame(&input, 16.0);
        assert!(game.scene().is_started());
    }
}
