//! Arkanoid played against a living wall of automaton cells

use super::clock::CellClock;
use super::input::{KeyboardInput, TouchInput, KEY_LEFT, KEY_RIGHT, KEY_SPACE};
use super::scene::Scene;
use crate::automaton::{load_seed_map_from_file, Grid};
use crate::config::{ArenaConfig, Settings};
use anyhow::{Context, Result};

/// Ball center and velocity in pixels and pixels per second
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
}

pub struct ArkanoidScene {
    automaton: Grid,
    arena: ArenaConfig,
    clock: CellClock,
    keyboard: KeyboardInput,
    touch: TouchInput,
    /// Spawn probability and RNG seed for scattering cells on attach
    random_seeding: Option<(f64, Option<u64>)>,
    paddle_x: f32,
    ball: Ball,
    started: bool,
    score: u32,
}

impl ArkanoidScene {
    pub fn new(automaton: Grid, arena: ArenaConfig, clock: CellClock) -> Self {
        let mut scene = Self {
            automaton,
            arena,
            clock,
            keyboard: KeyboardInput::default(),
            touch: TouchInput::default(),
            random_seeding: None,
            paddle_x: 0.0,
            ball: Ball::default(),
            started: false,
            score: 0,
        };
        scene.reset_game();
        scene
    }

    /// Scatter cells over the board when the scene is attached
    pub fn with_random_seeding(mut self, spawn_probability: f64, seed: Option<u64>) -> Self {
        self.random_seeding = Some((spawn_probability, seed));
        self
    }

    /// Build the scene described by `settings`.
    ///
    /// A configured seed file is loaded into the board right away; otherwise
    /// the board is seeded randomly on attach.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        settings.validate()?;

        let mut automaton = Grid::new(
            settings.automaton.width,
            settings.automaton.height,
            settings.rules()?,
        );
        let clock = CellClock::new(settings.timing.cell_update_interval_ms);

        match settings.seeding.seed_file {
            Some(ref path) => {
                let map = load_seed_map_from_file(path)?;
                automaton
                    .init_map(&map)
                    .with_context(|| format!("Seed map {} does not fit the board", path.display()))?;
                Ok(Self::new(automaton, settings.arena.clone(), clock))
            }
            None => Ok(Self::new(automaton, settings.arena.clone(), clock)
                .with_random_seeding(settings.seeding.spawn_probability, settings.seeding.seed)),
        }
    }

    pub fn automaton(&self) -> &Grid {
        &self.automaton
    }

    pub fn paddle_x(&self) -> f32 {
        self.paddle_x
    }

    pub fn ball(&self) -> Ball {
        self.ball
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Cells destroyed so far
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn hud_text(&self) -> String {
        format!("Gen: {}  Score: {}", self.automaton.generation(), self.score)
    }

    /// Top-left pixel of cell `(x, y)`
    pub fn cell_to_world(&self, x: usize, y: usize) -> (f32, f32) {
        (
            x as f32 * self.arena.cell_width,
            self.arena.cell_offset_y + y as f32 * self.arena.cell_height,
        )
    }

    /// The cell under pixel `(x, y)`, if it lies on the board
    pub fn world_to_cell(&self, x: f32, y: f32) -> Option<(isize, isize)> {
        let band_bottom = self.arena.cell_offset_y + self.automaton.height() as f32 * self.arena.cell_height;
        if x < 0.0 || x >= self.arena.width || y < self.arena.cell_offset_y || y >= band_bottom {
            return None;
        }

        let cell_x = (x / self.arena.cell_width) as usize;
        let cell_y = ((y - self.arena.cell_offset_y) / self.arena.cell_height) as usize;
        if cell_x >= self.automaton.width() || cell_y >= self.automaton.height() {
            return None;
        }
        Some((cell_x as isize, cell_y as isize))
    }

    fn launch(&mut self) {
        self.started = true;
        self.ball.vx = self.arena.ball_speed;
        self.ball.vy = -self.arena.ball_speed;
        log::debug!("Ball launched at x={:.1}", self.ball.x);
    }

    /// Park the ball on the paddle in the middle of the arena
    fn reset_game(&mut self) {
        self.started = false;
        self.paddle_x = (self.arena.width - self.arena.paddle_width) / 2.0;
        self.ball = Ball {
            x: self.paddle_x + self.arena.paddle_width / 2.0,
            y: self.arena.paddle_y() - 1.0 - self.arena.ball_radius,
            vx: 0.0,
            vy: 0.0,
        };
        self.clock.reset();
    }

    fn clamp_paddle(&mut self) {
        self.paddle_x = self.paddle_x.clamp(0.0, self.arena.width - self.arena.paddle_width);
    }

    /// Resolve wall, paddle and cell contacts. Returns false if the ball was lost.
    fn handle_collisions(&mut self) -> bool {
        let radius = self.arena.ball_radius;
        let top = self.ball.y - radius;
        let bottom = self.ball.y + radius;
        let left = self.ball.x - radius;
        let right = self.ball.x + radius;

        if bottom >= self.arena.height {
            log::info!("Ball lost at generation {}, score {}", self.automaton.generation(), self.score);
            self.reset_game();
            return false;
        }

        if bottom > self.arena.paddle_y() && left >= self.paddle_x && right <= self.paddle_x + self.arena.paddle_width {
            self.ball.vy = -self.ball.vy.abs();
        }

        if left <= 0.0 {
            self.ball.vx = self.ball.vx.abs();
        } else if right >= self.arena.width {
            self.ball.vx = -self.ball.vx.abs();
        }

        if top <= 0.0 {
            self.ball.vy = self.ball.vy.abs();
        }

        if let Some((cell_x, cell_y)) = self.world_to_cell(self.ball.x, self.ball.y) {
            if self.automaton.is_alive(cell_x, cell_y) {
                self.automaton.set_cell(cell_x, cell_y, 0);
                self.ball.vx = -self.ball.vx;
                self.ball.vy = -self.ball.vy;
                self.score += 1;
                log::trace!("Destroyed cell ({}, {})", cell_x, cell_y);
            }
        }

        true
    }
}

impl Scene for ArkanoidScene {
    fn on_attach(&mut self) {
        if let Some((spawn_probability, seed)) = self.random_seeding {
            self.automaton.randomize(spawn_probability, seed);
        }
        self.reset_game();
        log::info!(
            "Arkanoid attached: {}x{} board, rule {}, {} living cells",
            self.automaton.width(),
            self.automaton.height(),
            self.automaton.rules(),
            self.automaton.living_count()
        );
    }

    fn on_detach(&mut self) {
        log::info!("Arkanoid detached at generation {}, score {}", self.automaton.generation(), self.score);
    }

    fn update(&mut self, dt_ms: f32) {
        let step = self.arena.paddle_speed * dt_ms / 1000.0;
        let mut launch = false;
        for &key in self.keyboard.keys() {
            match key {
                KEY_SPACE if !self.started => launch = true,
                KEY_LEFT => self.paddle_x -= step,
                KEY_RIGHT => self.paddle_x += step,
                _ => {}
            }
        }
        if launch {
            self.launch();
        }

        let touch_count = self.touch.touches().len();
        if touch_count > 0 {
            if !self.started {
                self.launch();
                return;
            }
            let center = self.arena.width / 2.0;
            let direction: f32 = self
                .touch
                .touches()
                .iter()
                .map(|&(x, _)| (x - center) / center)
                .sum::<f32>()
                / touch_count as f32;
            self.paddle_x += step * direction;
        }

        self.clamp_paddle();

        // The ball rides the paddle until launched
        if !self.started {
            self.ball.x = self.paddle_x + self.arena.paddle_width / 2.0;
            return;
        }

        if !self.handle_collisions() {
            return;
        }

        self.ball.x += self.ball.vx * dt_ms / 1000.0;
        self.ball.y += self.ball.vy * dt_ms / 1000.0;

        for _ in 0..self.clock.advance(dt_ms) {
            self.automaton.update();
        }
    }

    fn keyboard_input(&mut self) -> Option<&mut KeyboardInput> {
        Some(&mut self.keyboard)
    }

    fn touch_input(&mut self) -> Option<&mut TouchInput> {
        Some(&mut self.touch)
    }
}
