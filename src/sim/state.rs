//! Game state and core simulation types
//!
//! Everything `update` mutates lives here; presentation only reads it.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::direction::Direction;
use super::generate::generate;
use super::grid::Grid;
use crate::config::{Config, ConfigError};

/// The player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paddle {
    /// Left edge column
    pub left: i32,
}

impl Paddle {
    /// Paddle centered on the bottom row
    pub fn centered(config: &Config) -> Self {
        Self {
            left: (config.columns - config.paddle_width) / 2,
        }
    }

    /// Shift by `delta` columns, clamped to `[0, columns - paddle_width]`
    pub fn move_by(&mut self, delta: i32, config: &Config) {
        let max = config.columns - config.paddle_width;
        self.left = (self.left + delta).clamp(0, max);
    }

    /// True if `pos` falls inside the paddle rectangle
    pub fn covers(&self, pos: IVec2, config: &Config) -> bool {
        let top = config.paddle_row();
        pos.x >= self.left
            && pos.x < self.left + config.paddle_width
            && pos.y >= top
            && pos.y < top + config.paddle_height
    }
}

/// The ball: an integer cell and a heading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ball {
    pub pos: IVec2,
    pub direction: Direction,
}

impl Ball {
    pub fn new(pos: IVec2, direction: Direction) -> Self {
        Self { pos, direction }
    }

    /// Serve position: centered, one row above the paddle, heading up-right
    pub fn serve(config: &Config) -> Self {
        Self {
            pos: IVec2::new(config.columns / 2, config.paddle_row() - 1),
            direction: Direction::UpRight,
        }
    }
}

/// Something that happened during the last frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A destructible block was cleared
    BlockDestroyed { at: IVec2, color: u8 },
    /// The ball bounced off the border ring
    BorderHit,
    /// The ball bounced off the paddle
    PaddleHit,
    /// The ball dropped into the paddle rows
    BallLost,
    /// The state was reinitialized
    Reset,
    /// The last destructible block was cleared
    Cleared,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub(super) config: Config,
    /// Run seed for reproducibility
    pub(super) seed: u64,
    pub(super) rng: Pcg32,
    pub(super) grid: Grid,
    pub(super) paddle: Paddle,
    pub(super) ball: Ball,
    /// Frames since the last reset
    pub(super) frame_count: u64,
    /// Events from the most recent `update`
    pub(super) events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with a generated grid.
    ///
    /// The config is validated first; every later step relies on it.
    pub fn new(config: Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let grid = generate(&config, &mut rng);
        log::info!(
            "New game: seed {}, {} blocks on a {}x{} grid",
            seed,
            grid.block_count(),
            config.columns,
            config.rows
        );
        Ok(Self {
            paddle: Paddle::centered(&config),
            ball: Ball::serve(&config),
            config,
            seed,
            rng,
            grid,
            frame_count: 0,
            events: Vec::new(),
        })
    }

    /// Create a state around a prepared grid and ball.
    ///
    /// The grid must match the config's dimensions. `seed` drives the grids
    /// generated by later resets.
    pub fn from_parts(
        config: Config,
        grid: Grid,
        ball: Ball,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        assert_eq!(
            (grid.columns(), grid.rows()),
            (config.columns, config.rows),
            "grid does not match config dimensions"
        );
        assert!(grid.in_bounds(ball.pos), "ball outside bordered grid");
        Ok(Self {
            paddle: Paddle::centered(&config),
            ball,
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            grid,
            frame_count: 0,
            events: Vec::new(),
        })
    }

    /// Discard grid, paddle, ball and frame count and start over with a
    /// freshly generated grid. The RNG keeps advancing, so every reset
    /// produces a different layout.
    pub fn reset(&mut self) {
        self.grid = generate(&self.config, &mut self.rng);
        self.paddle = Paddle::centered(&self.config);
        self.ball = Ball::serve(&self.config);
        self.frame_count = 0;
        self.events.push(GameEvent::Reset);
        log::info!(
            "Game reset: {} blocks (run seed {})",
            self.grid.block_count(),
            self.seed
        );
    }

    // === Read-only access for presentation ===
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn paddle(&self) -> Paddle {
        self.paddle
    }

    pub fn ball(&self) -> Ball {
        self.ball
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Remaining destructible blocks
    pub fn blocks_remaining(&self) -> usize {
        self.grid.block_count()
    }
}
