//! Grid Breakout - a Breakout simulation on an integer grid
//!
//! Core modules:
//! - `config`: Immutable game configuration (dimensions, palette, loss policy)
//! - `sim`: Deterministic simulation (directions, grid, generator, game state)
//! - `render`: Read-only scene snapshots for presentation
//! - `platform`: Terminal input/output and frame pacing

pub mod config;
pub mod platform;
pub mod render;
pub mod sim;

pub use config::{Config, ConfigError, LossPolicy, Palette, Rgb};
pub use render::Scene;
pub use sim::{Direction, FrameInput, GameState};

/// Default configuration constants
pub mod consts {
    /// Arena dimensions (interior cells, border ring excluded)
    pub const COLUMNS: i32 = 40;
    pub const ROWS: i32 = 50;

    /// Pixel geometry for presentation
    pub const CELL_SIZE: u32 = 10;
    pub const PADDING: u32 = 20;

    /// Paddle defaults
    pub const PADDLE_WIDTH: i32 = 9;
    pub const PADDLE_HEIGHT: i32 = 1;
    /// Cells moved per frame while a direction key is held
    pub const PADDLE_STEP: i32 = 1;

    /// Frames between ball updates
    pub const BALL_SLOWNESS: u32 = 5;

    /// Frames per second of the outer loop
    pub const FRAME_RATE: u32 = 60;
}
