//! Game configuration
//!
//! A single immutable value passed into the generator and the game state.
//! Loaded from JSON (partial files fall back to defaults) and validated
//! before any state is built from it.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// What happens when the ball drops past the paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LossPolicy {
    /// `update` returns true and the outer loop exits
    Terminate,
    /// The state resets itself and play continues
    #[default]
    Reset,
}

impl LossPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            LossPolicy::Terminate => "terminate",
            LossPolicy::Reset => "reset",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "terminate" | "quit" => Some(LossPolicy::Terminate),
            "reset" | "restart" => Some(LossPolicy::Reset),
            _ => None,
        }
    }
}

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Fixed color palette
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Rgb,
    pub border: Rgb,
    pub paddle: Rgb,
    pub ball: Rgb,
    /// Block colors; a block stores an index into this list
    pub blocks: Vec<Rgb>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb(15, 23, 42),
            border: Rgb(0, 0, 0),
            paddle: Rgb(255, 255, 255),
            ball: Rgb(255, 0, 0),
            blocks: vec![
                Rgb(158, 227, 98),
                Rgb(0, 192, 208),
                Rgb(255, 212, 3),
                Rgb(255, 147, 86),
                Rgb(126, 116, 212),
                Rgb(254, 130, 170),
            ],
        }
    }
}

impl Palette {
    /// Color for a block's palette index (wraps if out of range)
    pub fn block(&self, index: u8) -> Rgb {
        self.blocks[index as usize % self.blocks.len()]
    }
}

/// Reasons a configuration is rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid must be at least 3 columns by 8 rows, got {columns}x{rows}")]
    GridTooSmall { columns: i32, rows: i32 },
    #[error("paddle width {width} must be between 1 and {columns}")]
    PaddleWidth { width: i32, columns: i32 },
    #[error("paddle height {height} must be between 1 and {max} (a quarter of the rows)")]
    PaddleHeight { height: i32, max: i32 },
    #[error("paddle step must be positive, got {0}")]
    PaddleStep(i32),
    #[error("ball_slowness must be non-zero")]
    ZeroSlowness,
    #[error("frame_rate must be non-zero")]
    ZeroFrameRate,
    #[error("block palette must hold between 1 and 256 colors, got {0}")]
    BlockPalette(usize),
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Grid ===
    /// Interior columns
    pub columns: i32,
    /// Interior rows
    pub rows: i32,

    // === Presentation geometry ===
    /// Cell size in pixels
    pub cell_size: u32,
    /// Frame around the arena in pixels
    pub padding: u32,

    // === Paddle ===
    pub paddle_width: i32,
    pub paddle_height: i32,
    pub paddle_step: i32,

    // === Timing ===
    /// Frames between ball updates
    pub ball_slowness: u32,
    pub frame_rate: u32,

    /// Behavior when the ball is lost
    pub loss_policy: LossPolicy,

    pub palette: Palette,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            columns: COLUMNS,
            rows: ROWS,

            cell_size: CELL_SIZE,
            padding: PADDING,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_step: PADDLE_STEP,

            ball_slowness: BALL_SLOWNESS,
            frame_rate: FRAME_RATE,

            loss_policy: LossPolicy::default(),

            palette: Palette::default(),
        }
    }
}

impl Config {
    /// Check every cross-field constraint the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns < 3 || self.rows < 8 {
            return Err(ConfigError::GridTooSmall {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if self.paddle_width < 1 || self.paddle_width > self.columns {
            return Err(ConfigError::PaddleWidth {
                width: self.paddle_width,
                columns: self.columns,
            });
        }
        let max_height = self.rows / 4;
        if self.paddle_height < 1 || self.paddle_height > max_height {
            return Err(ConfigError::PaddleHeight {
                height: self.paddle_height,
                max: max_height,
            });
        }
        if self.paddle_step < 1 {
            return Err(ConfigError::PaddleStep(self.paddle_step));
        }
        if self.ball_slowness == 0 {
            return Err(ConfigError::ZeroSlowness);
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        if self.palette.blocks.is_empty() || self.palette.blocks.len() > 256 {
            return Err(ConfigError::BlockPalette(self.palette.blocks.len()));
        }
        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> String {
        // Plain data with string keys; serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Top row occupied by the paddle
    #[inline]
    pub fn paddle_row(&self) -> i32 {
        self.rows - self.paddle_height
    }

    /// Screen width in pixels
    pub fn screen_width(&self) -> u32 {
        2 * self.padding + self.cell_size * self.columns as u32
    }

    /// Screen height in pixels
    pub fn screen_height(&self) -> u32 {
        2 * self.padding + self.cell_size * self.rows as u32
    }
}
