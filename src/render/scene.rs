//! Scene snapshot for presentation
//!
//! `Scene::capture` copies everything a renderer needs out of a settled
//! `GameState`, so drawing never touches state the next `update` mutates.
//! Positions are in pixels: `padding + cell * cell_size`.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::config::{Config, Rgb};
use crate::sim::{Ball, GameState};

/// Axis-aligned rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Rectangle covering `cells` cells starting at `cell` (may be fractional)
    pub fn from_cells(cell: Vec2, cells: Vec2, config: &Config) -> Self {
        let size = config.cell_size as f32;
        let origin = Vec2::splat(config.padding as f32);
        Self::new(origin + cell * size, cells * size)
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }
}

/// Something drawn on top of the arena background
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    /// Authoritative grid cell (top-left cell for the paddle)
    pub cell: IVec2,
    pub rect: Rect,
    pub color: Rgb,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Screen size in pixels
    pub width: u32,
    pub height: u32,
    /// Interior grid size in cells
    pub columns: i32,
    pub rows: i32,
    pub frame: u64,
    /// Screen fill around the arena
    pub border: Rgb,
    pub background: Rgb,
    /// Interior area
    pub arena: Rect,
    pub blocks: Vec<Sprite>,
    pub paddle: Sprite,
    /// Paddle width and height in cells
    pub paddle_size: IVec2,
    pub ball: Sprite,
    /// Interpolated ball position in cell units
    pub ball_draw: Vec2,
}

/// How far behind its authoritative cell the ball is drawn, in cells.
///
/// Highest right after a move, reaching 0 on the frame before the next one.
pub fn ball_lag(frame_count: u64, slowness: u32) -> f32 {
    let s = slowness.max(1) as u64;
    (s - frame_count % s - 1) as f32 / s as f32
}

/// Sub-cell draw position; never fed back into the simulation
pub fn ball_draw_position(ball: &Ball, frame_count: u64, slowness: u32) -> Vec2 {
    let t = ball_lag(frame_count, slowness);
    ball.pos.as_vec2() - ball.direction.delta().as_vec2() * t
}

impl Scene {
    /// Snapshot a settled state
    pub fn capture(state: &GameState) -> Self {
        let config = state.config();
        let palette = &config.palette;

        let blocks = state
            .grid()
            .blocks()
            .map(|(cell, color)| Sprite {
                cell,
                rect: Rect::from_cells(cell.as_vec2(), Vec2::ONE, config),
                color: palette.block(color),
            })
            .collect();

        let paddle_cell = IVec2::new(state.paddle().left, config.paddle_row());
        let paddle_size = IVec2::new(config.paddle_width, config.paddle_height);
        let paddle = Sprite {
            cell: paddle_cell,
            rect: Rect::from_cells(paddle_cell.as_vec2(), paddle_size.as_vec2(), config),
            color: palette.paddle,
        };

        let ball = state.ball();
        let ball_draw = ball_draw_position(&ball, state.frame_count(), config.ball_slowness);
        let ball = Sprite {
            cell: ball.pos,
            rect: Rect::from_cells(ball_draw, Vec2::ONE, config),
            color: palette.ball,
        };

        Self {
            width: config.screen_width(),
            height: config.screen_height(),
            columns: config.columns,
            rows: config.rows,
            frame: state.frame_count(),
            border: palette.border,
            background: palette.background,
            arena: Rect::from_cells(
                Vec2::ZERO,
                Vec2::new(config.columns as f32, config.rows as f32),
                config,
            ),
            blocks,
            paddle,
            paddle_size,
            ball,
            ball_draw,
        }
    }

    /// Ball cell to draw on a cell-resolution surface
    pub fn ball_draw_cell(&self) -> IVec2 {
        self.ball_draw.round().as_ivec2()
    }
}
