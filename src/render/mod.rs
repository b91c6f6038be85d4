//! Presentation boundary
//!
//! Renderers consume owned `Scene` snapshots rather than the live state.

pub mod scene;

pub use scene::{Rect, Scene, Sprite, ball_draw_position, ball_lag};
