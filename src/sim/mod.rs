//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One `update` per frame, no internal timing
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod direction;
pub mod generate;
pub mod grid;
pub mod state;
pub mod tick;

pub use direction::{Adjacent, Direction, Occupancy};
pub use generate::{BandLayout, generate};
pub use grid::{Cell, Grid};
pub use state::{Ball, GameEvent, GameState, Paddle};
pub use tick::FrameInput;
