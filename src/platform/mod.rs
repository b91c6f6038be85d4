//! Platform abstraction layer
//!
//! Collaborators around the simulation core:
//! - Frame pacing
//! - Terminal input and drawing (unix only)

pub mod clock;
#[cfg(unix)]
pub mod terminal;

pub use clock::FrameClock;
