//! Dino - terminal dinosaur runner.
//!
//! The library holds the whole game core (entities, spawning, collision,
//! scoring, session state machine) plus input plumbing, so it can be tested
//! without a terminal. Rendering lives in the binary.

pub mod config;
pub mod constants;
pub mod gesture;
pub mod input;
pub mod runner;
pub mod utils;

pub use config::{ConfigError, GameConfig, IntervalRange};
pub use constants::*;
pub use runner::{Session, SessionState, TickInput, TickOutcome};
