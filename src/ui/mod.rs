//! Terminal rendering for the binary. The library never depends on this.

pub mod game_common;
pub mod runner_scene;
