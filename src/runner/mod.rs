//! Dino runner core: entities, spawning, collision, scoring and the session
//! state machine. Nothing here touches the terminal.

pub mod collision;
pub mod entities;
pub mod geometry;
pub mod score;
pub mod session;
pub mod spawner;

pub use collision::{check_collision, first_collision};
pub use entities::{Body, Cloud, Entity, Obstacle, ObstacleKind, Player, PlayerState, Sprite};
pub use geometry::Rect;
pub use score::ScoreKeeper;
pub use session::{DrawCommand, Session, SessionState, TickInput, TickOutcome};
pub use spawner::{Spawned, Spawner};
