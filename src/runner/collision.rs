//! Player vs. obstacle collision detection.

use super::entities::{Entity, Obstacle, Player};

/// First live obstacle whose hitbox overlaps the player's, if any.
pub fn first_collision<'a>(player: &Player, obstacles: &'a [Obstacle]) -> Option<&'a Obstacle> {
    let hitbox = player.rect();
    obstacles
        .iter()
        .filter(|o| o.is_alive())
        .find(|o| o.rect().intersects(&hitbox))
}

/// True if the player overlaps any live obstacle.
pub fn check_collision(player: &Player, obstacles: &[Obstacle]) -> bool {
    first_collision(player, obstacles).is_some()
}
