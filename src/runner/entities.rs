//! Runner entities: the shared `Body` plus the obstacle, cloud and player
//! variants built on it.
//!
//! Every variant owns its position and advances it in its own `update`;
//! there is no shared base type beyond `Body` and the `Entity` accessors.

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::constants::*;

/// Position, size, animation counter and liveness shared by all entities.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub rect: Rect,
    /// Fractional animation counter, truncated for display.
    pub frame: f64,
    /// Cleared exactly once, when the entity leaves the screen or is removed.
    pub alive: bool,
}

impl Body {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            frame: 0.0,
            alive: true,
        }
    }

    /// Visual frame to draw.
    pub fn frame_index(&self) -> usize {
        self.frame as usize
    }

    /// Move left by `speed`; dies once the left edge reaches `DESPAWN_X`.
    fn scroll(&mut self, speed: f64) {
        if !self.alive {
            return;
        }
        self.rect.x -= speed;
        if self.rect.x <= DESPAWN_X {
            self.alive = false;
        }
    }

    fn advance_frame(&mut self, frames: usize) {
        self.frame += ANIM_STEP;
        if self.frame >= frames as f64 {
            self.frame = 0.0;
        }
    }
}

/// Which image the renderer should draw for an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Cloud,
    Cactus(u8),
    Pterodactyl(usize),
    DinoWalk(usize),
    DinoJump,
    DinoCollide,
}

/// Read access common to every entity variant.
pub trait Entity {
    fn body(&self) -> &Body;
    fn sprite(&self) -> Sprite;

    fn rect(&self) -> Rect {
        self.body().rect
    }

    fn is_alive(&self) -> bool {
        self.body().alive
    }
}

// ── Obstacles ────────────────────────────────────────────────────────

/// Obstacle catalog entry. Ground variants are numbered 1..=4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    Ground(u8),
    Airborne,
}

impl ObstacleKind {
    pub const GROUND_VARIANTS: std::ops::RangeInclusive<u8> = 1..=4;

    /// The five-entry catalog: one pterodactyl and four cacti.
    pub fn default_catalog() -> Vec<ObstacleKind> {
        let mut catalog = vec![ObstacleKind::Airborne];
        catalog.extend(Self::GROUND_VARIANTS.map(ObstacleKind::Ground));
        catalog
    }

    pub fn is_valid(&self) -> bool {
        match self {
            Self::Ground(v) => Self::GROUND_VARIANTS.contains(v),
            Self::Airborne => true,
        }
    }

    /// Hitbox size `(w, h)`.
    pub fn size(&self) -> (f64, f64) {
        match self {
            Self::Ground(1) => (25.0, 53.0),
            Self::Ground(2) => (37.0, 53.0),
            Self::Ground(3) => (50.0, 53.0),
            Self::Ground(_) => (50.0, 75.0),
            Self::Airborne => (69.0, 60.0),
        }
    }

    /// Bottom edge the obstacle is placed on.
    pub fn bottom(&self) -> f64 {
        match self {
            Self::Ground(_) => GROUND_OBSTACLE_BOTTOM,
            Self::Airborne => AIRBORNE_OBSTACLE_BOTTOM,
        }
    }

    pub fn is_airborne(&self) -> bool {
        matches!(self, Self::Airborne)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ground(_) => "cactus",
            Self::Airborne => "pterodactyl",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u64,
    pub kind: ObstacleKind,
    pub body: Body,
}

impl Obstacle {
    /// Place a new obstacle with its bottom edge centered on `center_x`.
    pub fn new(id: u64, kind: ObstacleKind, center_x: f64) -> Self {
        let (w, h) = kind.size();
        Self {
            id,
            kind,
            body: Body::new(Rect::from_midbottom(center_x, kind.bottom(), w, h)),
        }
    }

    pub fn update(&mut self) {
        if self.kind.is_airborne() {
            self.body.advance_frame(FLAP_FRAMES);
        }
        self.body.scroll(OBSTACLE_SPEED);
    }
}

impl Entity for Obstacle {
    fn body(&self) -> &Body {
        &self.body
    }

    fn sprite(&self) -> Sprite {
        match self.kind {
            ObstacleKind::Ground(v) => Sprite::Cactus(v),
            ObstacleKind::Airborne => Sprite::Pterodactyl(self.body.frame_index()),
        }
    }
}

// ── Clouds ───────────────────────────────────────────────────────────

pub const CLOUD_WIDTH: f64 = 69.0;
pub const CLOUD_HEIGHT: f64 = 21.0;

/// Decorative background cloud. Never collides.
#[derive(Debug, Clone, PartialEq)]
pub struct Cloud {
    pub id: u64,
    pub body: Body,
}

impl Cloud {
    pub fn new(id: u64, center_x: f64, bottom: f64) -> Self {
        Self {
            id,
            body: Body::new(Rect::from_midbottom(
                center_x,
                bottom,
                CLOUD_WIDTH,
                CLOUD_HEIGHT,
            )),
        }
    }

    pub fn update(&mut self) {
        self.body.scroll(CLOUD_SPEED);
    }
}

impl Entity for Cloud {
    fn body(&self) -> &Body {
        &self.body
    }

    fn sprite(&self) -> Sprite {
        Sprite::Cloud
    }
}

// ── Player ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Grounded,
    Airborne,
    Collided,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub body: Body,
    /// Rows per tick, negative = upward. Zero whenever grounded.
    pub velocity: f64,
    pub state: PlayerState,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            body: Body::new(Rect::from_midbottom(
                PLAYER_ANCHOR_X,
                GROUND_BASELINE,
                PLAYER_WIDTH,
                PLAYER_HEIGHT,
            )),
            velocity: 0.0,
            state: PlayerState::Grounded,
        }
    }

    /// True when the player's feet are at or below the baseline.
    pub fn is_on_ground(&self) -> bool {
        self.body.rect.bottom() >= GROUND_BASELINE
    }

    /// Advance one tick. `jump` is the sampled jump signal; it is ignored
    /// unless the player is standing on the ground.
    pub fn update(&mut self, jump: bool) {
        match self.state {
            PlayerState::Collided => {}
            PlayerState::Grounded if jump && self.is_on_ground() => {
                self.velocity = JUMP_VELOCITY;
                self.body.rect.y += self.velocity;
                self.state = PlayerState::Airborne;
            }
            PlayerState::Grounded => {
                self.body.advance_frame(WALK_FRAMES);
            }
            PlayerState::Airborne => {
                self.velocity += GRAVITY;
                self.body.rect.y += self.velocity;
                if self.is_on_ground() {
                    self.land();
                }
            }
        }
    }

    /// Collision signal from the session.
    pub fn collide(&mut self) {
        self.state = PlayerState::Collided;
    }

    /// Back on the baseline, standing still, first walk frame.
    pub fn reset(&mut self) {
        self.land();
        self.body.frame = 0.0;
    }

    fn land(&mut self) {
        self.body.rect.set_bottom(GROUND_BASELINE);
        self.velocity = 0.0;
        self.state = PlayerState::Grounded;
    }
}

impl Entity for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn sprite(&self) -> Sprite {
        match self.state {
            PlayerState::Grounded => Sprite::DinoWalk(self.body.frame_index()),
            PlayerState::Airborne => Sprite::DinoJump,
            PlayerState::Collided => Sprite::DinoCollide,
        }
    }
}
