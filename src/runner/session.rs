//! The game session: per-tick orchestration of spawning, movement,
//! collision and scoring, plus the Running/GameOver state machine.

use rand::Rng;

use super::collision::first_collision;
use super::entities::{Cloud, Entity, Obstacle, Player, Sprite};
use super::geometry::Rect;
use super::score::ScoreKeeper;
use super::spawner::Spawner;
use crate::config::{ConfigError, GameConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    GameOver,
}

/// Input sampled once at the start of a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump is requested (key or gesture held).
    pub jump: bool,
    /// Restart is requested (fresh press). Only read during GameOver.
    pub restart: bool,
}

/// What happened during a tick, for the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running,
    Collided { score: u32, new_high_score: bool },
    GameOver,
    Restarted,
}

/// One thing for the renderer to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub rect: Rect,
    pub sprite: Sprite,
}

impl DrawCommand {
    fn of(entity: &impl Entity) -> Self {
        Self {
            rect: entity.rect(),
            sprite: entity.sprite(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub state: SessionState,
    pub player: Player,
    /// Live obstacles in spawn order.
    pub obstacles: Vec<Obstacle>,
    /// Live clouds in spawn order. Survive restarts.
    pub clouds: Vec<Cloud>,
    pub scores: ScoreKeeper,
    pub spawner: Spawner,
}

impl Session {
    /// Start a running session at clock reading `now_ms`.
    pub fn new(config: &GameConfig, now_ms: u64) -> Result<Self, ConfigError> {
        Ok(Self {
            state: SessionState::Running,
            player: Player::new(),
            obstacles: Vec::new(),
            clouds: Vec::new(),
            scores: ScoreKeeper::new(now_ms),
            spawner: Spawner::new(config, now_ms)?,
        })
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn score(&self) -> u32 {
        self.scores.score
    }

    pub fn high_score(&self) -> u32 {
        self.scores.high_score
    }

    /// Advance one tick.
    ///
    /// In GameOver the player and the score stay frozen while the scenery
    /// keeps scrolling off; nothing new spawns and nothing collides.
    pub fn tick<R: Rng>(&mut self, now_ms: u64, input: TickInput, rng: &mut R) -> TickOutcome {
        match self.state {
            SessionState::Running => self.step_running(now_ms, input.jump, rng),
            SessionState::GameOver => {
                if input.restart && self.restart(now_ms) {
                    return TickOutcome::Restarted;
                }
                for cloud in &mut self.clouds {
                    cloud.update();
                }
                for obstacle in &mut self.obstacles {
                    obstacle.update();
                }
                self.drop_dead();
                TickOutcome::GameOver
            }
        }
    }

    /// Drop anything that scrolled off.
    fn drop_dead(&mut self) {
        self.clouds.retain(|c| c.is_alive());
        self.obstacles.retain(|o| {
            if !o.is_alive() {
                log::debug!("despawned {} #{}", o.kind.name(), o.id);
            }
            o.is_alive()
        });
    }

    fn step_running<R: Rng>(&mut self, now_ms: u64, jump: bool, rng: &mut R) -> TickOutcome {
        // 1. Spawn
        let spawned = self.spawner.tick(now_ms, rng);
        self.obstacles.extend(spawned.obstacle);
        self.clouds.extend(spawned.cloud);

        // 2. Move, in draw order
        for cloud in &mut self.clouds {
            cloud.update();
        }
        self.player.update(jump);
        for obstacle in &mut self.obstacles {
            obstacle.update();
        }

        // 3. Drop anything that scrolled off
        self.drop_dead();

        // 4. Score, then collision
        self.scores.update(now_ms);
        if let Some(hit) = first_collision(&self.player, &self.obstacles) {
            let (id, name) = (hit.id, hit.kind.name());
            self.player.collide();
            self.state = SessionState::GameOver;
            let new_high_score = self.scores.record_high_score();
            log::info!(
                "game over: hit {} #{} with score {} (high {})",
                name,
                id,
                self.scores.score,
                self.scores.high_score
            );
            return TickOutcome::Collided {
                score: self.scores.score,
                new_high_score,
            };
        }

        TickOutcome::Running
    }

    /// Start a new run. No-op (returns false) while already running.
    pub fn restart(&mut self, now_ms: u64) -> bool {
        if self.state == SessionState::Running {
            return false;
        }
        self.scores.record_high_score();
        self.obstacles.clear();
        self.scores.reset(now_ms);
        self.spawner.reset(now_ms);
        self.player.reset();
        self.state = SessionState::Running;
        log::info!("restarted (high score {})", self.scores.high_score);
        true
    }

    /// Everything to draw this frame, back to front.
    pub fn draw_list(&self) -> Vec<DrawCommand> {
        self.clouds
            .iter()
            .map(DrawCommand::of)
            .chain(std::iter::once(DrawCommand::of(&self.player)))
            .chain(self.obstacles.iter().map(DrawCommand::of))
            .collect()
    }
}
