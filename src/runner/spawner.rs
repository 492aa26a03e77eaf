//! Timer-driven obstacle and cloud factory.
//!
//! The spawner keeps one deadline per entity type and is polled once per
//! tick with the current clock. At most one obstacle and one cloud are
//! produced per poll; a late poll never produces a burst.

use rand::Rng;

use super::entities::{Cloud, Obstacle, ObstacleKind};
use crate::config::{ConfigError, GameConfig, IntervalRange};
use crate::constants::*;

/// What a single poll produced.
#[derive(Debug, Default)]
pub struct Spawned {
    pub obstacle: Option<Obstacle>,
    pub cloud: Option<Cloud>,
}

#[derive(Debug, Clone)]
pub struct Spawner {
    catalog: Vec<ObstacleKind>,
    obstacle_interval: IntervalRange,
    cloud_interval_ms: u64,
    clouds_enabled: bool,
    /// Clock reading at which the next obstacle is due.
    pub next_obstacle_ms: u64,
    /// Clock reading at which the next cloud is due.
    pub next_cloud_ms: u64,
    next_id: u64,
}

impl Spawner {
    /// Validate `config` and arm both timers from `now_ms`.
    pub fn new(config: &GameConfig, now_ms: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut spawner = Self {
            catalog: config.obstacle_catalog.clone(),
            obstacle_interval: config.obstacle_interval_ms,
            cloud_interval_ms: config.cloud_interval_ms,
            clouds_enabled: config.clouds_enabled,
            next_obstacle_ms: 0,
            next_cloud_ms: 0,
            next_id: 1,
        };
        spawner.reset(now_ms);
        log::debug!(
            "spawner armed: {} obstacle kinds, every {}..={}ms",
            spawner.catalog.len(),
            spawner.obstacle_interval.min_ms,
            spawner.obstacle_interval.max_ms
        );
        Ok(spawner)
    }

    /// Re-arm both timers. The first obstacle of a run waits the longest
    /// configured interval.
    pub fn reset(&mut self, now_ms: u64) {
        self.next_obstacle_ms = now_ms + self.obstacle_interval.max_ms;
        self.next_cloud_ms = now_ms + self.cloud_interval_ms;
    }

    /// Poll the timers.
    pub fn tick<R: Rng>(&mut self, now_ms: u64, rng: &mut R) -> Spawned {
        let mut spawned = Spawned::default();

        if now_ms >= self.next_obstacle_ms {
            let kind = self.catalog[rng.gen_range(0..self.catalog.len())];
            let x = rng.gen_range(SPAWN_X_MIN..=SPAWN_X_MAX);
            let obstacle = Obstacle::new(self.take_id(), kind, x);
            log::debug!("spawned {} #{} at x={:.0}", kind.name(), obstacle.id, x);
            spawned.obstacle = Some(obstacle);

            let delay = rng.gen_range(self.obstacle_interval.min_ms..=self.obstacle_interval.max_ms);
            self.next_obstacle_ms = now_ms + delay;
        }

        if self.clouds_enabled && now_ms >= self.next_cloud_ms {
            let x = rng.gen_range(SPAWN_X_MIN..=SPAWN_X_MAX);
            let y = rng.gen_range(CLOUD_Y_MIN..=CLOUD_Y_MAX);
            spawned.cloud = Some(Cloud::new(self.take_id(), x, y));
            self.next_cloud_ms = now_ms + self.cloud_interval_ms;
        }

        spawned
    }

    fn take_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::entities::Entity;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_empty_catalog_fails_at_construction() {
        let config = GameConfig {
            obstacle_catalog: Vec::new(),
            ..GameConfig::default()
        };
        assert!(matches!(
            Spawner::new(&config, 0),
            Err(ConfigError::EmptyCatalog)
        ));
    }

    #[test]
    fn test_nothing_spawns_before_deadline() {
        let mut spawner = Spawner::new(&GameConfig::default(), 0).unwrap();
        let mut rng = rng();
        let spawned = spawner.tick(1999, &mut rng);
        assert!(spawned.obstacle.is_none());
        assert!(spawned.cloud.is_none());
    }

    #[test]
    fn test_spawns_at_deadline_inside_band() {
        let mut spawner = Spawner::new(&GameConfig::default(), 0).unwrap();
        let mut rng = rng();
        let spawned = spawner.tick(2000, &mut rng);

        let obstacle = spawned.obstacle.expect("obstacle due at 2000ms");
        let cx = obstacle.rect().center_x();
        assert!((SPAWN_X_MIN..=SPAWN_X_MAX).contains(&cx));

        let cloud = spawned.cloud.expect("cloud due at 2000ms");
        let bottom = cloud.rect().bottom();
        assert!((CLOUD_Y_MIN..=CLOUD_Y_MAX).contains(&bottom));
        assert_ne!(obstacle.id, cloud.id);
    }

    #[test]
    fn test_next_obstacle_within_interval() {
        let mut spawner = Spawner::new(&GameConfig::default(), 0).unwrap();
        let mut rng = rng();
        for _ in 0..50 {
            let now = spawner.next_obstacle_ms;
            spawner.tick(now, &mut rng);
            let delay = spawner.next_obstacle_ms - now;
            assert!((1500..=2000).contains(&delay), "delay {delay} out of range");
        }
    }

    #[test]
    fn test_late_poll_spawns_once() {
        let mut spawner = Spawner::new(&GameConfig::default(), 0).unwrap();
        let mut rng = rng();
        assert!(spawner.tick(60_000, &mut rng).obstacle.is_some());
        assert!(spawner.tick(60_001, &mut rng).obstacle.is_none());
    }

    #[test]
    fn test_clouds_can_be_disabled() {
        let config = GameConfig {
            clouds_enabled: false,
            ..GameConfig::default()
        };
        let mut spawner = Spawner::new(&config, 0).unwrap();
        let mut rng = rng();
        for t in (0..20_000).step_by(16) {
            assert!(spawner.tick(t, &mut rng).cloud.is_none());
        }
    }

    #[test]
    fn test_kind_choice_covers_catalog() {
        let config = GameConfig {
            obstacle_interval_ms: IntervalRange::fixed(10),
            ..GameConfig::default()
        };
        let mut spawner = Spawner::new(&config, 0).unwrap();
        let mut rng = rng();
        let mut counts = std::collections::HashMap::new();
        for t in (0..20_000).step_by(10) {
            if let Some(o) = spawner.tick(t, &mut rng).obstacle {
                *counts.entry(o.kind).or_insert(0u32) += 1;
            }
        }
        // Uniform over five kinds: every kind shows up with a sane share.
        assert_eq!(counts.len(), 5);
        let total: u32 = counts.values().sum();
        for count in counts.values() {
            assert!(*count > total / 10, "{counts:?}");
        }
    }

    #[test]
    fn test_reset_rearms_from_now() {
        let mut spawner = Spawner::new(&GameConfig::default(), 0).unwrap();
        spawner.reset(10_000);
        assert_eq!(spawner.next_obstacle_ms, 12_000);
        assert_eq!(spawner.next_cloud_ms, 12_000);
    }

    #[test]
    fn test_ids_increase() {
        let config = GameConfig {
            obstacle_interval_ms: IntervalRange::fixed(100),
            clouds_enabled: false,
            ..GameConfig::default()
        };
        let mut spawner = Spawner::new(&config, 0).unwrap();
        let mut rng = rng();
        let ids: Vec<u64> = (1..=5)
            .filter_map(|i| spawner.tick(i * 100, &mut rng).obstacle)
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }
}
