//! Game configuration loaded from `~/.dino/config.json` or `--config <path>`.
//!
//! Only spawn pacing, the obstacle catalog and the cloud layer are
//! configurable. Physics lives in `constants.rs`.

use std::fmt;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::runner::entities::ObstacleKind;
use crate::utils::persistence;

/// Inclusive range of milliseconds between two spawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl IntervalRange {
    pub fn fixed(ms: u64) -> Self {
        Self {
            min_ms: ms,
            max_ms: ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub obstacle_interval_ms: IntervalRange,
    pub cloud_interval_ms: u64,
    pub obstacle_catalog: Vec<ObstacleKind>,
    pub clouds_enabled: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            obstacle_interval_ms: IntervalRange {
                min_ms: DEFAULT_OBSTACLE_INTERVAL_MIN_MS,
                max_ms: DEFAULT_OBSTACLE_INTERVAL_MAX_MS,
            },
            cloud_interval_ms: DEFAULT_CLOUD_INTERVAL_MS,
            obstacle_catalog: ObstacleKind::default_catalog(),
            clouds_enabled: true,
        }
    }
}

impl GameConfig {
    /// Check everything the spawner relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.obstacle_catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        if let Some(ObstacleKind::Ground(v)) =
            self.obstacle_catalog.iter().find(|k| !k.is_valid())
        {
            return Err(ConfigError::InvalidGroundVariant(*v));
        }
        let range = self.obstacle_interval_ms;
        if range.min_ms == 0 || range.min_ms > range.max_ms {
            return Err(ConfigError::InvalidInterval {
                min_ms: range.min_ms,
                max_ms: range.max_ms,
            });
        }
        if self.cloud_interval_ms == 0 {
            return Err(ConfigError::ZeroCloudInterval);
        }
        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config = Self::from_json(&json)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `~/.dino/config.json` if it exists, defaults otherwise.
    pub fn load_default_location() -> Result<Self, ConfigError> {
        let path = persistence::data_path(CONFIG_FILE).map_err(ConfigError::Io)?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            log::info!("no config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyCatalog,
    InvalidGroundVariant(u8),
    InvalidInterval { min_ms: u64, max_ms: u64 },
    ZeroCloudInterval,
    Io(io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCatalog => write!(f, "obstacle catalog is empty"),
            Self::InvalidGroundVariant(v) => {
                write!(f, "ground obstacle variant {} is not in 1..=4", v)
            }
            Self::InvalidInterval { min_ms, max_ms } => write!(
                f,
                "obstacle interval {}..={}ms is invalid (min must be > 0 and <= max)",
                min_ms, max_ms
            ),
            Self::ZeroCloudInterval => write!(f, "cloud interval must be > 0"),
            Self::Io(e) => write!(f, "could not read config: {}", e),
            Self::Parse(e) => write!(f, "could not parse config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.obstacle_interval_ms.min_ms, 1500);
        assert_eq!(config.obstacle_interval_ms.max_ms, 2000);
        assert_eq!(config.cloud_interval_ms, 2000);
        assert_eq!(config.obstacle_catalog.len(), 5);
        assert!(config.clouds_enabled);
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let config = GameConfig {
            obstacle_catalog: Vec::new(),
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyCatalog)));
    }

    #[test]
    fn test_bad_ground_variant_rejected() {
        let config = GameConfig {
            obstacle_catalog: vec![ObstacleKind::Ground(1), ObstacleKind::Ground(7)],
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidGroundVariant(7))
        ));
    }

    #[test]
    fn test_inverted_interval_rejected() {
        let config = GameConfig {
            obstacle_interval_ms: IntervalRange {
                min_ms: 2000,
                max_ms: 1000,
            },
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidInterval { .. })
        ));
    }

    #[test]
    fn test_zero_intervals_rejected() {
        let config = GameConfig {
            obstacle_interval_ms: IntervalRange::fixed(0),
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            cloud_interval_ms: 0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroCloudInterval)
        ));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = GameConfig::from_json(r#"{ "clouds_enabled": false }"#).unwrap();
        assert!(!config.clouds_enabled);
        assert_eq!(config.obstacle_catalog, ObstacleKind::default_catalog());
    }

    #[test]
    fn test_json_catalog() {
        let config = GameConfig::from_json(
            r#"{ "obstacle_catalog": ["airborne", {"ground": 2}],
                 "obstacle_interval_ms": { "min_ms": 800, "max_ms": 800 } }"#,
        )
        .unwrap();
        assert_eq!(
            config.obstacle_catalog,
            vec![ObstacleKind::Airborne, ObstacleKind::Ground(2)]
        );
        assert_eq!(config.obstacle_interval_ms, IntervalRange::fixed(800));
    }

    #[test]
    fn test_json_errors() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "obstacle_catalog": [] }"#),
            Err(ConfigError::EmptyCatalog)
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GameConfig::load_from(Path::new("/nonexistent/dino/config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("could not read config"));
    }
}
