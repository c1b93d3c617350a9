use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::{error::ConfigError, game::GameState, player::Player, CONNECT, DEFAULT_DEPTH, HEIGHT, WIDTH};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub game: GameConfig,
    pub pacing: PacingConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Look-ahead depth in plies
    pub depth: u32,
    /// Seed for tie-breaking, drawn from the OS when absent
    pub seed: Option<u64>,
    /// Evaluate root moves in parallel
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: DEFAULT_DEPTH,
            seed: None,
            parallel: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// The side the human plays
    pub human: Player,
    /// Let the engine play both sides
    pub ai_vs_ai: bool,
    /// 0-based column digits played before the game is handed over
    pub opening: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            human: Player::Red,
            ai_vs_ai: false,
            opening: None,
        }
    }
}

impl GameConfig {
    /// The human's side, or `None` when the engine plays both
    pub fn human_player(&self) -> Option<Player> {
        if self.ai_vs_ai {
            None
        } else {
            Some(self.human)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub enabled: bool,
    pub ceiling_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        PacingConfig {
            enabled: true,
            ceiling_ms: 2000,
        }
    }
}

impl PacingConfig {
    pub fn ceiling(&self) -> Duration {
        Duration::from_millis(self.ceiling_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: "warn".to_string(),
            json: false,
        }
    }
}

impl LogConfig {
    pub fn level(&self) -> Result<Level, ConfigError> {
        Level::from_str(&self.level).map_err(|_| {
            ConfigError::Validation(format!(
                "log.level must be one of trace, debug, info, warn, error (got '{}')",
                self.level
            ))
        })
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.depth == 0 {
            return Err(ConfigError::Validation(
                "search.depth must be > 0".into(),
            ));
        }
        if self.search.depth as usize > WIDTH * HEIGHT {
            return Err(ConfigError::Validation(format!(
                "search.depth must be <= {}",
                WIDTH * HEIGHT
            )));
        }
        if let Some(opening) = &self.game.opening {
            GameState::<WIDTH, HEIGHT, CONNECT>::from_moves(opening).map_err(|e| {
                ConfigError::Validation(format!("game.opening is not playable: {}", e))
            })?;
        }
        self.log.level()?;
        Ok(())
    }
}
