use std::path::Path;
use std::time::Duration;

use log::warn;

use crate::error::ConfigError;
use crate::game::{GameSettings, Player};

/// Parameters of a new game.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub level: usize,
    pub seeds_per_pit: u32,
    pub pits_per_player: usize,
    pub opening_player: Player,
}

impl Default for GameConfig {
    fn default() -> Self {
        let settings = GameSettings::default();
        GameConfig {
            level: settings.level,
            seeds_per_pit: settings.seeds_per_pit,
            pits_per_player: settings.pits_per_player,
            opening_player: Player::Human,
        }
    }
}

impl GameConfig {
    pub fn settings(&self) -> GameSettings {
        GameSettings::new(self.level, self.seeds_per_pit, self.pits_per_player)
    }
}

/// Behaviour of the machine player's worker thread.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Pause before each machine move is applied, in milliseconds.
    pub move_delay_ms: u64,
}

impl Default for MachineConfig {
    fn default() -> Self {
        MachineConfig { move_delay_ms: 500 }
    }
}

impl MachineConfig {
    pub fn move_delay(&self) -> Duration {
        Duration::from_millis(self.move_delay_ms)
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub machine: MachineConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.level == 0 {
            return Err(ConfigError::Validation("game.level must be >= 1".into()));
        }
        if self.game.pits_per_player == 0 {
            return Err(ConfigError::Validation(
                "game.pits_per_player must be >= 1".into(),
            ));
        }
        if self.game.opening_player == Player::Nobody {
            return Err(ConfigError::Validation(
                "game.opening_player must be human or computer".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
