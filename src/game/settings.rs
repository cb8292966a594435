use crate::error::ConfigError;

/// Parameters a game is started or restarted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSettings {
    /// Search depth of the machine player, at least 1.
    pub level: usize,
    /// Initial seeds in every non-store pit.
    pub seeds_per_pit: u32,
    /// Pits per side, excluding the store. At least 1.
    pub pits_per_player: usize,
}

impl GameSettings {
    pub fn new(level: usize, seeds_per_pit: u32, pits_per_player: usize) -> Self {
        GameSettings {
            level,
            seeds_per_pit,
            pits_per_player,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.level == 0 {
            return Err(ConfigError::Validation("level must be >= 1".into()));
        }
        if self.pits_per_player == 0 {
            return Err(ConfigError::Validation(
                "pits_per_player must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        GameSettings::new(3, 3, 6)
    }
}
