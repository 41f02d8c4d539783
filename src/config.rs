//! Runtime session configuration
//!
//! Defaults come from [`crate::consts`]; a JSON document may override them.

use serde::{Deserialize, Serialize};

use crate::consts::{LEVEL_COMPLETE_DELAY, STARTING_BALLS};
use crate::error::{GameError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Balls granted on entering Init
    pub starting_balls: u8,
    /// Delay (seconds) between LevelCompleted and LoadLevel
    pub level_complete_delay: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            starting_balls: STARTING_BALLS,
            level_complete_delay: LEVEL_COMPLETE_DELAY,
        }
    }
}

impl SessionConfig {
    /// Parse and validate a config document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.starting_balls == 0 {
            return Err(GameError::InvalidConfig(
                "starting_balls must be at least 1".to_string(),
            ));
        }
        if !self.level_complete_delay.is_finite() || self.level_complete_delay < 0.0 {
            return Err(GameError::InvalidConfig(format!(
                "level_complete_delay must be a non-negative number, got {}",
                self.level_complete_delay
            )));
        }
        Ok(())
    }
}
