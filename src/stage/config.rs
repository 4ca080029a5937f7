//! Stage configuration
//!
//! Built once at startup and handed to [`Stage::new`](super::Stage::new);
//! round-trips through RON so setups can live in data files.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::StageError;

/// Tunable parameters for a play stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageConfig {
    /// Field width in pixels
    pub width: i32,
    /// Field height in pixels
    pub height: i32,
    /// Width of the left and right wall strips
    pub wall_width: i32,
    /// Number of enemies in the opening formation
    pub enemy_count: usize,
    /// Left edge of the formation row
    pub formation_left: i32,
    /// Top edge of the formation row
    pub formation_top: i32,
    /// Horizontal pitch between formation slots
    pub formation_pitch: i32,
    /// Milliseconds between dive scheduler rounds
    pub dive_interval_ms: u32,
    /// Maximum enemies promoted into a dive per round
    pub max_divers: usize,
    /// Seed for the stage's random number generator
    pub seed: u64,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 300,
            wall_width: 32,
            enemy_count: 10,
            formation_left: 64,
            formation_top: 20,
            formation_pitch: 26,
            dive_interval_ms: 3000,
            max_divers: 2,
            seed: 0,
        }
    }
}

impl StageConfig {
    /// Set the field size
    #[must_use]
    pub const fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the opening formation size
    #[must_use]
    pub const fn with_enemy_count(mut self, count: usize) -> Self {
        self.enemy_count = count;
        self
    }

    /// Set the dive scheduler interval
    #[must_use]
    pub const fn with_dive_interval_ms(mut self, interval: u32) -> Self {
        self.dive_interval_ms = interval;
        self
    }

    /// Set the dive scheduler's per-round cap
    #[must_use]
    pub const fn with_max_divers(mut self, max_divers: usize) -> Self {
        self.max_divers = max_divers;
        self
    }

    /// Set the RNG seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Save the config to a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save_ron(&self, path: impl AsRef<Path>) -> Result<(), StageError> {
        let ron_string = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| StageError::Serialize(e.to_string()))?;
        fs::write(path, ron_string).map_err(|e| StageError::Io(e.to_string()))?;
        Ok(())
    }

    /// Load a config from a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or deserialization fails
    pub fn load_ron(path: impl AsRef<Path>) -> Result<Self, StageError> {
        let content = fs::read_to_string(path).map_err(|e| StageError::Io(e.to_string()))?;
        let config: StageConfig =
            ron::from_str(&content).map_err(|e| StageError::Deserialize(e.to_string()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builders() {
        let config = StageConfig::default()
            .with_size(800, 600)
            .with_enemy_count(4)
            .with_seed(99);
        assert_eq!(config.width, 800);
        assert_eq!(config.enemy_count, 4);
        assert_eq!(config.seed, 99);
    }

    #[test]
    fn test_config_ron_round_trip() {
        let config = StageConfig::default().with_dive_interval_ms(1234);
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::default()).unwrap();
        let loaded: StageConfig = ron::from_str(&ron_str).unwrap();
        assert_eq!(loaded.dive_interval_ms, 1234);
        assert_eq!(loaded.enemy_count, config.enemy_count);
    }
}
