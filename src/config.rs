//! Game configuration.
//!
//! Every key is optional in TOML; missing keys fall back to the classic
//! 4×4 / 2048 / 10%-fours setup.
//!
//! ```toml
//! size = 5
//! win_tile = 4096
//! four_probability = 0.1
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::spawn::SpawnRule;
use crate::engine::{Tile, MAX_SIZE, MIN_SIZE};
use crate::error::GameError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    /// Side length of the square grid.
    #[serde(default = "defaults::size")]
    pub size: usize,
    /// Tile that counts as a win. Informational; play continues past it.
    #[serde(default = "defaults::win_tile")]
    pub win_tile: Tile,
    /// Chance that a spawned tile is a 4 instead of a 2.
    #[serde(default = "defaults::four_probability")]
    pub four_probability: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: defaults::size(),
            win_tile: defaults::win_tile(),
            four_probability: defaults::four_probability(),
        }
    }
}

impl GameConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self, GameError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate a config from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, GameError> {
        let cfg: Self = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.size) {
            return Err(GameError::InvalidConfig(format!(
                "size {} outside {MIN_SIZE}..={MAX_SIZE}",
                self.size
            )));
        }
        if self.win_tile < 4 || !self.win_tile.is_power_of_two() {
            return Err(GameError::InvalidConfig(format!(
                "win_tile {} must be a power of two >= 4",
                self.win_tile
            )));
        }
        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(GameError::InvalidConfig(format!(
                "four_probability {} outside 0.0..=1.0",
                self.four_probability
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn spawn_rule(&self) -> SpawnRule {
        SpawnRule::new(self.four_probability)
    }
}

mod defaults {
    use crate::engine::spawn::DEFAULT_FOUR_PROBABILITY;
    use crate::engine::{Tile, DEFAULT_SIZE};

    pub fn size() -> usize { DEFAULT_SIZE }
    pub fn win_tile() -> Tile { 2048 }
    pub fn four_probability() -> f64 { DEFAULT_FOUR_PROBABILITY }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_are_classic() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.size, 4);
        assert_eq!(cfg.win_tile, 2048);
        assert_eq!(cfg.four_probability, 0.1);
        cfg.validate().unwrap();
    }

    #[test]
    fn empty_toml_uses_defaults() {
        assert_eq!(GameConfig::from_toml_str("").unwrap(), GameConfig::default());
    }

    #[test]
    fn partial_toml_overrides() {
        let cfg = GameConfig::from_toml_str("size = 5\nwin_tile = 4096\n").unwrap();
        assert_eq!(cfg.size, 5);
        assert_eq!(cfg.win_tile, 4096);
        assert_eq!(cfg.four_probability, 0.1);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(matches!(GameConfig::from_toml_str("size = 1"), Err(GameError::InvalidConfig(_))));
        assert!(matches!(GameConfig::from_toml_str("size = 8"), Err(GameError::InvalidConfig(_))));
        assert!(matches!(GameConfig::from_toml_str("win_tile = 100"), Err(GameError::InvalidConfig(_))));
        assert!(matches!(GameConfig::from_toml_str("win_tile = 2"), Err(GameError::InvalidConfig(_))));
        assert!(matches!(
            GameConfig::from_toml_str("four_probability = 1.5"),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_unknown_keys_and_bad_syntax() {
        assert!(matches!(GameConfig::from_toml_str("colour = \"red\""), Err(GameError::Toml(_))));
        assert!(matches!(GameConfig::from_toml_str("size = "), Err(GameError::Toml(_))));
    }

    #[test]
    fn loads_from_file() {
        let mut tmp = NamedTempFile::new().unwrap();
        writeln!(tmp, "size = 3").unwrap();
        writeln!(tmp, "four_probability = 0.25").unwrap();
        let cfg = GameConfig::from_toml(tmp.path()).unwrap();
        assert_eq!(cfg.size, 3);
        assert_eq!(cfg.spawn_rule(), SpawnRule::new(0.25));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = GameConfig::from_toml(dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, GameError::Io(_)));
    }
}
