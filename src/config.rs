// Configuration loading and parsing (courtsim.toml).

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "courtsim.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite database path; `":memory:"` for ephemeral runs.
    pub db_path: String,
    /// Fixed seed for reproducible runs; omitted = entropy-seeded.
    pub rng_seed: Option<u64>,
    pub season: SeasonConfig,
    pub sim: SimConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SeasonConfig {
    /// Regular-season length for the tracked team.
    pub games_count: usize,
    /// Active roster size per side; the first five are starters.
    pub roster_size: usize,
    /// The tracked team. Omitted = the first team in the database.
    pub favorite_team: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Half-width of the per-player uniform noise band.
    pub randomness_factor: f64,
    /// Multiplicative boost applied to the tracked team's side.
    pub favorite_boost: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: "courtsim.db".to_string(),
            rng_seed: None,
            season: SeasonConfig::default(),
            sim: SimConfig::default(),
        }
    }
}

impl Default for SeasonConfig {
    fn default() -> Self {
        Self {
            games_count: 82,
            roster_size: 8,
            favorite_team: None,
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            randomness_factor: 0.2,
            favorite_boost: 1.05,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load `courtsim.toml` from the working directory, falling back to defaults
/// when the file does not exist.
pub fn load_config() -> Result<Config, ConfigError> {
    load_from(Path::new(CONFIG_FILE))
}

/// Load and validate a config file; a missing file yields the defaults.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let config = if path.exists() {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        Config::default()
    };
    config.validate()?;
    Ok(config)
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.season.games_count == 0 {
            return Err(ConfigError::ValidationError {
                field: "season.games_count".into(),
                message: "must be at least 1".into(),
            });
        }
        if self.season.roster_size < 5 {
            return Err(ConfigError::ValidationError {
                field: "season.roster_size".into(),
                message: "must be at least 5 (the starters)".into(),
            });
        }
        if !(0.0..1.0).contains(&self.sim.randomness_factor) {
            return Err(ConfigError::ValidationError {
                field: "sim.randomness_factor".into(),
                message: "must be in [0, 1)".into(),
            });
        }
        if self.sim.favorite_boost <= 0.0 {
            return Err(ConfigError::ValidationError {
                field: "sim.favorite_boost".into(),
                message: "must be positive".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.season.games_count, 82);
        assert_eq!(config.season.roster_size, 8);
        assert!((config.sim.randomness_factor - 0.2).abs() < f64::EPSILON);
        assert!((config.sim.favorite_boost - 1.05).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = load_from(Path::new("definitely_not_here.toml")).unwrap();
        assert_eq!(config.db_path, "courtsim.db");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            db_path = ":memory:"

            [season]
            games_count = 20
            "#,
        )
        .unwrap();
        assert_eq!(config.db_path, ":memory:");
        assert_eq!(config.season.games_count, 20);
        assert_eq!(config.season.roster_size, 8);
    }

    #[test]
    fn tiny_roster_rejected() {
        let mut config = Config::default();
        config.season.roster_size = 4;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { field, .. } if field == "season.roster_size"));
    }

    #[test]
    fn out_of_range_randomness_rejected() {
        let mut config = Config::default();
        config.sim.randomness_factor = 1.0;
        assert!(config.validate().is_err());
        config.sim.randomness_factor = -0.1;
        assert!(config.validate().is_err());
    }
}
