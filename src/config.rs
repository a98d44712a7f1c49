//! Configuration system for the selection demo.
//!
//! Supports YAML configuration files with sensible defaults.

use crate::environment::EnvironmentConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub population: PopulationConfig,
    #[serde(default)]
    pub environment: EnvironmentConfig,
    #[serde(default)]
    pub evolution: EvolutionConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Population configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Number of specimens in every generation
    pub size: usize,
}

/// Selection and reproduction parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Probability of a phenotype flip per specimen on a mutate command
    pub mutation_rate: f64,
    /// Weighted draws per eliminate command
    pub elimination_batch: usize,
    /// Order children by parent index instead of draw order
    pub sort_by_parent: bool,
}

/// Window and history view configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Window width in pixels
    pub width: f32,
    /// Window height in pixels
    pub height: f32,
    /// Generations visible at once
    pub visible_rows: usize,
    /// Pause after spawning before the view follows the new row
    pub spawn_pause_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self { size: 20 }
    }
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            mutation_rate: 0.4,
            elimination_batch: 5,
            sort_by_parent: true,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 600.0,
            visible_rows: 5,
            spawn_pause_ms: 1000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl DisplayConfig {
    /// Height of one generation row in pixels
    pub fn row_height(&self) -> f32 {
        self.height / self.visible_rows.max(1) as f32
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population.size == 0 {
            return Err(ConfigError::Invalid("population.size must be > 0".to_string()));
        }
        let rate = self.evolution.mutation_rate;
        if !(0.0..=1.0).contains(&rate) {
            return Err(ConfigError::Invalid(
                "evolution.mutation_rate must be between 0 and 1".to_string(),
            ));
        }
        let table = &self.environment.elimination;
        if !table.light_backdrop.is_valid() || !table.dark_backdrop.is_valid() {
            return Err(ConfigError::Invalid(
                "elimination weights must be finite and non-negative".to_string(),
            ));
        }
        let size = self.population.size;
        if !table.light_backdrop.sums_finite(size) || !table.dark_backdrop.sums_finite(size) {
            return Err(ConfigError::Invalid(format!(
                "elimination weights overflow when summed over {} specimens",
                size
            )));
        }
        if self.display.visible_rows == 0 {
            return Err(ConfigError::Invalid("display.visible_rows must be > 0".to_string()));
        }
        if self.display.width <= 0.0 || self.display.height <= 0.0 {
            return Err(ConfigError::Invalid("display size must be positive".to_string()));
        }
        Ok(())
    }
}

/// Errors that can occur while loading or saving configuration
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Yaml(e) => write!(f, "YAML error: {}", e),
            Self::Invalid(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{Backdrop, EliminationProfile};

    #[test]
    fn test_default_config_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.population.size, 20);
        assert_eq!(config.evolution.elimination_batch, 5);
        assert!((config.evolution.mutation_rate - 0.4).abs() < 1e-9);
        assert!((config.display.row_height() - 120.0).abs() < 1e-6);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let loaded: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config.population.size, loaded.population.size);
        assert_eq!(
            config.environment.elimination,
            loaded.environment.elimination
        );
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "population:\n  size: 8\nenvironment:\n  initial: dark\n  elimination:\n    light_backdrop: { light: 1.0, dark: 0.0 }\n    dark_backdrop: { light: 0.0, dark: 1.0 }\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.population.size, 8);
        assert_eq!(config.environment.initial, Backdrop::Dark);
        assert_eq!(
            config.environment.elimination.light_backdrop,
            EliminationProfile::new(1.0, 0.0)
        );
        assert_eq!(config.evolution.elimination_batch, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        let mut config = Config::default();
        config.population.size = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.evolution.mutation_rate = 1.5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.environment.elimination.dark_backdrop = EliminationProfile::new(-1.0, 0.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overflowing_weights_rejected() {
        let mut config = Config::default();
        config.environment.elimination.light_backdrop = EliminationProfile::new(1e308, 1e308);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        // A single specimen cannot overflow
        config.population.size = 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_sections_use_defaults() {
        let yaml = "evolution:\n  mutation_rate: 0.1\ndisplay:\n  visible_rows: 3\nenvironment:\n  elimination:\n    dark_backdrop: { light: 0.5, dark: 0.5 }\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert!((config.evolution.mutation_rate - 0.1).abs() < 1e-9);
        assert_eq!(config.evolution.elimination_batch, 5);
        assert!(config.evolution.sort_by_parent);
        assert_eq!(config.display.visible_rows, 3);
        assert_eq!(config.display.spawn_pause_ms, 1000);
        assert_eq!(config.environment.initial, Backdrop::Light);
        assert_eq!(
            config.environment.elimination.light_backdrop,
            EliminationProfile::new(0.3, 0.7)
        );
        assert_eq!(
            config.environment.elimination.dark_backdrop,
            EliminationProfile::new(0.5, 0.5)
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        let mut config = Config::default();
        config.population.size = 12;
        config.save(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.population.size, 12);
    }
}
