/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub elevator: ElevatorConfig,
}

/**
 * Simulation constants for a single cabin.
 *
 * # Fields
 * - `min_floor`:       Lowest serviceable floor.
 * - `max_floor`:       Highest serviceable floor.
 * - `initial_floor`:   Floor the cabin starts at, `min_floor` when absent.
 * - `floor_step`:      Fraction of a floor travelled per tick.
 * - `tick_interval`:   Milliseconds between two movement ticks.
 * - `door_open_time`:  Milliseconds the doors dwell open after a stop.
 * - `stop_tolerance`:  Distance below which the cabin counts as arrived.
 */
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ElevatorConfig {
    pub min_floor: i32,
    pub max_floor: i32,
    pub initial_floor: Option<i32>,
    pub floor_step: f64,
    pub tick_interval: u64,
    pub door_open_time: u64,
    pub stop_tolerance: f64,
}

impl Default for ElevatorConfig {
    fn default() -> Self {
        ElevatorConfig {
            min_floor: 1,
            max_floor: 9,
            initial_floor: None,
            floor_step: 0.05,
            tick_interval: 100,
            door_open_time: 3000,
            stop_tolerance: 0.025,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/***************************************/
/*             Public API              */
/***************************************/
impl Config {
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let config_str = fs::read_to_string(path)?;
        Config::from_toml_str(&config_str)
    }

    pub fn from_toml_str(s: &str) -> Result<Config, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.elevator.validate()
    }
}

impl ElevatorConfig {
    /// Floor range with the given bounds and default timing.
    pub fn with_floors(min_floor: i32, max_floor: i32) -> ElevatorConfig {
        ElevatorConfig {
            min_floor,
            max_floor,
            ..ElevatorConfig::default()
        }
    }

    pub fn start_floor(&self) -> i32 {
        self.initial_floor.unwrap_or(self.min_floor)
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.tick_interval)
    }

    pub fn door_open_duration(&self) -> Duration {
        Duration::from_millis(self.door_open_time)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_floor >= self.max_floor {
            return Err(ConfigError::Invalid(format!(
                "min_floor ({}) must be below max_floor ({})",
                self.min_floor, self.max_floor
            )));
        }

        let start = self.start_floor();
        if start < self.min_floor || start > self.max_floor {
            return Err(ConfigError::Invalid(format!(
                "initial_floor ({}) outside [{}, {}]",
                start, self.min_floor, self.max_floor
            )));
        }

        if !(self.floor_step > 0.0 && self.floor_step <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "floor_step ({}) must be in (0, 1]",
                self.floor_step
            )));
        }

        if !(self.stop_tolerance.is_finite()
            && self.stop_tolerance > 0.0
            && self.stop_tolerance < 0.5)
        {
            return Err(ConfigError::Invalid(format!(
                "stop_tolerance ({}) must be in (0, 0.5)",
                self.stop_tolerance
            )));
        }

        if self.tick_interval == 0 || self.door_open_time == 0 {
            return Err(ConfigError::Invalid(
                "tick_interval and door_open_time must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.elevator.start_floor(), 1);
        assert_eq!(config.elevator.tick_duration(), Duration::from_millis(100));
    }

    #[test]
    fn test_parse_partial_toml() {
        // Arrange
        let toml_str = r#"
            [elevator]
            min_floor = -1
            max_floor = 12
            door_open_time = 500
        "#;

        // Act
        let config = Config::from_toml_str(toml_str).unwrap();

        // Assert
        assert_eq!(config.elevator.min_floor, -1);
        assert_eq!(config.elevator.max_floor, 12);
        assert_eq!(config.elevator.start_floor(), -1);
        assert_eq!(config.elevator.door_open_time, 500);
        assert_eq!(config.elevator.floor_step, 0.05);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = Config::from_toml_str("[elevator]\nfloors = 4\n");

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_invalid_ranges_rejected() {
        let inverted = ElevatorConfig::with_floors(5, 5);
        let outside = ElevatorConfig {
            initial_floor: Some(10),
            ..ElevatorConfig::default()
        };
        let no_step = ElevatorConfig {
            floor_step: f64::NAN,
            ..ElevatorConfig::default()
        };
        let wide = ElevatorConfig {
            stop_tolerance: 0.5,
            ..ElevatorConfig::default()
        };
        let zero_tick = ElevatorConfig {
            tick_interval: 0,
            ..ElevatorConfig::default()
        };

        assert!(matches!(inverted.validate(), Err(ConfigError::Invalid(_))));
        assert!(matches!(outside.validate(), Err(ConfigError::Invalid(_))));
        assert!(matches!(no_step.validate(), Err(ConfigError::Invalid(_))));
        assert!(matches!(wide.validate(), Err(ConfigError::Invalid(_))));
        assert!(matches!(zero_tick.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_tolerance_must_be_finite_and_positive() {
        // Arrange
        let nan_toml = "[elevator]\nstop_tolerance = nan\n";
        let zero = ElevatorConfig {
            stop_tolerance: 0.0,
            ..ElevatorConfig::default()
        };
        let infinite = ElevatorConfig {
            stop_tolerance: f64::INFINITY,
            ..ElevatorConfig::default()
        };

        // Act
        let parsed = Config::from_toml_str(nan_toml);

        // Assert
        assert!(matches!(parsed, Err(ConfigError::Invalid(_))));
        assert!(matches!(zero.validate(), Err(ConfigError::Invalid(_))));
        assert!(matches!(infinite.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_coarse_step_is_valid() {
        let coarse = ElevatorConfig {
            floor_step: 0.4,
            stop_tolerance: 0.01,
            ..ElevatorConfig::default()
        };

        assert!(coarse.validate().is_ok());
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let result = Config::load(Path::new("does/not/exist.toml"));

        assert!(matches!(result, Err(ConfigError::Read(_))));
    }
}
