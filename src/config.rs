use dotenv::dotenv;
use std::env;
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

use crate::domain::services::validation::{
    DEFAULT_MAX_ENTITIES, DEFAULT_MAX_NAME_LENGTH, DEFAULT_MIN_ENTITIES, ValidationLimits,
};

const MIN_ENTITIES: &str = "MIN_ENTITIES";
const MAX_ENTITIES: &str = "MAX_ENTITIES";
const MAX_NAME_LENGTH: &str = "MAX_NAME_LENGTH";
const LOG_LEVEL: &str = "LOG_LEVEL";

/// Errors raised while reading the environment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("failed to parse environment variable {name}: {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("MIN_ENTITIES ({min}) must not exceed MAX_ENTITIES ({max})")]
    InvalidRange { min: usize, max: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub min_entities: usize,
    pub max_entities: usize,
    pub max_name_length: usize,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Config {
        match Self::try_from_env() {
            Ok(config) => config,
            Err(err) => panic!("{}", err),
        }
    }

    pub fn try_from_env() -> Result<Config, ConfigError> {
        // Load .env file
        dotenv().ok();

        let config = Config {
            min_entities: parse_var(MIN_ENTITIES, DEFAULT_MIN_ENTITIES)?,
            max_entities: parse_var(MAX_ENTITIES, DEFAULT_MAX_ENTITIES)?,
            max_name_length: parse_var(MAX_NAME_LENGTH, DEFAULT_MAX_NAME_LENGTH)?,
            log_level: env::var(LOG_LEVEL).unwrap_or_else(|_| "info".to_string()),
        };

        if config.min_entities > config.max_entities {
            return Err(ConfigError::InvalidRange {
                min: config.min_entities,
                max: config.max_entities,
            });
        }

        info!(
            "Loaded config: {}..={} agents per group, names up to {} characters",
            config.min_entities, config.max_entities, config.max_name_length
        );

        Ok(config)
    }

    /// Validation bounds described by this config.
    pub fn limits(&self) -> ValidationLimits {
        ValidationLimits {
            min_entities: self.min_entities,
            max_entities: self.max_entities,
            max_name_length: self.max_name_length,
        }
    }
}

impl Default for Config {
    fn default() -> Config {
        Config {
            min_entities: DEFAULT_MIN_ENTITIES,
            max_entities: DEFAULT_MAX_ENTITIES,
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
            log_level: "info".to_string(),
        }
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => parse_value(name, &value),
        Err(_) => Ok(default),
    }
}

fn parse_value<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        name,
        value: value.to_string(),
    })
}
