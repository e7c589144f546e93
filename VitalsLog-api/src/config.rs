use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATA_FILE: &str = "data/readings.json";
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5500,http://127.0.0.1:5500";

/// Errors raised while reading configuration from the environment
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got {value:?}")]
    InvalidPort {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Runtime configuration for the API server
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// TCP port to listen on
    pub port: u16,
    /// Path of the JSON document holding every reading
    pub data_file: PathBuf,
    /// Origin prefixes allowed to make cross-origin requests
    pub allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            allowed_origins: parse_origins(DEFAULT_ALLOWED_ORIGINS),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => defaults.port,
        };

        let data_file = lookup("DATA_FILE")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_file);

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .map(|value| parse_origins(&value))
            .unwrap_or(defaults.allowed_origins);

        Ok(Self {
            port,
            data_file,
            allowed_origins,
        })
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.data_file, PathBuf::from("data/readings.json"));
        assert_eq!(
            config.allowed_origins,
            vec!["http://localhost:5500", "http://127.0.0.1:5500"]
        );
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("DATA_FILE", "/tmp/vitals.json"),
            ("ALLOWED_ORIGINS", "https://vitals.example , ,http://localhost:3001"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.data_file, PathBuf::from("/tmp/vitals.json"));
        assert_eq!(
            config.allowed_origins,
            vec!["https://vitals.example", "http://localhost:3001"]
        );
    }

    #[test]
    fn test_invalid_port() {
        let err = AppConfig::from_lookup(lookup_from(&[("PORT", "http")])).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidPort { ref value, .. } if value == "http"));
    }
}
