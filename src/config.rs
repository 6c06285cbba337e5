use chrono::Datelike;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub appdir: Option<String>,
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default)]
    pub tlscert: Option<String>,
    #[serde(default)]
    pub tlskey: Option<String>,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
            tlscert: None,
            tlskey: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_image_base")]
    pub image_base: String,
    /// Bearer token for the upstream API. Falls back to the TMDB_BEARER
    /// environment variable; an empty token is sent as-is and the upstream
    /// rejects the request with its own status.
    #[serde(default = "default_bearer")]
    pub bearer: String,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            image_base: default_image_base(),
            bearer: default_bearer(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default = "default_year_from")]
    pub year_from: i32,
    #[serde(default = "default_year_to")]
    pub year_to: i32,
    #[serde(default)]
    pub seen_dir: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            year_from: default_year_from(),
            year_to: default_year_to(),
            seen_dir: None,
        }
    }
}

fn default_port() -> String {
    "8649".to_string()
}

fn default_api_base() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base() -> String {
    "https://image.tmdb.org/t/p/w342".to_string()
}

fn default_bearer() -> String {
    std::env::var("TMDB_BEARER").unwrap_or_default()
}

fn default_year_from() -> i32 {
    2023
}

fn default_year_to() -> i32 {
    chrono::Utc::now().year()
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(path.to_string(), e))?;

        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.listen.port, "8649");
        assert_eq!(config.tmdb.api_base, "https://api.themoviedb.org/3");
        assert_eq!(config.tmdb.image_base, "https://image.tmdb.org/t/p/w342");
        assert_eq!(config.session.year_from, 2023);
        assert!(config.session.year_to >= 2023);
        assert!(config.appdir.is_none());
    }

    #[test]
    fn test_overrides() {
        let yaml = r#"
listen:
  port: "9000"
tmdb:
  api_base: "http://localhost:1234/3"
  bearer: "secret"
session:
  year_from: 2010
  year_to: 2020
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.listen.port, "9000");
        assert_eq!(config.tmdb.api_base, "http://localhost:1234/3");
        assert_eq!(config.tmdb.bearer, "secret");
        assert_eq!(config.session.year_from, 2010);
        assert_eq!(config.session.year_to, 2020);
    }
}
