//! Runtime configuration from environment variables.
//!
//! - `HOST` (default `0.0.0.0`)
//! - `PORT` (default `8080`)
//! - `TOURNAMENT_FORMATS`: comma-separated formats to enable (default: all)

use crate::logic::StrategySelector;
use crate::models::TournamentFormat;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT value: {0}")]
    InvalidPort(String),
    #[error("unknown tournament format: {0}")]
    UnknownFormat(String),
    #[error("TOURNAMENT_FORMATS enables no format")]
    NoFormats,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub enabled_formats: Vec<TournamentFormat>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enabled_formats: TournamentFormat::ALL.to_vec(),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup (the environment, or a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST")
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(default_host);
        let port = match lookup("PORT") {
            Some(p) => match p.trim().parse::<u16>() {
                Ok(port) if port > 0 => port,
                _ => return Err(ConfigError::InvalidPort(p)),
            },
            None => default_port(),
        };
        let enabled_formats = match lookup("TOURNAMENT_FORMATS") {
            Some(list) => parse_formats(&list)?,
            None => TournamentFormat::ALL.to_vec(),
        };
        Ok(Self {
            host,
            port,
            enabled_formats,
        })
    }

    /// Strategy selector limited to the enabled formats.
    pub fn selector(&self) -> StrategySelector {
        StrategySelector::with_formats(self.enabled_formats.iter().copied())
    }
}

fn parse_formats(list: &str) -> Result<Vec<TournamentFormat>, ConfigError> {
    let mut formats = Vec::new();
    for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let format = TournamentFormat::parse(name).ok_or_else(|| ConfigError::UnknownFormat(name.to_string()))?;
        if !formats.contains(&format) {
            formats.push(format);
        }
    }
    if formats.is_empty() {
        return Err(ConfigError::NoFormats);
    }
    Ok(formats)
}
