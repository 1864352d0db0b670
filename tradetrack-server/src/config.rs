//! Server configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;
use tradetrack_core::config::{MatchConfig, DEFAULT_EMBEDDING_DIMENSION, DEFAULT_MATCH_THRESHOLD};

pub const ENV_HOST: &str = "TRADETRACK_HOST";
pub const ENV_PORT: &str = "TRADETRACK_PORT";
pub const ENV_DATA_PATH: &str = "TRADETRACK_DATA_PATH";
pub const ENV_EMBEDDING_DIM: &str = "TRADETRACK_EMBEDDING_DIM";
pub const ENV_MATCH_THRESHOLD: &str = "TRADETRACK_MATCH_THRESHOLD";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: '{value}' ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid listen address {0}")]
    InvalidAddress(String),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_path: PathBuf,
    pub matching: MatchConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            data_path: PathBuf::from("./tradetrack_data"),
            matching: MatchConfig::new(DEFAULT_EMBEDDING_DIMENSION, DEFAULT_MATCH_THRESHOLD),
        }
    }
}

impl ServerConfig {
    /// Reads the process environment. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServerConfig::default();
        let host = lookup(ENV_HOST).unwrap_or(defaults.host);
        let port = parse_var(&lookup, ENV_PORT)?.unwrap_or(defaults.port);
        let data_path = lookup(ENV_DATA_PATH).map(PathBuf::from).unwrap_or(defaults.data_path);
        let embedding_dimension =
            parse_var(&lookup, ENV_EMBEDDING_DIM)?.unwrap_or(defaults.matching.embedding_dimension);
        let match_threshold =
            parse_var(&lookup, ENV_MATCH_THRESHOLD)?.unwrap_or(defaults.matching.match_threshold);

        Ok(ServerConfig {
            host,
            port,
            data_path,
            matching: MatchConfig::new(embedding_dimension, match_threshold),
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(format!("{}:{}", self.host, self.port)))
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|e| ConfigError::InvalidValue {
            var,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}
