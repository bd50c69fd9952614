//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `VIGIL_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_DEDUP_THRESHOLD, DEFAULT_DETECT_TOP_N, DEFAULT_RERANK_TOP_K,
    DEFAULT_SIMILARITY_THRESHOLD,
};

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `VIGIL_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Path to the intents corpus file. Default: `./data/intents.json`.
    pub intents_path: PathBuf,

    /// Path to the crime/recommendations corpus file.
    /// Default: `./data/recommendations.json`.
    pub recommendations_path: PathBuf,

    /// Path to the text-encoder model directory (BERT + tokenizer).
    /// Unset runs the encoder in stub mode.
    pub encoder_path: Option<PathBuf>,

    /// Path to the sentiment-classifier model directory.
    /// Unset runs the scorer in stub mode.
    pub sentiment_path: Option<PathBuf>,

    /// Chat-model name used for recommendation elaboration (e.g.
    /// `gpt-4o-mini`). Unset disables the elaboration stage entirely.
    pub elaborator_model: Option<String>,

    /// Minimum similarity for a confident chat-mode match (inclusive).
    /// Default: `0.6`.
    pub similarity_threshold: f32,

    /// Number of crime labels detected per incident report. Default: `2`.
    pub detect_top_n: usize,

    /// Recommendations kept after sentiment-gap reranking. Default: `3`.
    pub rerank_top_k: usize,

    /// Pairwise similarity above which recommendations are deduplicated.
    /// Default: `0.7`.
    pub dedup_threshold: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            intents_path: PathBuf::from("./data/intents.json"),
            recommendations_path: PathBuf::from("./data/recommendations.json"),
            encoder_path: None,
            sentiment_path: None,
            elaborator_model: None,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            detect_top_n: DEFAULT_DETECT_TOP_N,
            rerank_top_k: DEFAULT_RERANK_TOP_K,
            dedup_threshold: DEFAULT_DEDUP_THRESHOLD,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "VIGIL_PORT";
    const ENV_BIND_ADDR: &'static str = "VIGIL_BIND_ADDR";
    const ENV_INTENTS_PATH: &'static str = "VIGIL_INTENTS_PATH";
    const ENV_RECOMMENDATIONS_PATH: &'static str = "VIGIL_RECOMMENDATIONS_PATH";
    const ENV_ENCODER_PATH: &'static str = "VIGIL_ENCODER_PATH";
    const ENV_SENTIMENT_PATH: &'static str = "VIGIL_SENTIMENT_PATH";
    const ENV_ELABORATOR_MODEL: &'static str = "VIGIL_ELABORATOR_MODEL";
    const ENV_SIMILARITY_THRESHOLD: &'static str = "VIGIL_SIMILARITY_THRESHOLD";
    const ENV_DETECT_TOP_N: &'static str = "VIGIL_DETECT_TOP_N";
    const ENV_RERANK_TOP_K: &'static str = "VIGIL_RERANK_TOP_K";
    const ENV_DEDUP_THRESHOLD: &'static str = "VIGIL_DEDUP_THRESHOLD";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let intents_path = Self::parse_path_from_env(Self::ENV_INTENTS_PATH, defaults.intents_path);
        let recommendations_path = Self::parse_path_from_env(
            Self::ENV_RECOMMENDATIONS_PATH,
            defaults.recommendations_path,
        );
        let encoder_path = Self::parse_optional_path_from_env(Self::ENV_ENCODER_PATH);
        let sentiment_path = Self::parse_optional_path_from_env(Self::ENV_SENTIMENT_PATH);
        let elaborator_model = Self::parse_optional_string_from_env(Self::ENV_ELABORATOR_MODEL);
        let similarity_threshold = Self::parse_f32_from_env(
            Self::ENV_SIMILARITY_THRESHOLD,
            defaults.similarity_threshold,
        )?;
        let detect_top_n = Self::parse_usize_from_env(Self::ENV_DETECT_TOP_N, defaults.detect_top_n)?;
        let rerank_top_k = Self::parse_usize_from_env(Self::ENV_RERANK_TOP_K, defaults.rerank_top_k)?;
        let dedup_threshold =
            Self::parse_f32_from_env(Self::ENV_DEDUP_THRESHOLD, defaults.dedup_threshold)?;

        Ok(Self {
            port,
            bind_addr,
            intents_path,
            recommendations_path,
            encoder_path,
            sentiment_path,
            elaborator_model,
            similarity_threshold,
            detect_top_n,
            rerank_top_k,
            dedup_threshold,
        })
    }

    /// Validates paths and basic invariants (does not open files).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.intents_path.is_file() {
            return Err(ConfigError::PathNotFound {
                path: self.intents_path.clone(),
            });
        }

        if !self.recommendations_path.is_file() {
            return Err(ConfigError::PathNotFound {
                path: self.recommendations_path.clone(),
            });
        }

        for path in [&self.encoder_path, &self.sentiment_path].into_iter().flatten() {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        if !(-1.0..=1.0).contains(&self.similarity_threshold) {
            return Err(ConfigError::InvalidThreshold {
                name: Self::ENV_SIMILARITY_THRESHOLD,
                value: self.similarity_threshold,
            });
        }

        if !(-1.0..=1.0).contains(&self.dedup_threshold) {
            return Err(ConfigError::InvalidThreshold {
                name: Self::ENV_DEDUP_THRESHOLD,
                value: self.dedup_threshold,
            });
        }

        if self.detect_top_n == 0 {
            return Err(ConfigError::ZeroCount {
                name: Self::ENV_DETECT_TOP_N,
            });
        }

        if self.rerank_top_k == 0 {
            return Err(ConfigError::ZeroCount {
                name: Self::ENV_RERANK_TOP_K,
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        Self::parse_optional_string_from_env(var_name).map(PathBuf::from)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_f32_from_env(var_name: &'static str, default: f32) -> Result<f32, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value.parse().map_err(|_| ConfigError::NumberParseError {
                name: var_name,
                value,
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_usize_from_env(var_name: &'static str, default: usize) -> Result<usize, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value.parse().map_err(|_| ConfigError::NumberParseError {
                name: var_name,
                value,
            }),
            Err(_) => Ok(default),
        }
    }
}
