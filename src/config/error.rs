use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse port value '{value}'")]
    PortParseError {
        value: String,
        source: std::num::ParseIntError,
    },

    #[error("invalid port value '{value}': port must be non-zero")]
    InvalidPort { value: String },

    #[error("invalid bind address '{value}'")]
    InvalidBindAddr {
        value: String,
        source: std::net::AddrParseError,
    },

    #[error("failed to parse {name} value '{value}' as a number")]
    NumberParseError { name: &'static str, value: String },

    #[error("{name} must be within [-1, 1], got {value}")]
    InvalidThreshold { name: &'static str, value: f32 },

    #[error("{name} must be non-zero")]
    ZeroCount { name: &'static str },

    #[error("path not found: {path}")]
    PathNotFound { path: PathBuf },

    #[error("not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
