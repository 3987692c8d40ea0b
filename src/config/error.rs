//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// Fallback policy name is not one of the known policies.
    #[error("unknown fallback policy '{value}': expected 'zero' or 'noise'")]
    InvalidFallbackPolicy { value: String },

    /// A tier endpoint URL was set to an empty string.
    #[error("{name} must not be empty")]
    InvalidTierUrl { name: &'static str },

    /// Cache capacity of zero would disable the cache entirely.
    #[error("cache capacity must be non-zero")]
    InvalidCapacity,

    /// A zero timeout would fail every tier request immediately.
    #[error("tier timeout must be non-zero")]
    InvalidTimeout,
}
