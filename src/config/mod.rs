//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `LODESTONE_*` environment
//! variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::IpAddr;

use crate::constants::{DEFAULT_CACHE_CAPACITY, DEFAULT_TIER_TIMEOUT_MS};
use crate::embedding::config::{
    DEFAULT_ACCURATE_TIER_MODEL, DEFAULT_ACCURATE_TIER_URL, DEFAULT_FAST_TIER_MODEL,
    DEFAULT_FAST_TIER_URL, FallbackPolicy, TierConfig,
};
use crate::embedding::vector::TierId;

/// Gateway configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `LODESTONE_*` overrides on top of
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Fast tier endpoint URL. Default: `http://embeddings:8000`.
    pub fast_tier_url: String,

    /// Accurate tier endpoint URL. Default: `http://embeddings-ada002:8001`.
    pub accurate_tier_url: String,

    /// Model name the fast tier serves.
    pub fast_tier_model: String,

    /// Model name the accurate tier serves.
    pub accurate_tier_model: String,

    /// Per-request timeout against tier backends, in milliseconds.
    /// Default: `30_000`.
    pub tier_timeout_ms: u64,

    /// Max entries in the shared embedding cache. Default: `10_000`.
    pub cache_capacity: u64,

    /// What tier clients synthesize when a backend cannot answer.
    /// Default: `zero`.
    pub fallback_policy: FallbackPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            fast_tier_url: DEFAULT_FAST_TIER_URL.to_string(),
            accurate_tier_url: DEFAULT_ACCURATE_TIER_URL.to_string(),
            fast_tier_model: DEFAULT_FAST_TIER_MODEL.to_string(),
            accurate_tier_model: DEFAULT_ACCURATE_TIER_MODEL.to_string(),
            tier_timeout_ms: DEFAULT_TIER_TIMEOUT_MS,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            fallback_policy: FallbackPolicy::default(),
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "LODESTONE_PORT";
    const ENV_BIND_ADDR: &'static str = "LODESTONE_BIND_ADDR";
    const ENV_FAST_TIER_URL: &'static str = "LODESTONE_FAST_TIER_URL";
    const ENV_ACCURATE_TIER_URL: &'static str = "LODESTONE_ACCURATE_TIER_URL";
    const ENV_FAST_TIER_MODEL: &'static str = "LODESTONE_FAST_TIER_MODEL";
    const ENV_ACCURATE_TIER_MODEL: &'static str = "LODESTONE_ACCURATE_TIER_MODEL";
    const ENV_TIER_TIMEOUT_MS: &'static str = "LODESTONE_TIER_TIMEOUT_MS";
    const ENV_CACHE_CAPACITY: &'static str = "LODESTONE_CACHE_CAPACITY";
    const ENV_FALLBACK_POLICY: &'static str = "LODESTONE_FALLBACK_POLICY";

    /// Loads configuration from environment variables (falling back to
    /// defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let fast_tier_url =
            Self::parse_string_from_env(Self::ENV_FAST_TIER_URL, defaults.fast_tier_url);
        let accurate_tier_url =
            Self::parse_string_from_env(Self::ENV_ACCURATE_TIER_URL, defaults.accurate_tier_url);
        let fast_tier_model =
            Self::parse_string_from_env(Self::ENV_FAST_TIER_MODEL, defaults.fast_tier_model);
        let accurate_tier_model = Self::parse_string_from_env(
            Self::ENV_ACCURATE_TIER_MODEL,
            defaults.accurate_tier_model,
        );
        let tier_timeout_ms =
            Self::parse_u64_from_env(Self::ENV_TIER_TIMEOUT_MS, defaults.tier_timeout_ms);
        let cache_capacity =
            Self::parse_u64_from_env(Self::ENV_CACHE_CAPACITY, defaults.cache_capacity);
        let fallback_policy = Self::parse_fallback_policy_from_env(defaults.fallback_policy)?;

        Ok(Self {
            port,
            bind_addr,
            fast_tier_url,
            accurate_tier_url,
            fast_tier_model,
            accurate_tier_model,
            tier_timeout_ms,
            cache_capacity,
            fallback_policy,
        })
    }

    /// Validates basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fast_tier_url.trim().is_empty() {
            return Err(ConfigError::InvalidTierUrl {
                name: Self::ENV_FAST_TIER_URL,
            });
        }
        if self.accurate_tier_url.trim().is_empty() {
            return Err(ConfigError::InvalidTierUrl {
                name: Self::ENV_ACCURATE_TIER_URL,
            });
        }
        if self.cache_capacity == 0 {
            return Err(ConfigError::InvalidCapacity);
        }
        if self.tier_timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Connection settings for one tier, with this config's overrides
    /// applied over the tier's built-in defaults.
    pub fn tier_config(&self, tier: TierId) -> TierConfig {
        let base = match tier {
            TierId::Fast => TierConfig::fast()
                .with_base_url(self.fast_tier_url.clone())
                .with_model(self.fast_tier_model.clone()),
            TierId::Accurate => TierConfig::accurate()
                .with_base_url(self.accurate_tier_url.clone())
                .with_model(self.accurate_tier_model.clone()),
        };
        base.with_timeout_ms(self.tier_timeout_ms)
            .with_fallback_policy(self.fallback_policy)
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

    fn parse_fallback_policy_from_env(
        default: FallbackPolicy,
    ) -> Result<FallbackPolicy, ConfigError> {
        match env::var(Self::ENV_FALLBACK_POLICY) {
            Ok(value) => FallbackPolicy::from_name(value.trim())
                .ok_or(ConfigError::InvalidFallbackPolicy { value }),
            Err(_) => Ok(default),
        }
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}
