//! Client Configuration
//!
//! Settings for the HTTP transport and the response cache, loaded from
//! `AMAP_*` environment variables or assembled with the builder methods.

use crate::adapters::outbound::{DEFAULT_BASE_URL, DEFAULT_CACHE_TTL};
use std::time::Duration;

/// Longest accepted cache TTL (one year).
pub const MAX_CACHE_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

#[derive(Clone)]
pub struct ClientConfig {
    /// Web service API key
    pub api_key: String,
    /// Service root, without the version segment
    pub base_url: String,
    /// Whole-request deadline enforced by the HTTP client
    pub timeout: Duration,
    /// Idle pooled connections kept per host
    pub max_idle_per_host: usize,
    /// How long an idle pooled connection is kept
    pub idle_timeout: Duration,
    pub cache_enabled: bool,
    /// Lifetime of every cached response
    pub cache_ttl: Duration,
    /// Interval of the background sweep reclaiming expired entries
    pub cache_gc_interval: Duration,
    pub debug: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            max_idle_per_host: 10,
            idle_timeout: Duration::from_secs(60),
            cache_enabled: true,
            cache_ttl: DEFAULT_CACHE_TTL,
            cache_gc_interval: Duration::from_secs(300),
            debug: false,
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("max_idle_per_host", &self.max_idle_per_host)
            .field("idle_timeout", &self.idle_timeout)
            .field("cache_enabled", &self.cache_enabled)
            .field("cache_ttl", &self.cache_ttl)
            .field("cache_gc_interval", &self.cache_gc_interval)
            .field("debug", &self.debug)
            .finish()
    }
}

impl ClientConfig {
    /// Create a configuration with the given API key and default settings.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Set the service root (useful for proxies and tests).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connection pool limits.
    pub fn pool(mut self, max_idle_per_host: usize, idle_timeout: Duration) -> Self {
        self.max_idle_per_host = max_idle_per_host;
        self.idle_timeout = idle_timeout;
        self
    }

    /// Enable the response cache with the given TTL.
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_enabled = true;
        self.cache_ttl = ttl;
        self
    }

    /// Disable the response cache.
    pub fn without_cache(mut self) -> Self {
        self.cache_enabled = false;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.cache_enabled {
            if self.cache_ttl.is_zero() {
                return Err(ConfigError::ZeroCacheTtl);
            }
            if self.cache_ttl > MAX_CACHE_TTL {
                return Err(ConfigError::CacheTtlTooLarge(self.cache_ttl));
            }
            if self.cache_gc_interval.is_zero() {
                return Err(ConfigError::ZeroGcInterval);
            }
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("AMAP_API_KEY is required")]
    MissingApiKey,
    #[error("base url must start with http:// or https://, got {0:?}")]
    InvalidBaseUrl(String),
    #[error("timeout must be greater than zero")]
    ZeroTimeout,
    #[error("cache ttl must be greater than zero when caching is enabled")]
    ZeroCacheTtl,
    #[error("cache ttl must not exceed one year, got {0:?}")]
    CacheTtlTooLarge(Duration),
    #[error("cache gc interval must be greater than zero when caching is enabled")]
    ZeroGcInterval,
}

/// Load configuration from the process environment.
pub fn load_config() -> Result<ClientConfig, ConfigError> {
    load_config_from(|name| std::env::var(name).ok())
}

/// Load configuration through an arbitrary variable lookup.
///
/// Unparseable numbers fall back to their defaults.
pub fn load_config_from<F>(lookup: F) -> Result<ClientConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = ClientConfig::default();

    let secs = |name: &str, default: Duration| {
        lookup(name)
            .and_then(|v| v.trim().parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(default)
    };

    let api_key = lookup("AMAP_API_KEY").unwrap_or_default();

    let base_url = lookup("AMAP_BASE_URL").unwrap_or(defaults.base_url);

    let timeout = secs("AMAP_TIMEOUT_SECS", defaults.timeout);

    let cache_enabled = lookup("AMAP_CACHE_ENABLED")
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(defaults.cache_enabled);

    let cache_ttl = secs("AMAP_CACHE_TTL_SECS", defaults.cache_ttl);

    let cache_gc_interval = secs("AMAP_CACHE_GC_INTERVAL_SECS", defaults.cache_gc_interval);

    let debug = lookup("DEBUG").is_some();

    let config = ClientConfig {
        api_key,
        base_url,
        timeout,
        cache_enabled,
        cache_ttl,
        cache_gc_interval,
        debug,
        ..defaults
    };

    config.validate()?;
    Ok(config)
}
