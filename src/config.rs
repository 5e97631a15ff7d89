//! Proxy configuration.

use crate::error::{Result, SubgateError};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Configuration for the subscription proxy.
///
/// The facade variant is decided here, once: `enabled == false` yields the
/// disabled facade, `use_stubs` the in-memory stub, and everything else the
/// live HTTP client.
#[derive(Debug, Clone, Deserialize)]
pub struct SubgateConfig {
    /// Master switch. When off, every operation fails fast with
    /// `FeatureNotEnabled` and no network resources are created.
    #[serde(default)]
    pub enabled: bool,

    /// Serve canned in-memory data instead of talking to a backend.
    #[serde(default)]
    pub use_stubs: bool,

    /// Backend origin, e.g. `https://billing.example.com`.
    #[serde(default)]
    pub base_url: String,

    /// Static bearer credential, sent verbatim in the Authorization header.
    /// Redacted from Debug output and never logged.
    #[serde(default = "default_api_key")]
    pub api_key: SecretString,

    /// Per-request timeout.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,

    #[serde(default = "default_pool_max_idle_per_host")]
    pub pool_max_idle_per_host: usize,

    /// TTL for the cached plan catalog. Zero disables the cache entirely.
    #[serde(default = "default_plans_cache_ttl_seconds")]
    pub plans_cache_ttl_seconds: u64,

    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: u64,
}

fn default_api_key() -> SecretString {
    SecretString::new(String::new())
}

fn default_timeout_seconds() -> u64 {
    15
}

fn default_connect_timeout_seconds() -> u64 {
    5
}

fn default_pool_max_idle_per_host() -> usize {
    8
}

fn default_plans_cache_ttl_seconds() -> u64 {
    600
}

fn default_cache_max_entries() -> u64 {
    64
}

impl Default for SubgateConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            use_stubs: false,
            base_url: String::new(),
            api_key: default_api_key(),
            timeout_seconds: default_timeout_seconds(),
            connect_timeout_seconds: default_connect_timeout_seconds(),
            pool_max_idle_per_host: default_pool_max_idle_per_host(),
            plans_cache_ttl_seconds: default_plans_cache_ttl_seconds(),
            cache_max_entries: default_cache_max_entries(),
        }
    }
}

impl SubgateConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_stubs(mut self, use_stubs: bool) -> Self {
        self.use_stubs = use_stubs;
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = SecretString::new(api_key.into());
        self
    }

    #[must_use]
    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_plans_cache_ttl_seconds(mut self, seconds: u64) -> Self {
        self.plans_cache_ttl_seconds = seconds;
        self
    }

    /// Load configuration from `SUBGATE_`-prefixed environment variables,
    /// on top of whatever is already set.
    #[must_use]
    pub fn from_env(mut self) -> Self {
        if let Some(enabled) = env_var("SUBGATE_ENABLED") {
            self.enabled = enabled.parse().unwrap_or(false);
        }
        if let Some(use_stubs) = env_var("SUBGATE_USE_STUBS") {
            self.use_stubs = use_stubs.parse().unwrap_or(false);
        }
        if let Some(base_url) = env_var("SUBGATE_BASE_URL") {
            self.base_url = base_url;
        }
        if let Some(api_key) = env_var("SUBGATE_API_KEY") {
            self.api_key = SecretString::new(api_key);
        }
        if let Some(timeout) = env_var("SUBGATE_TIMEOUT_SECONDS") {
            if let Ok(seconds) = timeout.parse() {
                self.timeout_seconds = seconds;
            }
        }
        if let Some(ttl) = env_var("SUBGATE_PLANS_CACHE_TTL_SECONDS") {
            if let Ok(seconds) = ttl.parse() {
                self.plans_cache_ttl_seconds = seconds;
            }
        }
        self
    }

    /// Validate the settings the live facade depends on. Disabled and stub
    /// configurations need no backend settings and always pass.
    pub fn validate(&self) -> Result<()> {
        if !self.enabled || self.use_stubs {
            return Ok(());
        }

        url::Url::parse(&self.base_url)
            .map_err(|e| SubgateError::Config(format!("invalid base URL '{}': {e}", self.base_url)))?;

        if self.api_key.expose_secret().is_empty() {
            return Err(SubgateError::Config(
                "api_key must be set when the live backend is enabled".to_string(),
            ));
        }

        if self.timeout_seconds == 0 {
            return Err(SubgateError::Config(
                "timeout_seconds must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
