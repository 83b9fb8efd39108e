//! Settings for the reqwest transport.
//!
//! # Design
//! Requests are usually written with relative URLs (`/users/1`) and resolved
//! against `base_url`, the way test runners resolve against a configured
//! base URL. `from_env` reads the same settings from the environment so a
//! suite can be pointed at another deployment without code changes.

use std::collections::BTreeMap;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

pub const BASE_URL_ENV: &str = "EXCHANGE_BASE_URL";
pub const TIMEOUT_MS_ENV: &str = "EXCHANGE_TIMEOUT_MS";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_MAX_REDIRECTS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct TransportConfig {
    pub base_url: Option<Url>,
    pub timeout: Duration,
    pub user_agent: String,
    pub max_redirects: usize,
    pub default_headers: BTreeMap<String, String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("exchange-verifier/{}", env!("CARGO_PKG_VERSION")),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            default_headers: BTreeMap::new(),
        }
    }
}

impl TransportConfig {
    /// Read `EXCHANGE_BASE_URL` and `EXCHANGE_TIMEOUT_MS`; unset variables keep
    /// their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like `from_env`, reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(base_url) = lookup(BASE_URL_ENV) {
            config = config.with_base_url(&base_url)?;
        }
        if let Some(raw) = lookup(TIMEOUT_MS_ENV) {
            let millis = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidEnv {
                name: TIMEOUT_MS_ENV,
                value: raw.clone(),
            })?;
            config.timeout = Duration::from_millis(millis);
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            value: base_url.to_string(),
            source,
        })?;
        self.base_url = Some(url);
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    pub fn with_default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    /// Resolve a request URL. Absolute URLs are used as-is; anything else is
    /// joined onto `base_url`.
    pub fn resolve(&self, url: &str) -> Result<Url, url::ParseError> {
        match &self.base_url {
            Some(base) => base.join(url),
            None => Url::parse(url),
        }
    }
}
