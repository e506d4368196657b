//! Startup configuration.
//!
//! # Responsibility
//! - Resolve base URL, access password and logging options from the
//!   environment once at startup.
//! - Validate the base URL before any link is built from it.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - `base_url` never ends with `/`.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use url::Url;

pub const ENV_BASE_URL: &str = "CLOUDNOTE_BASE_URL";
pub const ENV_ACCESS_PASSWORD: &str = "CLOUDNOTE_ACCESS_PASSWORD";
pub const ENV_LOG_LEVEL: &str = "CLOUDNOTE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "CLOUDNOTE_LOG_DIR";

/// Placeholder deployment URL; replace via `CLOUDNOTE_BASE_URL`.
pub const DEFAULT_BASE_URL: &str = "https://yourappname.streamlit.app";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidBaseUrl { value: String, message: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBaseUrl { value, message } => {
                write!(f, "invalid base URL `{value}`: {message}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Origin used to build share links, without trailing `/`.
    pub base_url: String,
    /// Optional static password guarding the editor.
    pub access_password: Option<String>,
    pub log_level: String,
    /// Absolute directory for rolling logs; `None` disables file logging.
    pub log_dir: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_password: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();
        let base_url = match read(ENV_BASE_URL) {
            Some(raw) => normalize_base_url(raw.as_str())?,
            None => defaults.base_url,
        };

        Ok(Self {
            base_url,
            // Passwords are compared verbatim, so only blank-ness is checked.
            access_password: lookup(ENV_ACCESS_PASSWORD).filter(|value| !value.is_empty()),
            log_level: read(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            log_dir: read(ENV_LOG_DIR),
        })
    }
}

/// Validates an http(s) base URL and strips trailing slashes.
///
/// # Errors
/// Returns `InvalidBaseUrl` for unparsable URLs, non-http(s) schemes,
/// or URLs carrying a query or fragment.
pub fn normalize_base_url(raw: &str) -> ConfigResult<String> {
    let trimmed = raw.trim();
    let invalid = |message: String| ConfigError::InvalidBaseUrl {
        value: trimmed.to_string(),
        message,
    };

    let parsed = Url::parse(trimmed).map_err(|err| invalid(err.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme `{}`", parsed.scheme())));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(invalid("query and fragment are not allowed".to_string()));
    }
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
