//! Client configuration.
//!
//! The backend base URL is injected explicitly at construction rather than
//! read from a module-level global, so every component can be built against
//! a known endpoint in tests.

use crate::error::{Error, Result};
use crate::util::{is_http_url, normalize_text_option};

/// Environment variable holding the backend base URL.
pub const API_URL_ENV: &str = "JOT_API_URL";

/// Backend endpoint used when no override and no environment value is set.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/api";

/// Explicitly injected client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Normalized base URL of the notes backend, without trailing slash.
    pub base_url: String,
}

impl ClientConfig {
    /// Builds a config from an explicit base URL.
    ///
    /// The URL must start with `http://` or `https://`; surrounding
    /// whitespace and trailing slashes are stripped.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url.into())?,
        })
    }

    /// Resolves the base URL from an optional override, then `JOT_API_URL`,
    /// then the loopback default.
    pub fn from_env(override_url: Option<String>) -> Result<Self> {
        let raw = normalize_text_option(override_url)
            .or_else(|| normalize_text_option(std::env::var(API_URL_ENV).ok()))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self::new(raw)
    }
}

fn normalize_base_url(raw: String) -> Result<String> {
    let base_url = normalize_text_option(Some(raw))
        .ok_or_else(|| Error::Config("base URL must not be empty".to_string()))?;
    if is_http_url(&base_url) {
        Ok(base_url.trim_end_matches('/').to_string())
    } else {
        Err(Error::Config(
            "base URL must include http:// or https://".to_string(),
        ))
    }
}
