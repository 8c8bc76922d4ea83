//! Client configuration.
//!
//! Provides the `ClientConfig` struct used by front ends to locate the chat
//! backend. Values come from explicit settings or the environment.

use std::env;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Environment variable overriding the backend base URL.
pub const ENV_BASE_URL: &str = "PARLEY_BASE_URL";

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5001";

/// Connection settings for the chat backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Backend origin, without a trailing slash.
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Build a config for an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(&base_url.into())?,
        })
    }

    /// Load configuration from `PARLEY_BASE_URL`.
    ///
    /// Returns `Ok(None)` when the variable is unset or blank.
    pub fn from_env() -> Result<Option<Self>> {
        parse_config(|key| env::var(key).ok())
    }
}

/// Trim a base URL, require an http(s) scheme, and drop trailing slashes.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let base = raw.trim().trim_end_matches('/').to_string();
    if base.is_empty() {
        return Err(Error::InvalidInput(
            "Backend base URL must not be empty".to_string(),
        ));
    }
    if !is_http_url(&base) {
        return Err(Error::InvalidInput(
            "Backend base URL must include http:// or https://".to_string(),
        ));
    }
    Ok(base)
}

/// Trim optional text, treating blank values as unset.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

fn parse_config<F>(lookup: F) -> Result<Option<ClientConfig>>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(base_url) = normalize_text_option(lookup(ENV_BASE_URL)) else {
        return Ok(None);
    };
    ClientConfig::new(base_url).map(Some)
}
