//! Backend connection settings.
//!
//! The browser bundle has no runtime environment, so the backend URL and API
//! key are baked in at build time from `REVIEWS_BACKEND_URL` and
//! `REVIEWS_API_KEY`. Callers that already hold the values (tests, embedding
//! pages) use [`BackendConfig::new`].

use crate::error::ConfigError;

pub const BACKEND_URL_VAR: &str = "REVIEWS_BACKEND_URL";
pub const API_KEY_VAR: &str = "REVIEWS_API_KEY";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendConfig {
    pub base_url: String,
    pub api_key: String,
}

impl BackendConfig {
    /// Validates and normalizes the settings. A trailing `/` on the base URL
    /// is dropped so endpoint paths can be appended directly.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        let api_key = api_key.into().trim().to_string();

        if base_url.is_empty() {
            return Err(ConfigError::Missing(BACKEND_URL_VAR));
        }
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(ConfigError::InvalidUrl(base_url));
        }
        if api_key.is_empty() {
            return Err(ConfigError::Missing(API_KEY_VAR));
        }

        Ok(Self { base_url, api_key })
    }

    /// Reads the settings captured when the crate was compiled.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_values(
            option_env!("REVIEWS_BACKEND_URL"),
            option_env!("REVIEWS_API_KEY"),
        )
    }

    fn from_values(base_url: Option<&str>, api_key: Option<&str>) -> Result<Self, ConfigError> {
        let base_url = base_url.ok_or(ConfigError::Missing(BACKEND_URL_VAR))?;
        let api_key = api_key.ok_or(ConfigError::Missing(API_KEY_VAR))?;
        Self::new(base_url, api_key)
    }
}
