//! Hosted gateway configuration loaded from environment variables.
//!
//! The console reads `SUPABASE_URL` and `SUPABASE_ANON_KEY`, falling back to the
//! `NEXT_PUBLIC_` prefixed names used by the web front end so one `.env` file can
//! serve both. `SUPABASE_ACCESS_TOKEN` (a signed-in user's token) and
//! `PROVEEDORES_TIMEOUT_SECS` are optional.

use crate::errors::{Error, Result};
use std::fmt;
use std::time::Duration;

/// Request timeout used when `PROVEEDORES_TIMEOUT_SECS` is not set.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the hosted REST/RPC gateway.
#[derive(Clone)]
pub struct BackendConfig {
    /// Project base URL, e.g. `https://xyz.supabase.co`
    pub url: String,
    /// Public anon API key
    pub api_key: String,
    /// Access token of a signed-in user, sent instead of the anon key as bearer
    pub access_token: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "<redacted>"),
            )
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl BackendConfig {
    /// Settings with no access token and the default timeout.
    #[must_use]
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            access_token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Loads the settings from the process environment.
    ///
    /// # Errors
    /// Returns `Error::Config` when the URL or key is missing or the timeout is
    /// not a whole number of seconds.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads the settings through `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    /// Same as [`BackendConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |names: &[&str]| {
            names
                .iter()
                .filter_map(|name| lookup(name))
                .map(|value| value.trim().to_string())
                .find(|value| !value.is_empty())
        };

        let url = read(&["SUPABASE_URL", "NEXT_PUBLIC_SUPABASE_URL"]).ok_or_else(|| {
            Error::Config {
                message: "SUPABASE_URL (or NEXT_PUBLIC_SUPABASE_URL) is not set".to_string(),
            }
        })?;
        let api_key = read(&["SUPABASE_ANON_KEY", "NEXT_PUBLIC_SUPABASE_ANON_KEY"])
            .ok_or_else(|| Error::Config {
                message: "SUPABASE_ANON_KEY (or NEXT_PUBLIC_SUPABASE_ANON_KEY) is not set"
                    .to_string(),
            })?;

        let timeout = match read(&["PROVEEDORES_TIMEOUT_SECS"]) {
            Some(secs) => Duration::from_secs(secs.parse().map_err(|e| Error::Config {
                message: format!("PROVEEDORES_TIMEOUT_SECS `{secs}` is invalid: {e}"),
            })?),
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            url,
            api_key,
            access_token: read(&["SUPABASE_ACCESS_TOKEN"]),
            timeout,
        })
    }
}
