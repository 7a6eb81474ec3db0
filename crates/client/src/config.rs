//! Client configuration.

/// Connection settings for the preference API, loaded from environment
/// variables.
///
/// All fields have defaults suitable for local development. In
/// production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the platform API (default: `http://localhost:3000`).
    pub base_url: String,
    /// Bearer token attached to every request, if set.
    pub api_token: Option<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl ApiConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default                 |
    /// |--------------------------------|-------------------------|
    /// | `PARAPET_API_URL`              | `http://localhost:3000` |
    /// | `PARAPET_API_TOKEN`            | (unset)                 |
    /// | `PARAPET_REQUEST_TIMEOUT_SECS` | `30`                    |
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("PARAPET_API_URL").unwrap_or_else(|_| "http://localhost:3000".into());

        let api_token = std::env::var("PARAPET_API_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());

        let request_timeout_secs: u64 = std::env::var("PARAPET_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("PARAPET_REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url,
            api_token,
            request_timeout_secs,
        }
    }

    /// Configuration pointing at `base_url`, defaults elsewhere.
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: None,
            request_timeout_secs: 30,
        }
    }
}
