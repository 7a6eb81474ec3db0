//! Transport-agnostic surface of the preference endpoints.

use async_trait::async_trait;
use parapet_core::PreferenceUpdate;

use crate::models::{NewPreference, PreferenceRecord};

/// Errors from the preference REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Preference API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// The three preference endpoints, abstracted over transport.
///
/// [`crate::HttpPreferenceApi`] is the production implementation; tests
/// substitute in-memory fakes.
#[async_trait]
pub trait PreferenceApi: Send + Sync {
    /// Fetch every stored preference record for the current user.
    async fn list_preferences(&self) -> Result<Vec<PreferenceRecord>, ApiError>;

    /// Create a preference record and return the stored row.
    async fn create_preference(&self, new: &NewPreference) -> Result<PreferenceRecord, ApiError>;

    /// Apply a partial update to an existing record and return the
    /// stored row.
    async fn update_preference(
        &self,
        id: &str,
        update: &PreferenceUpdate,
    ) -> Result<PreferenceRecord, ApiError>;
}
