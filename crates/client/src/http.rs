//! REST client for the notification preference endpoints.
//!
//! Wraps the platform's preference HTTP API (list, create, partial
//! update) using [`reqwest`].

use std::time::Duration;

use async_trait::async_trait;
use parapet_core::PreferenceUpdate;

use crate::api::{ApiError, PreferenceApi};
use crate::config::ApiConfig;
use crate::models::{NewPreference, PreferenceRecord};

/// HTTP implementation of [`PreferenceApi`].
pub struct HttpPreferenceApi {
    client: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
}

impl HttpPreferenceApi {
    /// Create a new API client from configuration.
    pub fn new(config: ApiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("HTTP client must be constructible");
        Self::with_client(client, config)
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across API surfaces).
    pub fn with_client(client: reqwest::Client, config: ApiConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token,
        }
    }

    fn preferences_url(&self) -> String {
        format!("{}/notifications/preferences", self.base_url)
    }

    fn preference_url(&self, id: &str) -> String {
        format!("{}/notifications/preferences/{}", self.base_url, id)
    }

    /// Attach the bearer token, when one is configured.
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or an [`ApiError::Api`] containing
    /// the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl PreferenceApi for HttpPreferenceApi {
    /// Sends a `GET /notifications/preferences` request.
    async fn list_preferences(&self) -> Result<Vec<PreferenceRecord>, ApiError> {
        let request = self.client.get(self.preferences_url());
        let response = self.authorize(request).send().await?;

        Self::parse_response(response).await
    }

    /// Sends a `POST /notifications/preferences` request carrying the
    /// full field set for the new record.
    async fn create_preference(&self, new: &NewPreference) -> Result<PreferenceRecord, ApiError> {
        let request = self.client.post(self.preferences_url()).json(new);
        let response = self.authorize(request).send().await?;

        Self::parse_response(response).await
    }

    /// Sends a `PUT /notifications/preferences/{id}` request. Only the
    /// fields present in `update` appear in the body.
    async fn update_preference(
        &self,
        id: &str,
        update: &PreferenceUpdate,
    ) -> Result<PreferenceRecord, ApiError> {
        let request = self.client.put(self.preference_url(id)).json(update);
        let response = self.authorize(request).send().await?;

        Self::parse_response(response).await
    }
}
