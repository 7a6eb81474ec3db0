//! REST client library for the notification preference endpoints.
//!
//! Provides the wire DTOs, a transport-agnostic [`PreferenceApi`] trait,
//! and the [`reqwest`]-backed production implementation.

pub mod api;
pub mod config;
pub mod http;
pub mod models;

pub use api::{ApiError, PreferenceApi};
pub use config::ApiConfig;
pub use http::HttpPreferenceApi;
pub use models::{NewPreference, PreferenceRecord};
