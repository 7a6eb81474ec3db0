//! Shared domain error type.

/// Errors produced by the pure domain layer (catalog construction, wire
/// value parsing). Remote-call and session errors live in the crates that
/// own them.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A catalog definition or preference value failed validation.
    #[error("Validation failed: {0}")]
    Validation(String),
}
