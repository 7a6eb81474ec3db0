//! Parapet domain core: the notification catalog and preference model.
//!
//! Pure types and validation shared by the API client and the settings
//! session crates:
//!
//! - [`catalog`]: the fixed taxonomy of notification categories and types.
//! - [`preference`]: per-type preference values, partial updates, and the
//!   saved/unsaved state tag.
//! - [`error`]: the shared [`CoreError`] type.
//!
//! This crate performs no I/O and holds no session state.

pub mod catalog;
pub mod error;
pub mod preference;
pub mod types;

pub use catalog::{NotificationCatalog, NotificationCategory, NotificationType};
pub use error::CoreError;
pub use preference::{
    DeliveryMethod, Frequency, PreferenceFields, PreferenceState, PreferenceUpdate,
};
pub use types::PreferenceId;
