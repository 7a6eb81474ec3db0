//! Notification settings engine.
//!
//! Owns the in-memory preference store, synchronizes it with the backend
//! through the `parapet-client` REST layer, and projects catalog plus
//! store into the renderable settings matrix.

pub mod manager;
pub mod notice;
pub mod store;
pub mod view;

pub use manager::{PendingWrite, PreferenceManager, PreferenceManagerError};
pub use notice::{Notice, NoticeBus, NoticeSeverity};
pub use store::PreferenceStore;
pub use view::{CategoryView, PreferenceRow, SettingsView};
