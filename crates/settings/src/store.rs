//! In-memory store of per-type preference state.
//!
//! The store is a plain map keyed by notification type key. It holds only
//! what the backend has said (or what a failed handshake left behind) and
//! synthesizes [`PreferenceState::Default`] for every key it has no entry
//! for, so the settings matrix can render the full catalog regardless of
//! how many records exist server-side.

use std::collections::HashMap;

use parapet_client::PreferenceRecord;
use parapet_core::{PreferenceFields, PreferenceId, PreferenceState, PreferenceUpdate};

/// Map of notification type key to preference state.
///
/// Not synchronized; [`crate::PreferenceManager`] wraps it in a lock.
#[derive(Debug, Default)]
pub struct PreferenceStore {
    entries: HashMap<String, PreferenceState>,
}

impl PreferenceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire store contents with fetched records.
    ///
    /// Records without an id land as [`PreferenceState::Unsaved`] so the
    /// next edit re-creates them server-side. When the backend returns
    /// several records for one type key, the last one wins.
    pub fn replace_all(&mut self, records: Vec<PreferenceRecord>) {
        self.entries.clear();
        for record in records {
            let fields = record.fields();
            let state = match record.id {
                Some(id) => PreferenceState::Persisted { id, fields },
                None => PreferenceState::Unsaved(fields),
            };
            self.entries.insert(record.notification_type, state);
        }
    }

    /// State for a type key, synthesizing `Default` for unknown keys.
    pub fn state(&self, notification_type: &str) -> PreferenceState {
        self.entries
            .get(notification_type)
            .cloned()
            .unwrap_or(PreferenceState::Default)
    }

    /// Effective field values for a type key.
    pub fn effective(&self, notification_type: &str) -> PreferenceFields {
        self.state(notification_type).fields()
    }

    /// Merge a partial update into the stored state for a key.
    ///
    /// Preserves the save tag: a persisted entry keeps its id, an absent
    /// entry becomes unsaved. Called only after the server accepted the
    /// corresponding write.
    pub fn apply(&mut self, notification_type: &str, update: &PreferenceUpdate) {
        let merged = self.state(notification_type).merged(update);
        self.entries.insert(notification_type.to_string(), merged);
    }

    /// Store the outcome of a create round-trip.
    ///
    /// `fields` is the full field set that was sent; `id` is whatever the
    /// server handed back. Without an id the entry stays unsaved.
    pub fn insert_saved(
        &mut self,
        notification_type: impl Into<String>,
        fields: PreferenceFields,
        id: Option<PreferenceId>,
    ) {
        let state = match id {
            Some(id) => PreferenceState::Persisted { id, fields },
            None => PreferenceState::Unsaved(fields),
        };
        self.entries.insert(notification_type.into(), state);
    }

    /// Drop every entry, reverting all types to their defaults.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored entries (not the catalog size).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
