//! Preference sync engine.
//!
//! [`PreferenceManager`] owns the in-memory preference store and keeps it
//! in sync with the backend.  It fetches stored records once per session,
//! routes each edit to a create or update call depending on whether the
//! server has acknowledged the record, and admits one write at a time.
//!
//! Save and load outcomes are broadcast as [`Notice`]s. Call
//! [`PreferenceManager::subscribe_notices`] to receive them.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parapet_client::{ApiError, NewPreference, PreferenceApi};
use parapet_core::{
    DeliveryMethod, Frequency, NotificationCatalog, PreferenceFields, PreferenceState,
    PreferenceUpdate,
};
use tokio::sync::{broadcast, Mutex, RwLock};

use crate::notice::{Notice, NoticeBus};
use crate::store::PreferenceStore;
use crate::view::{self, SettingsView};

/// A write that has been dispatched and not yet resolved.
///
/// While one of these occupies the manager's write slot, further edits
/// are rejected and the settings view renders the updated values
/// optimistically for the targeted row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingWrite {
    /// Type key the write targets.
    pub notification_type: String,
    /// The changes being saved.
    pub update: PreferenceUpdate,
}

/// Synchronizes notification preferences with the backend.
///
/// Created once per session via [`PreferenceManager::new`]. The returned
/// `Arc` can be cheaply cloned into whatever drives the settings screen.
pub struct PreferenceManager {
    /// The fixed category and type taxonomy being configured.
    catalog: NotificationCatalog,
    api: Arc<dyn PreferenceApi>,
    store: RwLock<PreferenceStore>,
    /// Single write slot: occupied while a save is outstanding.
    in_flight: Mutex<Option<PendingWrite>>,
    /// Set once the initial fetch has resolved, successfully or not.
    loaded: AtomicBool,
    notices: NoticeBus,
}

impl PreferenceManager {
    /// Create a manager for `catalog` backed by `api`.
    ///
    /// Performs no IO; call [`PreferenceManager::load`] before accepting
    /// edits.
    pub fn new(catalog: NotificationCatalog, api: Arc<dyn PreferenceApi>) -> Arc<Self> {
        Arc::new(Self {
            catalog,
            api,
            store: RwLock::new(PreferenceStore::new()),
            in_flight: Mutex::new(None),
            loaded: AtomicBool::new(false),
            notices: NoticeBus::default(),
        })
    }

    /// Fetch the stored preference records and seed the store.
    ///
    /// On failure the store is cleared and an error notice is published;
    /// the settings view then renders catalog defaults. Either way the
    /// manager counts as loaded afterwards and edits are accepted.
    pub async fn load(&self) -> Result<(), PreferenceManagerError> {
        match self.api.list_preferences().await {
            Ok(records) => {
                let count = records.len();
                self.store.write().await.replace_all(records);
                self.loaded.store(true, Ordering::SeqCst);
                tracing::info!(count, "Loaded notification preferences");
                Ok(())
            }
            Err(e) => {
                self.store.write().await.clear();
                self.loaded.store(true, Ordering::SeqCst);
                tracing::error!(error = %e, "Failed to load notification preferences");
                self.notices
                    .publish(Notice::error("Failed to load notification preferences"));
                Err(PreferenceManagerError::Api(e))
            }
        }
    }

    /// Save a partial edit for one notification type.
    ///
    /// Routes to `PUT` when the server already holds the record, `POST`
    /// otherwise. The store is only mutated once the server accepts the
    /// write; on failure the previous values stand and an error notice is
    /// published.
    ///
    /// Rejects the edit outright (no queueing) when preferences have not
    /// been loaded yet or another save is still outstanding.
    pub async fn update_preference(
        &self,
        notification_type: &str,
        update: PreferenceUpdate,
    ) -> Result<(), PreferenceManagerError> {
        if !self.loaded.load(Ordering::SeqCst) {
            return Err(PreferenceManagerError::NotLoaded);
        }

        // Claim the write slot before any IO. The guard is dropped right
        // away; holding it across the request would serialize readers too.
        {
            let mut slot = self.in_flight.lock().await;
            if slot.is_some() {
                return Err(PreferenceManagerError::SaveInFlight);
            }
            *slot = Some(PendingWrite {
                notification_type: notification_type.to_string(),
                update,
            });
        }

        let result = self.dispatch_write(notification_type, update).await;

        // Release the slot before publishing the outcome so subscribers
        // reacting to a notice observe the manager idle again.
        self.in_flight.lock().await.take();

        match result {
            Ok(()) => {
                tracing::info!(notification_type, "Notification preference saved");
                self.notices
                    .publish(Notice::success("Notification preferences saved"));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    notification_type,
                    error = %e,
                    "Failed to save notification preference",
                );
                self.notices
                    .publish(Notice::error("Failed to save notification preferences"));
                Err(PreferenceManagerError::Api(e))
            }
        }
    }

    /// Flip a notification type on or off.
    pub async fn toggle(
        &self,
        notification_type: &str,
        enabled: bool,
    ) -> Result<(), PreferenceManagerError> {
        self.update_preference(notification_type, PreferenceUpdate::enabled(enabled))
            .await
    }

    /// Change the delivery method for a notification type.
    pub async fn set_delivery_method(
        &self,
        notification_type: &str,
        method: DeliveryMethod,
    ) -> Result<(), PreferenceManagerError> {
        self.update_preference(notification_type, PreferenceUpdate::delivery_method(method))
            .await
    }

    /// Change the send frequency for a notification type.
    pub async fn set_frequency(
        &self,
        notification_type: &str,
        frequency: Frequency,
    ) -> Result<(), PreferenceManagerError> {
        self.update_preference(notification_type, PreferenceUpdate::frequency(frequency))
            .await
    }

    /// The taxonomy this manager configures.
    pub fn catalog(&self) -> &NotificationCatalog {
        &self.catalog
    }

    /// `true` once the initial fetch has resolved (either way).
    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }

    /// `true` while a save is outstanding.
    pub async fn is_saving(&self) -> bool {
        self.in_flight.lock().await.is_some()
    }

    /// The outstanding write, if any.
    pub async fn pending_write(&self) -> Option<PendingWrite> {
        self.in_flight.lock().await.clone()
    }

    /// Current save-state for one notification type.
    pub async fn preference_state(&self, notification_type: &str) -> PreferenceState {
        self.store.read().await.state(notification_type)
    }

    /// Subscribe to save/load outcome notices.
    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    /// Project the catalog and current store into renderable view data.
    ///
    /// The outstanding write, if any, is rendered optimistically for its
    /// row; see [`view::project`].
    pub async fn settings_view(&self) -> SettingsView {
        let pending = self.in_flight.lock().await.clone();
        let store = self.store.read().await;
        view::project(&self.catalog, &store, pending.as_ref(), self.is_loaded())
    }

    // ---- private helpers ----

    /// Route one edit to the create or update endpoint and, on success,
    /// fold the result into the store.
    async fn dispatch_write(
        &self,
        notification_type: &str,
        update: PreferenceUpdate,
    ) -> Result<(), ApiError> {
        let state = self.store.read().await.state(notification_type);

        match state {
            PreferenceState::Persisted { id, .. } => {
                self.api.update_preference(&id, &update).await?;
                self.store.write().await.apply(notification_type, &update);
            }
            PreferenceState::Default => {
                // First touch of a type enables it unless the edit says
                // otherwise.
                let fields = PreferenceFields::create_baseline().merged(&update);
                self.create_remote(notification_type, fields).await?;
            }
            PreferenceState::Unsaved(current) => {
                self.create_remote(notification_type, current.merged(&update))
                    .await?;
            }
        }

        Ok(())
    }

    /// `POST` the full field set for a type and store the outcome.
    async fn create_remote(
        &self,
        notification_type: &str,
        fields: PreferenceFields,
    ) -> Result<(), ApiError> {
        let new = NewPreference::new(notification_type, fields);
        let record = self.api.create_preference(&new).await?;

        if record.id.is_none() {
            // Without an id later edits cannot address the record; it
            // stays unsaved so the next save re-creates it.
            tracing::warn!(
                notification_type,
                "Create response carried no record id; preference stays unsaved",
            );
        }

        self.store
            .write()
            .await
            .insert_saved(notification_type, fields, record.id);

        Ok(())
    }
}

/// Errors that can occur when interacting with the manager.
#[derive(Debug, thiserror::Error)]
pub enum PreferenceManagerError {
    /// The initial fetch has not resolved yet; there is nothing to merge
    /// edits into.
    #[error("Preferences have not been loaded yet")]
    NotLoaded,

    /// Another save is outstanding. The edit is rejected, not queued.
    #[error("A preference save is already in progress")]
    SaveInFlight,

    /// The REST call failed.
    #[error("Preference API call failed: {0}")]
    Api(#[from] ApiError),
}
