//! Read-only projection of the settings matrix.
//!
//! [`project`] folds the catalog, the preference store, and the
//! outstanding write into one renderable snapshot. It mutates nothing
//! and synthesizes defaults for types without stored records, so the
//! matrix always shows the complete taxonomy.

use parapet_core::{DeliveryMethod, Frequency, NotificationCatalog, NotificationType};
use serde::Serialize;

use crate::manager::PendingWrite;
use crate::store::PreferenceStore;

/// One notification type's row in the settings matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferenceRow {
    /// Stable type key.
    pub key: String,
    pub label: String,
    pub description: String,
    /// Effective on/off value, including any optimistic overlay.
    pub is_enabled: bool,
    pub delivery_method: DeliveryMethod,
    pub frequency: Frequency,
    /// Whether the delivery and frequency controls are shown. Disabling
    /// a row collapses its controls but keeps the stored values.
    pub config_visible: bool,
    /// `true` when the outstanding write targets this row.
    pub saving: bool,
}

/// One category card: a named group of rows plus its badge count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryView {
    pub name: String,
    pub description: String,
    /// Number of types in the category, shown as the card badge.
    pub type_count: usize,
    pub rows: Vec<PreferenceRow>,
}

/// Renderable snapshot of the whole settings screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsView {
    /// Category cards in catalog order.
    pub categories: Vec<CategoryView>,
    /// `true` while a save is outstanding anywhere in the matrix.
    pub saving: bool,
    /// `false` until the initial fetch resolves and while saving.
    pub editable: bool,
}

/// Build the settings view for `catalog` over `store`.
///
/// `pending` renders its target row with the updated values before the
/// server has confirmed them; that row and the whole view report
/// `saving`. `loaded` gates `editable`.
pub fn project(
    catalog: &NotificationCatalog,
    store: &PreferenceStore,
    pending: Option<&PendingWrite>,
    loaded: bool,
) -> SettingsView {
    let categories = catalog
        .categories()
        .iter()
        .map(|category| CategoryView {
            name: category.name.clone(),
            description: category.description.clone(),
            type_count: category.type_count(),
            rows: category
                .types
                .iter()
                .map(|ty| build_row(ty, store, pending))
                .collect(),
        })
        .collect();

    let saving = pending.is_some();

    SettingsView {
        categories,
        saving,
        editable: loaded && !saving,
    }
}

/// Build a single row, overlaying the outstanding write when it targets
/// this type.
fn build_row(
    ty: &NotificationType,
    store: &PreferenceStore,
    pending: Option<&PendingWrite>,
) -> PreferenceRow {
    let pending_here = pending.filter(|p| p.notification_type == ty.key);
    let fields = match pending_here {
        Some(p) => store.effective(&ty.key).merged(&p.update),
        None => store.effective(&ty.key),
    };

    PreferenceRow {
        key: ty.key.clone(),
        label: ty.label.clone(),
        description: ty.description.clone(),
        is_enabled: fields.is_enabled,
        delivery_method: fields.delivery_method,
        frequency: fields.frequency,
        config_visible: fields.is_enabled,
        saving: pending_here.is_some(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
