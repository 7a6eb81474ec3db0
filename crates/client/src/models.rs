//! Wire-format DTOs for the notification preference endpoints.

use parapet_core::{DeliveryMethod, Frequency, PreferenceFields, PreferenceId};
use serde::{Deserialize, Serialize};

/// A preference record as stored by the backend.
///
/// Returned by `GET /notifications/preferences` (as a list) and by the
/// create/update endpoints (as a single row). `id` is optional because
/// some deployments return the created row without an identifier; such
/// records cannot be addressed by later updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferenceRecord {
    #[serde(default)]
    pub id: Option<PreferenceId>,
    pub notification_type: String,
    pub is_enabled: bool,
    pub delivery_method: DeliveryMethod,
    pub frequency: Frequency,
}

impl PreferenceRecord {
    /// The configurable fields of this record, without identity.
    pub fn fields(&self) -> PreferenceFields {
        PreferenceFields {
            is_enabled: self.is_enabled,
            delivery_method: self.delivery_method,
            frequency: self.frequency,
        }
    }
}

/// Request body for `POST /notifications/preferences`.
#[derive(Debug, Clone, Serialize)]
pub struct NewPreference {
    pub notification_type: String,
    pub is_enabled: bool,
    pub delivery_method: DeliveryMethod,
    pub frequency: Frequency,
}

impl NewPreference {
    /// Build a create request for `notification_type` carrying `fields`.
    pub fn new(notification_type: impl Into<String>, fields: PreferenceFields) -> Self {
        Self {
            notification_type: notification_type.into(),
            is_enabled: fields.is_enabled,
            delivery_method: fields.delivery_method,
            frequency: fields.frequency,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_deserializes_with_id() {
        let record: PreferenceRecord = serde_json::from_str(
            r#"{
                "id": "p42",
                "notification_type": "task_overdue",
                "is_enabled": true,
                "delivery_method": "in_app",
                "frequency": "daily"
            }"#,
        )
        .unwrap();

        assert_eq!(record.id.as_deref(), Some("p42"));
        assert_eq!(record.notification_type, "task_overdue");
        assert!(record.is_enabled);
        assert_eq!(record.delivery_method, DeliveryMethod::InApp);
        assert_eq!(record.frequency, Frequency::Daily);
    }

    #[test]
    fn record_deserializes_without_id() {
        let record: PreferenceRecord = serde_json::from_str(
            r#"{
                "notification_type": "task_overdue",
                "is_enabled": false,
                "delivery_method": "email",
                "frequency": "immediate"
            }"#,
        )
        .unwrap();

        assert!(record.id.is_none());
        assert!(!record.is_enabled);
    }

    #[test]
    fn record_fields_strip_identity() {
        let record = PreferenceRecord {
            id: Some("p1".into()),
            notification_type: "task_assigned".into(),
            is_enabled: true,
            delivery_method: DeliveryMethod::Email,
            frequency: Frequency::Weekly,
        };

        let fields = record.fields();
        assert!(fields.is_enabled);
        assert_eq!(fields.delivery_method, DeliveryMethod::Email);
        assert_eq!(fields.frequency, Frequency::Weekly);
    }

    #[test]
    fn new_preference_serializes_all_fields() {
        let new = NewPreference::new("security_incident", PreferenceFields::create_baseline());
        let value = serde_json::to_value(&new).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "notification_type": "security_incident",
                "is_enabled": true,
                "delivery_method": "email",
                "frequency": "immediate"
            })
        );
    }
}
