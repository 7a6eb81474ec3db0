//! The notification catalog: the fixed category → type taxonomy.
//!
//! The catalog is what the settings matrix renders: every category and
//! type appears regardless of which types have stored preference records.
//! It is an injected, immutable value: production code uses
//! [`NotificationCatalog::compliance_default`], tests assemble ad hoc
//! catalogs via [`NotificationCatalog::new`].

use std::collections::HashSet;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Well-known type keys
// ---------------------------------------------------------------------------

/// A task was assigned to the user.
pub const TYPE_TASK_ASSIGNED: &str = "task_assigned";

/// A task owned by the user passed its due date.
pub const TYPE_TASK_OVERDUE: &str = "task_overdue";

/// A task the user follows was marked complete.
pub const TYPE_TASK_COMPLETED: &str = "task_completed";

/// A security incident was opened or escalated.
pub const TYPE_SECURITY_INCIDENT: &str = "security_incident";

/// A control check detected a policy breach.
pub const TYPE_POLICY_VIOLATION: &str = "policy_violation";

/// A new risk was added to the register.
pub const TYPE_RISK_IDENTIFIED: &str = "risk_identified";

/// A watched risk moved to a new status.
pub const TYPE_RISK_STATUS_CHANGED: &str = "risk_status_changed";

/// A periodic risk review is coming up.
pub const TYPE_RISK_REVIEW_DUE: &str = "risk_review_due";

/// The user was added as an assessment respondent.
pub const TYPE_ASSESSMENT_ASSIGNED: &str = "assessment_assigned";

/// An assessment the user requested was submitted.
pub const TYPE_ASSESSMENT_COMPLETED: &str = "assessment_completed";

/// New evidence was attached to a control.
pub const TYPE_EVIDENCE_UPLOADED: &str = "evidence_uploaded";

/// Evidence owned by the user is about to lapse.
pub const TYPE_EVIDENCE_EXPIRING: &str = "evidence_expiring";

/// A requested report finished generating.
pub const TYPE_REPORT_GENERATED: &str = "report_generated";

/// A connected integration failed to sync.
pub const TYPE_INTEGRATION_SYNC_FAILED: &str = "integration_sync_failed";

/// A connected integration lost its authorization.
pub const TYPE_INTEGRATION_DISCONNECTED: &str = "integration_disconnected";

// ---------------------------------------------------------------------------
// Catalog types
// ---------------------------------------------------------------------------

/// The smallest addressable unit of notification configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationType {
    /// Stable identifier; the join key to preference records.
    pub key: String,
    /// Human-readable name shown in the settings matrix.
    pub label: String,
    /// One-line explanation shown under the label.
    pub description: String,
}

impl NotificationType {
    /// Create a notification type definition.
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            description: description.into(),
        }
    }
}

/// A named group of related notification types, rendered as one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationCategory {
    /// Unique category name, e.g. `"Tasks"`.
    pub name: String,
    /// One-line description shown on the category card.
    pub description: String,
    /// The types in this category, in display order.
    pub types: Vec<NotificationType>,
}

impl NotificationCategory {
    /// Create a category holding `types` in display order.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        types: Vec<NotificationType>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            types,
        }
    }

    /// Number of types in this category (the card badge value).
    pub fn type_count(&self) -> usize {
        self.types.len()
    }
}

/// The full, ordered category → type taxonomy.
///
/// Immutable once constructed. [`NotificationCatalog::new`] rejects empty
/// and duplicate keys so every type key resolves to exactly one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationCatalog {
    categories: Vec<NotificationCategory>,
}

impl NotificationCatalog {
    /// Build a catalog from category definitions, validating uniqueness.
    ///
    /// Category names must be unique and non-empty; type keys must be
    /// unique and non-empty across the whole catalog.
    pub fn new(categories: Vec<NotificationCategory>) -> Result<Self, CoreError> {
        let mut category_names = HashSet::new();
        let mut type_keys = HashSet::new();

        for category in &categories {
            if category.name.is_empty() {
                return Err(CoreError::Validation(
                    "Category name must not be empty".to_string(),
                ));
            }
            if !category_names.insert(category.name.as_str()) {
                return Err(CoreError::Validation(format!(
                    "Duplicate category name '{}'",
                    category.name
                )));
            }
            for entry in &category.types {
                if entry.key.is_empty() {
                    return Err(CoreError::Validation(format!(
                        "Notification type in category '{}' has an empty key",
                        category.name
                    )));
                }
                if !type_keys.insert(entry.key.as_str()) {
                    return Err(CoreError::Validation(format!(
                        "Duplicate notification type key '{}'",
                        entry.key
                    )));
                }
            }
        }

        Ok(Self { categories })
    }

    /// The built-in taxonomy for the compliance platform.
    pub fn compliance_default() -> Self {
        Self {
            categories: vec![
                NotificationCategory::new(
                    "Tasks",
                    "Remediation and to-do activity",
                    vec![
                        NotificationType::new(
                            TYPE_TASK_ASSIGNED,
                            "Task assigned",
                            "A task was assigned to you.",
                        ),
                        NotificationType::new(
                            TYPE_TASK_OVERDUE,
                            "Task overdue",
                            "A task you own passed its due date.",
                        ),
                        NotificationType::new(
                            TYPE_TASK_COMPLETED,
                            "Task completed",
                            "A task you follow was marked complete.",
                        ),
                    ],
                ),
                NotificationCategory::new(
                    "Security",
                    "Incidents and policy enforcement",
                    vec![
                        NotificationType::new(
                            TYPE_SECURITY_INCIDENT,
                            "Security incident",
                            "An incident was opened or escalated.",
                        ),
                        NotificationType::new(
                            TYPE_POLICY_VIOLATION,
                            "Policy violation",
                            "A control check detected a policy breach.",
                        ),
                    ],
                ),
                NotificationCategory::new(
                    "Risks",
                    "Risk register changes",
                    vec![
                        NotificationType::new(
                            TYPE_RISK_IDENTIFIED,
                            "Risk identified",
                            "A new risk was added to the register.",
                        ),
                        NotificationType::new(
                            TYPE_RISK_STATUS_CHANGED,
                            "Risk status changed",
                            "A risk you watch moved to a new status.",
                        ),
                        NotificationType::new(
                            TYPE_RISK_REVIEW_DUE,
                            "Risk review due",
                            "A periodic risk review is coming up.",
                        ),
                    ],
                ),
                NotificationCategory::new(
                    "Assessments",
                    "Questionnaires and audits",
                    vec![
                        NotificationType::new(
                            TYPE_ASSESSMENT_ASSIGNED,
                            "Assessment assigned",
                            "You were added as an assessment respondent.",
                        ),
                        NotificationType::new(
                            TYPE_ASSESSMENT_COMPLETED,
                            "Assessment completed",
                            "An assessment you requested was submitted.",
                        ),
                    ],
                ),
                NotificationCategory::new(
                    "Evidence",
                    "Evidence collection and expiry",
                    vec![
                        NotificationType::new(
                            TYPE_EVIDENCE_UPLOADED,
                            "Evidence uploaded",
                            "New evidence was attached to a control.",
                        ),
                        NotificationType::new(
                            TYPE_EVIDENCE_EXPIRING,
                            "Evidence expiring",
                            "Evidence you own is about to lapse.",
                        ),
                    ],
                ),
                NotificationCategory::new(
                    "Reports",
                    "Generated documents",
                    vec![NotificationType::new(
                        TYPE_REPORT_GENERATED,
                        "Report ready",
                        "A report you requested finished generating.",
                    )],
                ),
                NotificationCategory::new(
                    "Integrations",
                    "Connected system health",
                    vec![
                        NotificationType::new(
                            TYPE_INTEGRATION_SYNC_FAILED,
                            "Sync failed",
                            "A connected integration failed to sync.",
                        ),
                        NotificationType::new(
                            TYPE_INTEGRATION_DISCONNECTED,
                            "Integration disconnected",
                            "A connected integration lost authorization.",
                        ),
                    ],
                ),
            ],
        }
    }

    /// All categories in display order.
    pub fn categories(&self) -> &[NotificationCategory] {
        &self.categories
    }

    /// Look up a type definition by its key.
    pub fn type_by_key(&self, key: &str) -> Option<&NotificationType> {
        self.categories
            .iter()
            .flat_map(|c| c.types.iter())
            .find(|t| t.key == key)
    }

    /// The category containing `key`, if any.
    pub fn category_of(&self, key: &str) -> Option<&NotificationCategory> {
        self.categories
            .iter()
            .find(|c| c.types.iter().any(|t| t.key == key))
    }

    /// `true` when `key` is defined somewhere in the catalog.
    pub fn contains_type(&self, key: &str) -> bool {
        self.type_by_key(key).is_some()
    }

    /// Total number of notification types across all categories.
    pub fn type_count(&self) -> usize {
        self.categories.iter().map(|c| c.types.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn small_catalog() -> NotificationCatalog {
        NotificationCatalog::new(vec![
            NotificationCategory::new(
                "Tasks",
                "Task activity",
                vec![
                    NotificationType::new("task_assigned", "Task assigned", "Assigned to you."),
                    NotificationType::new("task_overdue", "Task overdue", "Past its due date."),
                ],
            ),
            NotificationCategory::new(
                "Security",
                "Incidents",
                vec![NotificationType::new(
                    "security_incident",
                    "Security incident",
                    "Opened or escalated.",
                )],
            ),
        ])
        .unwrap()
    }

    // -- construction ---------------------------------------------------------

    #[test]
    fn new_accepts_unique_names_and_keys() {
        let catalog = small_catalog();
        assert_eq!(catalog.categories().len(), 2);
        assert_eq!(catalog.type_count(), 3);
    }

    #[test]
    fn new_rejects_duplicate_category_name() {
        let result = NotificationCatalog::new(vec![
            NotificationCategory::new("Tasks", "", vec![]),
            NotificationCategory::new("Tasks", "", vec![]),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn new_rejects_duplicate_type_key_across_categories() {
        let result = NotificationCatalog::new(vec![
            NotificationCategory::new(
                "Tasks",
                "",
                vec![NotificationType::new("task_overdue", "A", "")],
            ),
            NotificationCategory::new(
                "Other",
                "",
                vec![NotificationType::new("task_overdue", "B", "")],
            ),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn new_rejects_empty_type_key() {
        let result = NotificationCatalog::new(vec![NotificationCategory::new(
            "Tasks",
            "",
            vec![NotificationType::new("", "Nameless", "")],
        )]);
        assert!(result.is_err());
    }

    // -- lookups --------------------------------------------------------------

    #[test]
    fn type_by_key_finds_defined_types() {
        let catalog = small_catalog();
        assert_eq!(
            catalog.type_by_key("task_overdue").map(|t| t.label.as_str()),
            Some("Task overdue")
        );
        assert!(catalog.type_by_key("nonexistent").is_none());
    }

    #[test]
    fn category_of_resolves_owning_category() {
        let catalog = small_catalog();
        assert_eq!(
            catalog.category_of("security_incident").map(|c| c.name.as_str()),
            Some("Security")
        );
        assert!(catalog.category_of("nonexistent").is_none());
    }

    #[test]
    fn categories_preserve_display_order() {
        let catalog = small_catalog();
        let names: Vec<_> = catalog.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Tasks", "Security"]);

        let task_keys: Vec<_> = catalog.categories()[0]
            .types
            .iter()
            .map(|t| t.key.as_str())
            .collect();
        assert_eq!(task_keys, vec!["task_assigned", "task_overdue"]);
    }

    // -- built-in taxonomy ----------------------------------------------------

    #[test]
    fn compliance_default_passes_validation() {
        let catalog = NotificationCatalog::compliance_default();
        assert!(NotificationCatalog::new(catalog.categories().to_vec()).is_ok());
    }

    #[test]
    fn compliance_default_contains_task_and_security_types() {
        let catalog = NotificationCatalog::compliance_default();
        assert!(catalog.contains_type(TYPE_TASK_ASSIGNED));
        assert!(catalog.contains_type(TYPE_TASK_OVERDUE));
        assert!(catalog.contains_type(TYPE_SECURITY_INCIDENT));
        assert_eq!(
            catalog.category_of(TYPE_TASK_OVERDUE).map(|c| c.name.as_str()),
            Some("Tasks")
        );
    }

    #[test]
    fn compliance_default_badge_counts_match_types() {
        let catalog = NotificationCatalog::compliance_default();
        for category in catalog.categories() {
            assert_eq!(category.type_count(), category.types.len());
            assert!(category.type_count() >= 1);
        }
    }
}
