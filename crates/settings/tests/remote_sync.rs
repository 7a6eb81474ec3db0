//! End-to-end tests: the sync engine over the real HTTP client.
//!
//! Uses httpmock as the backend to pin down the exact requests the
//! engine produces for the load, create, and update paths.

use std::sync::Arc;

use assert_matches::assert_matches;
use httpmock::prelude::*;
use parapet_client::{ApiConfig, ApiError, HttpPreferenceApi};
use parapet_core::{DeliveryMethod, Frequency, NotificationCatalog};
use parapet_settings::{PreferenceManager, PreferenceManagerError};
use serde_json::json;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn manager_for(server: &MockServer) -> Arc<PreferenceManager> {
    let api = Arc::new(HttpPreferenceApi::new(ApiConfig::for_base_url(
        server.base_url(),
    )));
    PreferenceManager::new(NotificationCatalog::compliance_default(), api)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn load_then_update_round_trip() {
    let server = MockServer::start();
    let list = server.mock(|when, then| {
        when.method(GET).path("/notifications/preferences");
        then.status(200).json_body(json!([{
            "id": "p1",
            "notification_type": "task_overdue",
            "is_enabled": true,
            "delivery_method": "in_app",
            "frequency": "daily"
        }]));
    });
    let update = server.mock(|when, then| {
        when.method(PUT)
            .path("/notifications/preferences/p1")
            .json_body(json!({"frequency": "weekly"}));
        then.status(200).json_body(json!({
            "id": "p1",
            "notification_type": "task_overdue",
            "is_enabled": true,
            "delivery_method": "in_app",
            "frequency": "weekly"
        }));
    });

    let manager = manager_for(&server);
    manager.load().await.unwrap();
    list.assert();

    let view = manager.settings_view().await;
    let row = view
        .categories
        .iter()
        .flat_map(|c| c.rows.iter())
        .find(|r| r.key == "task_overdue")
        .unwrap();
    assert!(row.is_enabled);
    assert_eq!(row.delivery_method, DeliveryMethod::InApp);
    assert_eq!(row.frequency, Frequency::Daily);

    // Sibling type with no record renders the defaults.
    let sibling = view
        .categories
        .iter()
        .flat_map(|c| c.rows.iter())
        .find(|r| r.key == "task_assigned")
        .unwrap();
    assert!(!sibling.is_enabled);
    assert_eq!(sibling.delivery_method, DeliveryMethod::Email);
    assert_eq!(sibling.frequency, Frequency::Immediate);

    manager
        .set_frequency("task_overdue", Frequency::Weekly)
        .await
        .unwrap();
    update.assert();

    let state = manager.preference_state("task_overdue").await;
    assert_eq!(state.id(), Some("p1"));
    assert_eq!(state.fields().frequency, Frequency::Weekly);
}

#[tokio::test]
async fn first_touch_posts_enabled_baseline_with_the_edit() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/notifications/preferences");
        then.status(200).json_body(json!([]));
    });
    let create = server.mock(|when, then| {
        when.method(POST)
            .path("/notifications/preferences")
            .json_body(json!({
                "notification_type": "security_incident",
                "is_enabled": true,
                "delivery_method": "in_app",
                "frequency": "immediate"
            }));
        then.status(201).json_body(json!({
            "id": "p2",
            "notification_type": "security_incident",
            "is_enabled": true,
            "delivery_method": "in_app",
            "frequency": "immediate"
        }));
    });

    let manager = manager_for(&server);
    manager.load().await.unwrap();

    // The first edit picks a delivery method; enablement rides along
    // from the create baseline.
    manager
        .set_delivery_method("security_incident", DeliveryMethod::InApp)
        .await
        .unwrap();
    create.assert();

    let state = manager.preference_state("security_incident").await;
    assert_eq!(state.id(), Some("p2"));
    assert!(state.fields().is_enabled);
    assert_eq!(state.fields().delivery_method, DeliveryMethod::InApp);
}

#[tokio::test]
async fn backend_rejection_surfaces_and_preserves_state() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/notifications/preferences");
        then.status(200).json_body(json!([{
            "id": "p1",
            "notification_type": "task_overdue",
            "is_enabled": true,
            "delivery_method": "email",
            "frequency": "immediate"
        }]));
    });
    server.mock(|when, then| {
        when.method(PUT).path("/notifications/preferences/p1");
        then.status(500).body("denied");
    });

    let manager = manager_for(&server);
    manager.load().await.unwrap();

    let result = manager.toggle("task_overdue", false).await;

    assert_matches!(
        result,
        Err(PreferenceManagerError::Api(ApiError::Api { status: 500, .. }))
    );
    let state = manager.preference_state("task_overdue").await;
    assert!(state.fields().is_enabled);
    assert_eq!(state.id(), Some("p1"));
}
