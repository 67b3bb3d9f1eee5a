#![allow(clippy::unwrap_used)]
// Integration tests for drag-and-drop service reordering.

use std::sync::Arc;

use atelier_api::session::StoredSession;
use atelier_api::{ApiClient, MemorySessionStore};
use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use atelier_core::{
    Atelier, EntityId, Reconciliation, ReorderOutcome, Session, SkipReason, User,
};

async fn setup(reconciliation: Reconciliation) -> (MockServer, Atelier) {
    let server = MockServer::start().await;
    let session = Arc::new(Session::new(MemorySessionStore::with_session(StoredSession {
        access_token: "access".into(),
        refresh_token: "refresh".into(),
        current_user: User {
            id: EntityId::new(1),
            email: "admin@agency.test".into(),
            username: "admin".into(),
            is_admin: true,
        },
    })));
    let client = ApiClient::with_client(
        reqwest::Client::new(),
        Url::parse(&server.uri()).unwrap(),
        session,
    );
    (server, Atelier::with_client(Arc::new(client), reconciliation))
}

fn services() -> serde_json::Value {
    json!([
        { "id": 1, "name": "Brand Identity", "order": 1, "status": "active" },
        { "id": 2, "name": "SEO", "order": 2, "status": "active" },
        { "id": 3, "name": "Content", "order": 3, "status": "inactive" }
    ])
}

async fn mount_services(server: &MockServer, expected_loads: u64) {
    Mock::given(method("GET"))
        .and(path("/api/admin/services/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(services()))
        .expect(expected_loads)
        .mount(server)
        .await;
}

fn orders(atelier: &Atelier) -> Vec<(u64, i64)> {
    atelier
        .services()
        .store()
        .snapshot()
        .iter()
        .map(|s| (s.id.get(), s.order))
        .collect()
}

#[tokio::test]
async fn test_swap_changes_exactly_two_orders() {
    let (server, atelier) = setup(Reconciliation::Deferred).await;
    mount_services(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/api/admin/services/reorder/"))
        .and(body_json(json!({
            "serviceOrders": [ { "id": 1, "order": 2 }, { "id": 2, "order": 1 } ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    atelier.services().load().await.unwrap();
    let outcome = atelier.reorder().move_to(0, 1).await.unwrap();

    assert!(matches!(
        outcome,
        ReorderOutcome::Moved { moved, target, .. }
            if moved == EntityId::new(1) && target == EntityId::new(2)
    ));
    assert_eq!(orders(&atelier), [(2, 1), (1, 2), (3, 3)]);
}

#[tokio::test]
async fn test_failed_swap_rolls_back_to_fresh_load() {
    let (server, atelier) = setup(Reconciliation::FullReload).await;
    mount_services(&server, 2).await;
    Mock::given(method("POST"))
        .and(path("/api/admin/services/reorder/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "detail": "db locked" })))
        .mount(&server)
        .await;

    let services = atelier.services();
    services.load().await.unwrap();
    let fresh = orders(&atelier);

    let err = atelier.reorder().move_to(2, 0).await.unwrap_err();
    assert!(err.to_string().contains("db locked"));
    assert_eq!(orders(&atelier), fresh);
}

#[tokio::test]
async fn test_swap_under_full_reload_matches_server_list() {
    let (server, atelier) = setup(Reconciliation::FullReload).await;
    Mock::given(method("GET"))
        .and(path("/api/admin/services/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(services()))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/services/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 2, "name": "SEO", "order": 1, "status": "active" },
            { "id": 1, "name": "Brand Identity", "order": 2, "status": "active" },
            { "id": 3, "name": "Content", "order": 3, "status": "inactive" }
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/admin/services/reorder/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    atelier.services().load().await.unwrap();
    let outcome = atelier.reorder().move_to(0, 1).await.unwrap();

    assert!(matches!(outcome, ReorderOutcome::Moved { .. }));
    assert_eq!(orders(&atelier), [(2, 1), (1, 2), (3, 3)]);
    assert!(atelier.services().store().load_error().is_none());
}

#[tokio::test]
async fn test_failed_swap_with_failed_reload_keeps_last_loaded_order() {
    let (server, atelier) = setup(Reconciliation::FullReload).await;
    Mock::given(method("GET"))
        .and(path("/api/admin/services/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(services()))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/services/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/admin/services/reorder/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "detail": "db locked" })))
        .mount(&server)
        .await;

    atelier.services().load().await.unwrap();
    let before = orders(&atelier);

    atelier.reorder().move_to(0, 2).await.unwrap_err();

    assert_eq!(orders(&atelier), before);
    assert!(atelier.services().store().load_error().is_some());
    let first = atelier.services().store().get(EntityId::new(1)).unwrap();
    assert_eq!(first.order, 1);
}

#[tokio::test]
async fn test_same_index_and_out_of_range_are_no_ops() {
    let (server, atelier) = setup(Reconciliation::FullReload).await;
    mount_services(&server, 1).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    atelier.services().load().await.unwrap();
    let reorder = atelier.reorder();

    assert_eq!(
        reorder.move_to(1, 1).await.unwrap(),
        ReorderOutcome::Skipped(SkipReason::SameIndex)
    );
    assert_eq!(
        reorder.move_to(0, 7).await.unwrap(),
        ReorderOutcome::Skipped(SkipReason::OutOfRange)
    );
    assert_eq!(orders(&atelier), [(1, 1), (2, 2), (3, 3)]);
}

#[tokio::test]
async fn test_reorder_refused_while_filtered() {
    let (server, atelier) = setup(Reconciliation::FullReload).await;
    mount_services(&server, 1).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    atelier.services().load().await.unwrap();
    atelier.services().set_search("seo");

    let reorder = atelier.reorder();
    assert!(!reorder.can_reorder());
    assert_eq!(
        reorder.move_to(0, 1).await.unwrap(),
        ReorderOutcome::Skipped(SkipReason::Filtered)
    );

    atelier.services().clear_filters();
    assert!(reorder.can_reorder());
}
