#![allow(clippy::unwrap_used)]
// Integration tests for `ResourceStore` against a wiremock backend.

use std::sync::Arc;

use atelier_api::session::StoredSession;
use atelier_api::{ApiClient, MemorySessionStore};
use futures_util::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use atelier_core::{
    EntityId, JobApplication, Reconciliation, ResourceStore, Review, ReviewStatus, Session, User,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn admin_session() -> Arc<Session> {
    Arc::new(Session::new(MemorySessionStore::with_session(StoredSession {
        access_token: "access".into(),
        refresh_token: "refresh".into(),
        current_user: User {
            id: EntityId::new(1),
            email: "admin@agency.test".into(),
            username: "admin".into(),
            is_admin: true,
        },
    })))
}

async fn setup(reconciliation: Reconciliation) -> (MockServer, ResourceStore<Review>) {
    let server = MockServer::start().await;
    let client = ApiClient::with_client(
        reqwest::Client::new(),
        Url::parse(&server.uri()).unwrap(),
        admin_session(),
    );
    (server, ResourceStore::new(Arc::new(client), reconciliation))
}

fn review_json(id: u64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "company": "Acme",
        "rating": 4,
        "review": "Great work",
        "status": "approved"
    })
}

// ── load ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_load_replaces_snapshot() {
    let (server, store) = setup(Reconciliation::FullReload).await;

    Mock::given(method("GET"))
        .and(path("/api/admin/reviews/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([review_json(1, "A"), review_json(2, "B")])),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/reviews/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([review_json(2, "B")])))
        .mount(&server)
        .await;

    assert_eq!(store.load().await.unwrap(), 2);
    assert_eq!(store.load().await.unwrap(), 1);

    assert_eq!(store.len(), 1);
    assert!(store.get(EntityId::new(1)).is_none());
    assert_eq!(store.get(EntityId::new(2)).unwrap().name, "B");
}

#[tokio::test]
async fn test_failed_load_keeps_stale_snapshot_and_reports() {
    let (server, store) = setup(Reconciliation::FullReload).await;

    Mock::given(method("GET"))
        .and(path("/api/admin/reviews/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([review_json(1, "A")])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/reviews/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "detail": "boom" })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/reviews/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([review_json(1, "A")])))
        .mount(&server)
        .await;

    store.load().await.unwrap();
    assert!(store.load_error().is_none());

    assert!(store.load().await.is_err());
    assert_eq!(store.len(), 1);
    assert!(store.load_error().unwrap().contains("boom"));

    store.load().await.unwrap();
    assert!(store.load_error().is_none());
}

#[tokio::test]
async fn test_scoped_store_sends_query() {
    let server = MockServer::start().await;
    let client = Arc::new(ApiClient::with_client(
        reqwest::Client::new(),
        Url::parse(&server.uri()).unwrap(),
        admin_session(),
    ));

    Mock::given(method("GET"))
        .and(path("/api/admin/job-applications/"))
        .and(query_param("job", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 8, "job": 4, "first_name": "Ana", "last_name": "Lima" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let store: ResourceStore<JobApplication> =
        ResourceStore::new(client, Reconciliation::FullReload).scoped("job", EntityId::new(4));
    assert_eq!(store.load().await.unwrap(), 1);
}

// ── Mutations ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_add_then_reload_contains_new_review() {
    let (server, store) = setup(Reconciliation::FullReload).await;

    let submitted = json!({
        "name": "Sarah Johnson",
        "company": "Tech Innovations",
        "rating": 5,
        "review": "Exceptional service!",
        "status": "pending"
    });
    let mut created = submitted.clone();
    created["id"] = json!(42);

    Mock::given(method("POST"))
        .and(path("/api/admin/reviews/"))
        .and(body_json(&submitted))
        .respond_with(ResponseTemplate::new(201).set_body_json(&created))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/reviews/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([review_json(1, "Old"), created])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let draft = Review {
        name: "Sarah Johnson".into(),
        company: "Tech Innovations".into(),
        rating: 5,
        review: "Exceptional service!".into(),
        status: ReviewStatus::Pending,
        ..Review::default()
    };
    let saved = store.add(&draft, None).await.unwrap();
    assert_eq!(saved.id, EntityId::new(42));

    let matching: Vec<_> = store
        .snapshot()
        .iter()
        .filter(|r| r.name == "Sarah Johnson")
        .cloned()
        .collect();
    assert_eq!(matching.len(), 1);
    assert!(!matching[0].id.is_new());
    assert_eq!(matching[0].company, "Tech Innovations");
    assert_eq!(matching[0].rating, 5);
    assert_eq!(matching[0].status, ReviewStatus::Pending);
}

#[tokio::test]
async fn test_deferred_reconciliation_skips_reload() {
    let (server, store) = setup(Reconciliation::Deferred).await;

    Mock::given(method("DELETE"))
        .and(path("/api/admin/reviews/3/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    store.remove(EntityId::new(3)).await.unwrap();
}

#[tokio::test]
async fn test_failed_mutation_leaves_cache_untouched() {
    let (server, store) = setup(Reconciliation::FullReload).await;

    Mock::given(method("GET"))
        .and(path("/api/admin/reviews/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([review_json(1, "A")])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/admin/reviews/1/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "rating": ["Ensure this value is less than or equal to 5."]
        })))
        .mount(&server)
        .await;

    store.load().await.unwrap();
    let before = store.version();

    let patch = atelier_api::ReviewPatch {
        rating: Some(9),
        ..Default::default()
    };
    let err = store.update(EntityId::new(1), &patch, None).await.unwrap_err();

    assert!(err.field_errors().unwrap().get("rating").is_some());
    assert_eq!(store.version(), before);
    assert_eq!(store.get(EntityId::new(1)).unwrap().rating, 4);
}

#[tokio::test]
async fn test_update_of_missing_record_names_it() {
    let (server, store) = setup(Reconciliation::FullReload).await;

    Mock::given(method("PATCH"))
        .and(path("/api/admin/reviews/77/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = store
        .update(EntityId::new(77), &Default::default(), None)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "review not found: 77");
}

// ── Subscriptions ───────────────────────────────────────────────────

#[tokio::test]
async fn test_subscribers_see_each_load() {
    let (server, store) = setup(Reconciliation::FullReload).await;

    Mock::given(method("GET"))
        .and(path("/api/admin/reviews/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([review_json(5, "E")])))
        .mount(&server)
        .await;

    let mut stream = store.subscribe();
    assert!(stream.current().is_empty());

    store.load().await.unwrap();
    let snap = stream.changed().await.unwrap();
    assert_eq!(snap.len(), 1);
    assert_eq!(stream.latest()[0].name, "E");

    let mut items = store.subscribe().into_stream();
    let first = items.next().await.unwrap();
    assert_eq!(first[0].id, EntityId::new(5));
}
