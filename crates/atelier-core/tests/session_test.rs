#![allow(clippy::unwrap_used)]
// Integration tests for `SessionGuard` and forced expiry.

use std::sync::Arc;

use atelier_api::session::StoredSession;
use atelier_api::{ApiClient, FileSessionStore, MemorySessionStore, SessionStore};
use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use atelier_core::{
    Atelier, CoreError, EntityId, Reconciliation, Session, SessionState, User,
};

fn atelier_for(server: &MockServer, session: Session) -> Atelier {
    let client = ApiClient::with_client(
        reqwest::Client::new(),
        Url::parse(&server.uri()).unwrap(),
        Arc::new(session),
    );
    Atelier::with_client(Arc::new(client), Reconciliation::FullReload)
}

fn stored(is_admin: bool) -> StoredSession {
    StoredSession {
        access_token: "access".into(),
        refresh_token: "refresh".into(),
        current_user: User {
            id: EntityId::new(7),
            email: "editor@agency.test".into(),
            username: "editor".into(),
            is_admin,
        },
    }
}

fn password() -> SecretString {
    SecretString::from("hunter2".to_owned())
}

#[tokio::test]
async fn test_login_persists_tokens_and_user() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("session.json");

    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": { "id": 1, "email": "admin@agency.test", "username": "admin", "is_admin": true },
            "tokens": { "access": "acc", "refresh": "ref" }
        })))
        .mount(&server)
        .await;

    let atelier = atelier_for(&server, Session::new(FileSessionStore::new(&file)));
    let user = atelier
        .session()
        .login("admin@agency.test", &password())
        .await
        .unwrap();

    assert!(user.is_admin);
    assert!(atelier.session().is_logged_in());
    assert!(atelier.session().require_admin().is_ok());

    let persisted = FileSessionStore::new(&file).load().unwrap().unwrap();
    assert_eq!(persisted.access_token, "acc");
    assert_eq!(persisted.current_user.email, "admin@agency.test");
}

#[tokio::test]
async fn test_failed_login_stays_anonymous() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "No active account found with the given credentials"
        })))
        .mount(&server)
        .await;

    let atelier = atelier_for(&server, Session::ephemeral());
    let err = atelier
        .session()
        .login("nobody@agency.test", &password())
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::AuthenticationFailed { .. }));
    assert!(!atelier.session().is_logged_in());
    assert_eq!(atelier.session().state(), SessionState::Anonymous);
}

#[tokio::test]
async fn test_logout_clears_even_when_server_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/logout/"))
        .and(body_json(json!({ "refresh_token": "refresh" })))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let atelier = atelier_for(
        &server,
        Session::new(MemorySessionStore::with_session(stored(true))),
    );
    atelier.session().logout().await;

    assert!(!atelier.session().is_logged_in());
    assert!(atelier.session().current_user().is_none());
}

#[tokio::test]
async fn test_refresh_rotates_then_failure_clears() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access": "fresh" })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Token is blacklisted"
        })))
        .mount(&server)
        .await;

    let atelier = atelier_for(
        &server,
        Session::new(MemorySessionStore::with_session(stored(true))),
    );

    atelier.session().refresh().await.unwrap();
    assert_eq!(
        secrecy::ExposeSecret::expose_secret(&atelier.client().session().access_token().unwrap()),
        "fresh"
    );

    let err = atelier.session().refresh().await.unwrap_err();
    assert!(matches!(err, CoreError::SessionExpired));
    assert!(!atelier.session().is_logged_in());
}

#[tokio::test]
async fn test_non_admin_is_refused() {
    let server = MockServer::start().await;
    let atelier = atelier_for(
        &server,
        Session::new(MemorySessionStore::with_session(stored(false))),
    );

    assert!(atelier.session().is_logged_in());
    assert!(!atelier.session().is_admin());
    assert!(matches!(
        atelier.session().require_admin(),
        Err(CoreError::PermissionDenied { .. })
    ));
}

#[tokio::test]
async fn test_unauthorized_response_forces_logout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/reviews/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let atelier = atelier_for(
        &server,
        Session::new(MemorySessionStore::with_session(stored(true))),
    );
    let mut state = atelier.session().subscribe();

    let err = atelier.reviews().load().await.unwrap_err();
    assert!(err.requires_login());

    state.changed().await.unwrap();
    assert_eq!(*state.borrow(), SessionState::Expired);
    assert!(!atelier.session().is_logged_in());
    assert!(atelier.reviews().store().load_error().is_some());

    let _ = atelier.reviews().load().await;
    let requests = server.received_requests().await.unwrap();
    assert!(requests.last().unwrap().headers.get("authorization").is_none());
}
