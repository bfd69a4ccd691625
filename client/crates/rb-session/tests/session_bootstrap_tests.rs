//! End-to-end session tests: real API client and file store against a
//! wiremock server.

use rb_api::ApiClient;
use rb_core::SessionCredential;
use rb_session::{
    CredentialStore, FileLocalStore, LocalStore, ReadinessPolicy, SessionBootstrap, SessionState,
};

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tempfile::TempDir;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

const TOKEN_KEY: &str = "auth_token";

struct Setup {
    _dir: TempDir,
    store: Arc<FileLocalStore>,
    credential: SessionCredential,
    bootstrap: SessionBootstrap,
}

fn setup(server: &MockServer) -> Setup {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(FileLocalStore::open(dir.path().join("local_store.json")).unwrap());
    let credential = SessionCredential::new();
    let client = ApiClient::new(&server.uri(), credential.clone()).unwrap();
    let policy = ReadinessPolicy::fixed(Duration::from_millis(500), Duration::from_millis(50));

    let bootstrap = SessionBootstrap::new(
        Arc::new(client),
        credential.clone(),
        CredentialStore::new(store.clone(), TOKEN_KEY),
        policy,
    );

    Setup {
        _dir: dir,
        store,
        credential,
        bootstrap,
    }
}

async fn mount_ping_failing_then_ready(server: &MockServer, failures: u64) {
    if failures > 0 {
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(failures)
            .expect(failures)
            .mount(server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

#[tokio::test]
async fn given_cold_service_when_login_then_signed_in_and_token_persisted() {
    let server = MockServer::start().await;
    mount_ping_failing_then_ready(&server, 2).await;

    Mock::given(method("POST"))
        .and(path("/login/google"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": 1, "name": "Ada", "email": "ada@example.com", "terms_accepted": true},
            "token": "session-123",
            "isNewUser": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let s = setup(&server);

    let state = s.bootstrap.login("google-id-token").await.unwrap();

    assert_eq!(state, SessionState::Authenticated);
    assert_eq!(s.credential.get().as_deref(), Some("session-123"));
    assert_eq!(
        s.store.get(TOKEN_KEY).unwrap().as_deref(),
        Some("session-123")
    );
    assert_eq!(
        s.bootstrap.profile().and_then(|p| p.name).as_deref(),
        Some("Ada")
    );
}

#[tokio::test]
async fn given_stored_token_when_restore_then_bearer_sent_and_authenticated() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("authorization", "Bearer stored-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "42",
            "name": "Grace",
            "terms_accepted": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let s = setup(&server);
    s.store.set(TOKEN_KEY, "stored-token").unwrap();

    let state = s.bootstrap.restore().await.unwrap();

    assert_eq!(state, SessionState::Authenticated);
    assert!(s.bootstrap.is_authenticated());
}

#[tokio::test]
async fn given_expired_token_when_restore_then_file_no_longer_holds_it() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "Token expired"
        })))
        .mount(&server)
        .await;

    let s = setup(&server);
    s.store.set(TOKEN_KEY, "expired-token").unwrap();

    let state = s.bootstrap.restore().await.unwrap();

    assert_eq!(state, SessionState::Unauthenticated);
    assert_eq!(s.store.get(TOKEN_KEY).unwrap(), None);

    let reopened = FileLocalStore::open(s.store.path()).unwrap();
    assert_eq!(reopened.get(TOKEN_KEY).unwrap(), None);
}

#[tokio::test]
async fn given_new_user_when_accept_terms_then_service_notified_with_bearer() {
    let server = MockServer::start().await;
    mount_ping_failing_then_ready(&server, 0).await;

    Mock::given(method("POST"))
        .and(path("/login/google"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"name": "Grace"},
            "token": "fresh-token",
            "isNewUser": true
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/accept-terms"))
        .and(header("authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Terms accepted"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let s = setup(&server);

    let state = s.bootstrap.login("google-id-token").await.unwrap();
    assert_eq!(state, SessionState::AwaitingAcceptance);

    s.bootstrap.accept_terms().unwrap().await.unwrap();

    assert!(s.bootstrap.is_authenticated());
    assert_eq!(
        s.bootstrap.profile().and_then(|p| p.name).as_deref(),
        Some("Grace")
    );
}

#[tokio::test]
async fn given_logout_endpoint_down_when_logout_then_signed_out_locally() {
    let server = MockServer::start().await;
    mount_ping_failing_then_ready(&server, 0).await;

    Mock::given(method("POST"))
        .and(path("/login/google"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"name": "Ada", "terms_accepted": true},
            "token": "session-123",
            "isNewUser": false
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let s = setup(&server);
    s.bootstrap.login("google-id-token").await.unwrap();

    s.bootstrap.logout().await.unwrap();

    assert_eq!(s.bootstrap.state(), SessionState::Unauthenticated);
    assert_eq!(s.credential.get(), None);
    assert_eq!(s.store.get(TOKEN_KEY).unwrap(), None);
}
