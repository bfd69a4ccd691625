mod feedback;

use crate::{
    AuthService, CredentialStore, LocalStore, MemoryLocalStore, ReadinessPolicy,
    SessionBootstrap, StoreResult,
};

use rb_api::{ApiError, ApiResult, LoginResponse};
use rb_core::{SessionCredential, UserProfile};

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

pub(crate) const TOKEN_KEY: &str = "auth_token";

pub(crate) fn profile(name: &str) -> UserProfile {
    UserProfile {
        id: Some(format!("id-{name}")),
        email: Some(format!("{}@example.com", name.to_lowercase())),
        name: Some(name.to_string()),
        picture: None,
        terms_accepted: Some(true),
    }
}

pub(crate) fn api_error(status: u16, body: Value) -> ApiError {
    ApiError::from_status(status, &body)
}

/// Outcome of `/me` for the fake service.
#[derive(Clone)]
pub(crate) enum MeReply {
    Profile(UserProfile),
    Status(u16, Value),
}

/// Outcome of `/login/google` for the fake service.
#[derive(Clone)]
pub(crate) enum LoginReply {
    Session {
        token: String,
        user: UserProfile,
        is_new_user: bool,
    },
    Status(u16),
}

/// Scriptable stand-in for the remote service.
pub(crate) struct FakeService {
    /// Number of probes still to fail; `u32::MAX` fails forever
    ping_failures: AtomicU32,
    /// Probes never answer while set
    ping_hangs: AtomicBool,
    ping_times: Mutex<Vec<tokio::time::Instant>>,
    login_reply: Mutex<LoginReply>,
    login_delay: Mutex<Duration>,
    me_reply: Mutex<MeReply>,
    accept_fails: AtomicBool,
    logout_fails: AtomicBool,
    pub login_calls: AtomicU32,
    pub me_calls: AtomicU32,
    pub accept_calls: AtomicU32,
    pub logout_calls: AtomicU32,
}

impl Default for FakeService {
    fn default() -> Self {
        Self {
            ping_failures: AtomicU32::new(0),
            ping_hangs: AtomicBool::new(false),
            ping_times: Mutex::new(Vec::new()),
            login_reply: Mutex::new(LoginReply::Session {
                token: String::from("session-token"),
                user: profile("Ada"),
                is_new_user: false,
            }),
            login_delay: Mutex::new(Duration::ZERO),
            me_reply: Mutex::new(MeReply::Profile(profile("Ada"))),
            accept_fails: AtomicBool::new(false),
            logout_fails: AtomicBool::new(false),
            login_calls: AtomicU32::new(0),
            me_calls: AtomicU32::new(0),
            accept_calls: AtomicU32::new(0),
            logout_calls: AtomicU32::new(0),
        }
    }
}

impl FakeService {
    pub fn fail_pings(&self, count: u32) {
        self.ping_failures.store(count, Ordering::SeqCst);
    }

    pub fn hang_pings(&self, hang: bool) {
        self.ping_hangs.store(hang, Ordering::SeqCst);
    }

    pub fn ping_times(&self) -> Vec<tokio::time::Instant> {
        self.ping_times.lock().unwrap().clone()
    }

    pub fn ping_count(&self) -> usize {
        self.ping_times.lock().unwrap().len()
    }

    pub fn reply_to_login(&self, reply: LoginReply) {
        *self.login_reply.lock().unwrap() = reply;
    }

    pub fn delay_login(&self, delay: Duration) {
        *self.login_delay.lock().unwrap() = delay;
    }

    pub fn reply_to_me(&self, reply: MeReply) {
        *self.me_reply.lock().unwrap() = reply;
    }

    pub fn fail_accept(&self) {
        self.accept_fails.store(true, Ordering::SeqCst);
    }

    pub fn fail_logout(&self) {
        self.logout_fails.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl AuthService for FakeService {
    async fn ping(&self, _timeout: Duration) -> ApiResult<()> {
        self.ping_times
            .lock()
            .unwrap()
            .push(tokio::time::Instant::now());

        if self.ping_hangs.load(Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }

        let remaining = self.ping_failures.load(Ordering::SeqCst);
        if remaining == 0 {
            return Ok(());
        }
        if remaining != u32::MAX {
            self.ping_failures.store(remaining - 1, Ordering::SeqCst);
        }
        Err(api_error(503, json!({"error": "Service Unavailable"})))
    }

    async fn login_google(&self, _id_token: &str) -> ApiResult<LoginResponse> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);

        let delay = *self.login_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let reply = self.login_reply.lock().unwrap().clone();
        match reply {
            LoginReply::Session {
                token,
                user,
                is_new_user,
            } => Ok(LoginResponse {
                user,
                token,
                is_new_user,
            }),
            LoginReply::Status(status) => Err(api_error(status, json!({"error": "Invalid token"}))),
        }
    }

    async fn me(&self) -> ApiResult<UserProfile> {
        self.me_calls.fetch_add(1, Ordering::SeqCst);

        let reply = self.me_reply.lock().unwrap().clone();
        match reply {
            MeReply::Profile(profile) => Ok(profile),
            MeReply::Status(status, body) => Err(api_error(status, body)),
        }
    }

    async fn accept_terms(&self) -> ApiResult<()> {
        self.accept_calls.fetch_add(1, Ordering::SeqCst);
        if self.accept_fails.load(Ordering::SeqCst) {
            return Err(api_error(500, json!({"error": "Internal Server Error"})));
        }
        Ok(())
    }

    async fn logout(&self) -> ApiResult<()> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        if self.logout_fails.load(Ordering::SeqCst) {
            return Err(api_error(502, json!({})));
        }
        Ok(())
    }
}

/// Memory store that counts writes.
#[derive(Default)]
pub(crate) struct CountingStore {
    inner: MemoryLocalStore,
    pub writes: AtomicU32,
}

impl CountingStore {
    pub fn writes(&self) -> u32 {
        self.writes.load(Ordering::SeqCst)
    }
}

impl LocalStore for CountingStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.inner.remove(key)
    }
}

/// Bootstrap wired to a fake service and a counting store.
pub(crate) struct Harness {
    pub service: Arc<FakeService>,
    pub store: Arc<CountingStore>,
    pub credential: SessionCredential,
    pub bootstrap: Arc<SessionBootstrap>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_policy(ReadinessPolicy::default())
    }

    pub fn with_policy(policy: ReadinessPolicy) -> Self {
        let service = Arc::new(FakeService::default());
        let store = Arc::new(CountingStore::default());
        let credential = SessionCredential::new();
        let credentials = CredentialStore::new(store.clone(), TOKEN_KEY);

        let bootstrap = Arc::new(SessionBootstrap::new(
            service.clone(),
            credential.clone(),
            credentials,
            policy,
        ));

        Self {
            service,
            store,
            credential,
            bootstrap,
        }
    }

    pub fn stored_token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).unwrap()
    }

    pub fn store_token(&self, token: &str) {
        self.store.inner.set(TOKEN_KEY, token).unwrap();
    }
}
