//! Session lifecycle: restore, sign-in, terms gate and sign-out.

use crate::{
    AuthService, CredentialStore, ReadinessPolicy, SessionError, SessionResult, SessionState,
    UserFeedback, readiness::wait_until_ready,
};

use rb_api::ApiError;
use rb_core::{ErrorKind, SessionCredential, UserProfile};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub const EMPTY_ID_TOKEN_MESSAGE: &str = "An identity token is required to sign in.";

/// Profile data guarded together with the credential.
#[derive(Debug, Default)]
struct SessionData {
    profile: Option<UserProfile>,
    /// Profile held back until the terms are accepted
    pending: Option<UserProfile>,
    /// Bumped whenever a session starts or ends
    epoch: u64,
}

/// State shared with background tasks.
struct Shared {
    data: Mutex<SessionData>,
    state_tx: watch::Sender<SessionState>,
    credential: SessionCredential,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, SessionData> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn state(&self) -> SessionState {
        *self.state_tx.borrow()
    }

    fn set_state(&self, state: SessionState) {
        let previous = self.state_tx.send_replace(state);
        if previous != state {
            debug!("Session state: {previous} -> {state}");
        }
    }

    /// Start a session for `profile`. The credential must already be set.
    fn establish(&self, profile: UserProfile, hold_for_terms: bool) -> SessionState {
        let mut data = self.lock();
        data.epoch = data.epoch.wrapping_add(1);

        let state = if hold_for_terms || profile.terms_pending() {
            data.profile = None;
            data.pending = Some(profile);
            SessionState::AwaitingAcceptance
        } else {
            data.profile = Some(profile);
            data.pending = None;
            SessionState::Authenticated
        };

        self.set_state(state);
        state
    }

    /// Keep the credential but gate on the terms step.
    fn hold_for_terms(&self, pending: Option<UserProfile>) -> SessionState {
        let mut data = self.lock();
        data.epoch = data.epoch.wrapping_add(1);
        data.profile = None;
        data.pending = pending;

        self.set_state(SessionState::AwaitingAcceptance);
        SessionState::AwaitingAcceptance
    }

    /// Drop credential, profile and pending profile in one step.
    fn clear(&self) {
        let mut data = self.lock();
        self.credential.clear();
        data.profile = None;
        data.pending = None;
        data.epoch = data.epoch.wrapping_add(1);

        self.set_state(SessionState::Unauthenticated);
    }

    /// Install a fetched profile unless the session changed meanwhile.
    fn refresh_profile(&self, epoch: u64, profile: UserProfile) {
        let mut data = self.lock();
        if data.epoch != epoch
            || self.state() != SessionState::Authenticated
            || !self.credential.is_present()
        {
            debug!("Discarding profile refresh for an ended session");
            return;
        }
        data.profile = Some(profile);
    }
}

/// Rejects overlapping sign-in sequences for as long as it lives.
struct SignInGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> SignInGuard<'a> {
    #[track_caller]
    fn acquire(flag: &'a AtomicBool) -> SessionResult<Self> {
        if flag
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(SessionError::login_in_progress());
        }
        Ok(Self { flag })
    }
}

impl Drop for SignInGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Owns the client's authentication lifecycle.
///
/// The shared [`SessionCredential`] is the same handle the request-issuing
/// client reads, so every transition here is visible to the next request.
/// State changes are published on a watch channel; a front end renders
/// "please stand by" while [`SessionState::AwaitingBackend`].
pub struct SessionBootstrap {
    service: Arc<dyn AuthService>,
    credentials: CredentialStore,
    policy: ReadinessPolicy,
    shared: Arc<Shared>,
    signing_in: AtomicBool,
    sign_in_cancel: Mutex<Option<CancellationToken>>,
}

impl SessionBootstrap {
    /// Create a bootstrap in the `Unauthenticated` state.
    ///
    /// # Arguments
    /// * `service` - Remote calls, normally the [`rb_api::ApiClient`]
    /// * `credential` - Shared handle the service attaches to requests
    /// * `credentials` - Durable home of the token
    /// * `policy` - Readiness polling timings
    pub fn new(
        service: Arc<dyn AuthService>,
        credential: SessionCredential,
        credentials: CredentialStore,
        policy: ReadinessPolicy,
    ) -> Self {
        let (state_tx, _) = watch::channel(SessionState::Unauthenticated);

        Self {
            service,
            credentials,
            policy,
            shared: Arc::new(Shared {
                data: Mutex::new(SessionData::default()),
                state_tx,
                credential,
            }),
            signing_in: AtomicBool::new(false),
            sign_in_cancel: Mutex::new(None),
        }
    }

    pub fn state(&self) -> SessionState {
        self.shared.state()
    }

    /// Receive every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.shared.state_tx.subscribe()
    }

    /// Active profile; `None` until fully signed in.
    pub fn profile(&self) -> Option<UserProfile> {
        self.shared.lock().profile.clone()
    }

    /// Profile waiting on the terms step.
    pub fn pending_profile(&self) -> Option<UserProfile> {
        self.shared.lock().pending.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    pub fn credential(&self) -> &SessionCredential {
        &self.shared.credential
    }

    // =========================================================================
    // Restore
    // =========================================================================

    /// Resume the session from the stored credential.
    ///
    /// A rejected credential is discarded. Transient failures leave the state
    /// unchanged and keep the credential loaded, so a flaky network does not
    /// destroy a valid session.
    pub async fn restore(&self) -> SessionResult<SessionState> {
        let _guard = SignInGuard::acquire(&self.signing_in)?;

        let current = self.state();
        if current != SessionState::Unauthenticated {
            return Err(SessionError::invalid_transition(current, "restore the session"));
        }

        let Some(token) = self.credentials.load()? else {
            debug!("No stored credential under '{}'", self.credentials.key());
            return Ok(SessionState::Unauthenticated);
        };
        self.shared.credential.set(token);

        match self.service.me().await {
            Ok(profile) => {
                let state = self.shared.establish(profile, false);
                info!("Session restored ({state})");
                Ok(state)
            }
            Err(e) => match e.kind() {
                ErrorKind::Unauthorized => {
                    info!("Stored credential rejected, signing out");
                    self.sign_out_locally()?;
                    Ok(SessionState::Unauthenticated)
                }
                ErrorKind::AcceptanceRequired => {
                    let pending = match e {
                        ApiError::AcceptanceRequired { profile, .. } => profile.map(|p| *p),
                        _ => None,
                    };
                    info!("Session restored, terms acceptance pending");
                    Ok(self.shared.hold_for_terms(pending))
                }
                _ => {
                    warn!("Could not restore session: {e}");
                    Err(e.into())
                }
            },
        }
    }

    // =========================================================================
    // Sign-in
    // =========================================================================

    /// Exchange an identity token for a session.
    ///
    /// Waits for the service to answer its readiness probe first, however
    /// long that takes; only [`cancel`](Self::cancel) ends the wait early.
    /// Any failure returns to `Unauthenticated` with nothing stored.
    pub async fn login(&self, id_token: &str) -> SessionResult<SessionState> {
        if id_token.trim().is_empty() {
            return Err(SessionError::validation(EMPTY_ID_TOKEN_MESSAGE));
        }

        let _guard = SignInGuard::acquire(&self.signing_in)?;

        let current = self.state();
        if current != SessionState::Unauthenticated {
            return Err(SessionError::invalid_transition(current, "sign in"));
        }

        let cancel = self.begin_cancellable();
        let result = self.run_login(id_token, &cancel).await;
        self.end_cancellable();

        if let Err(e) = &result {
            warn!("Sign-in failed: {e}");
            self.shared.set_state(SessionState::Unauthenticated);
        }
        result
    }

    async fn run_login(
        &self,
        id_token: &str,
        cancel: &CancellationToken,
    ) -> SessionResult<SessionState> {
        let shared = &self.shared;
        wait_until_ready(self.service.as_ref(), &self.policy, cancel, |attempts| {
            if attempts == 1 {
                info!("Service is not ready yet, please stand by");
            }
            shared.set_state(SessionState::AwaitingBackend { attempts });
        })
        .await?;

        shared.set_state(SessionState::Authenticating);

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(SessionError::cancelled()),
            result = self.service.login_google(id_token) => result?,
        };

        self.credentials.save(&response.token)?;
        shared.credential.set(response.token);

        let name = response.user.display_name().to_string();
        let state = shared.establish(response.user, response.is_new_user);
        info!("Signed in as {name} ({state})");
        Ok(state)
    }

    /// Stop an in-flight sign-in. Returns false when none is running.
    pub fn cancel(&self) -> bool {
        let token = self
            .sign_in_cancel
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        match token {
            Some(token) => {
                info!("Cancelling sign-in");
                token.cancel();
                true
            }
            None => false,
        }
    }

    fn begin_cancellable(&self) -> CancellationToken {
        let token = CancellationToken::new();
        *self
            .sign_in_cancel
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        token
    }

    fn end_cancellable(&self) {
        self.sign_in_cancel
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    // =========================================================================
    // Terms gate
    // =========================================================================

    /// Accept the terms.
    ///
    /// The pending profile becomes active and the state is `Authenticated`
    /// before the service is told. The notification runs on the returned task
    /// and a failure there is only logged. When no pending profile was known,
    /// the task fetches the profile after the service confirms.
    pub fn accept_terms(&self) -> SessionResult<JoinHandle<()>> {
        let (epoch, had_pending) = {
            let mut data = self.shared.lock();
            let current = self.shared.state();
            if current != SessionState::AwaitingAcceptance {
                return Err(SessionError::invalid_transition(current, "accept the terms"));
            }

            let pending = data.pending.take();
            let had_pending = pending.is_some();
            data.profile = pending;
            self.shared.set_state(SessionState::Authenticated);
            (data.epoch, had_pending)
        };

        let service = Arc::clone(&self.service);
        let shared = Arc::clone(&self.shared);

        Ok(tokio::spawn(async move {
            if let Err(e) = service.accept_terms().await {
                warn!("Terms acceptance was not recorded by the service: {e}");
                return;
            }
            info!("Terms acceptance recorded");

            if had_pending {
                return;
            }
            match service.me().await {
                Ok(profile) => shared.refresh_profile(epoch, profile),
                Err(e) => warn!("Could not load profile after accepting terms: {e}"),
            }
        }))
    }

    /// Decline the terms and drop the session.
    pub async fn decline_terms(&self) -> SessionResult<()> {
        let current = self.state();
        if current != SessionState::AwaitingAcceptance {
            return Err(SessionError::invalid_transition(current, "decline the terms"));
        }

        self.notify_logout().await;
        self.sign_out_locally()?;
        info!("Terms declined, signed out");
        Ok(())
    }

    // =========================================================================
    // Sign-out
    // =========================================================================

    /// Sign out. Local teardown happens even when the service call fails.
    ///
    /// Also valid while `Unauthenticated` if a credential is loaded or stored
    /// but could not be verified, e.g. because the service is unreachable.
    pub async fn logout(&self) -> SessionResult<()> {
        let current = self.state();

        let _guard = match current {
            state if state.has_session() => None,
            SessionState::Unauthenticated => {
                let guard = SignInGuard::acquire(&self.signing_in)?;
                if !self.load_unverified_credential()? {
                    return Err(SessionError::invalid_transition(current, "sign out"));
                }
                Some(guard)
            }
            _ => return Err(SessionError::invalid_transition(current, "sign out")),
        };

        self.notify_logout().await;
        self.sign_out_locally()?;
        info!("Signed out");
        Ok(())
    }

    /// Make sure an unverified credential is loaded so the service call
    /// carries it. False when there is none in memory or in the store.
    fn load_unverified_credential(&self) -> SessionResult<bool> {
        if self.shared.credential.is_present() {
            return Ok(true);
        }

        match self.credentials.load()? {
            Some(token) => {
                self.shared.credential.set(token);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn notify_logout(&self) {
        if let Err(e) = self.service.logout().await {
            warn!("Service sign-out failed, signing out locally anyway: {e}");
        }
    }

    /// Clear memory first, then the stored token.
    fn sign_out_locally(&self) -> SessionResult<()> {
        self.shared.clear();
        self.credentials.clear()?;
        Ok(())
    }

    // =========================================================================
    // Error boundary
    // =========================================================================

    /// Apply the session consequences of a failed call and say what to show.
    ///
    /// An unauthorized failure signs out; acceptance-required moves an active
    /// session back behind the terms gate. Other failures leave the session
    /// untouched.
    pub fn handle_error(&self, error: &SessionError, notice_duration: Duration) -> UserFeedback {
        match error.kind() {
            ErrorKind::Unauthorized => {
                if self.state().has_session() || self.shared.credential.is_present() {
                    info!("Credential rejected, signing out");
                    if let Err(e) = self.sign_out_locally() {
                        warn!("Could not remove stored credential: {e}");
                    }
                }
            }
            ErrorKind::AcceptanceRequired => {
                let mut data = self.shared.lock();
                if self.shared.state() == SessionState::Authenticated {
                    let profile = data.profile.take();
                    data.pending = profile;
                    self.shared.set_state(SessionState::AwaitingAcceptance);
                }
            }
            ErrorKind::Transient | ErrorKind::Validation => {}
        }

        UserFeedback::for_error(error, notice_duration)
    }
}
