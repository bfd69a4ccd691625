use rb_api::{ApiClient, ApiResult, LoginResponse};
use rb_core::UserProfile;

use std::time::Duration;

use async_trait::async_trait;

/// The remote calls the session lifecycle depends on.
///
/// Implementations attach the shared session credential themselves; the
/// bootstrap only decides when the credential changes.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Readiness probe bounded by `timeout`
    async fn ping(&self, timeout: Duration) -> ApiResult<()>;

    /// Exchange a third-party identity token for a session
    async fn login_google(&self, id_token: &str) -> ApiResult<LoginResponse>;

    /// Current profile for the attached credential
    async fn me(&self) -> ApiResult<UserProfile>;

    async fn accept_terms(&self) -> ApiResult<()>;

    async fn logout(&self) -> ApiResult<()>;
}

#[async_trait]
impl AuthService for ApiClient {
    async fn ping(&self, timeout: Duration) -> ApiResult<()> {
        ApiClient::ping(self, timeout).await
    }

    async fn login_google(&self, id_token: &str) -> ApiResult<LoginResponse> {
        ApiClient::login_google(self, id_token).await
    }

    async fn me(&self) -> ApiResult<UserProfile> {
        ApiClient::me(self).await
    }

    async fn accept_terms(&self) -> ApiResult<()> {
        ApiClient::accept_terms(self).await
    }

    async fn logout(&self) -> ApiResult<()> {
        ApiClient::logout(self).await
    }
}
