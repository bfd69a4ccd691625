use crate::client::wire::{
    AddFavoriteRequest, FavoriteAdded, FavoritesResponse, LoginRequest, LoginResponse,
    RemoveFavoriteRequest, SuggestRequest,
};
use crate::{ApiError, ApiResult};

use rb_core::{FavoriteRecipe, RecipeSuggestion, SessionCredential, UserProfile};

use std::time::Duration;

use log::debug;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the recipe service REST API.
///
/// The bearer token is read from the shared [`SessionCredential`] each time a
/// request is built, so a sign-in or sign-out elsewhere takes effect on the
/// next call.
pub struct ApiClient {
    pub base_url: String,
    credential: SessionCredential,
    client: ReqwestClient,
}

impl ApiClient {
    /// Create a new client with the default request timeout
    ///
    /// # Arguments
    /// * `base_url` - Service URL (e.g., "http://localhost:5000")
    /// * `credential` - Shared session credential attached to every request
    pub fn new(base_url: &str, credential: SessionCredential) -> ApiResult<Self> {
        Self::with_timeout(base_url, credential, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a new client with an explicit overall request timeout
    pub fn with_timeout(
        base_url: &str,
        credential: SessionCredential,
        timeout: Duration,
    ) -> ApiResult<Self> {
        let client = ReqwestClient::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credential,
            client,
        })
    }

    /// The credential handle this client reads from
    pub fn credential(&self) -> &SessionCredential {
        &self.credential
    }

    /// Build a request, attaching the bearer token when one is present
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let req = self.client.request(method, &url);

        match self.credential.get() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Send a request and turn non-success statuses into errors
    async fn send(&self, req: RequestBuilder) -> ApiResult<Response> {
        let response = req.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let body: Value = serde_json::from_str(&text).unwrap_or(Value::Null);
        debug!("Request to {} failed with {}", self.base_url, status);

        Err(ApiError::from_status(status.as_u16(), &body))
    }

    /// Execute request and decode the JSON body
    async fn execute<T: DeserializeOwned>(&self, req: RequestBuilder) -> ApiResult<T> {
        let response = self.send(req).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Execute request and discard the body
    async fn execute_unit(&self, req: RequestBuilder) -> ApiResult<()> {
        self.send(req).await.map(|_| ())
    }

    // =========================================================================
    // Session Operations
    // =========================================================================

    /// Readiness probe with its own (short) timeout
    pub async fn ping(&self, timeout: Duration) -> ApiResult<()> {
        let req = self.request(Method::GET, "/ping").timeout(timeout);
        self.execute_unit(req).await
    }

    /// Exchange a third-party identity token for a session
    pub async fn login_google(&self, id_token: &str) -> ApiResult<LoginResponse> {
        let req = self
            .request(Method::POST, "/login/google")
            .json(&LoginRequest { token: id_token });
        self.execute(req).await
    }

    /// Fetch the current profile
    pub async fn me(&self) -> ApiResult<UserProfile> {
        let req = self.request(Method::GET, "/me");
        self.execute(req).await
    }

    /// Record terms acceptance
    pub async fn accept_terms(&self) -> ApiResult<()> {
        let req = self.request(Method::POST, "/accept-terms");
        self.execute_unit(req).await
    }

    /// Invalidate the session server-side
    pub async fn logout(&self) -> ApiResult<()> {
        let req = self.request(Method::POST, "/logout");
        self.execute_unit(req).await
    }

    // =========================================================================
    // Recipe Operations
    // =========================================================================

    /// Ask for a recipe suggestion
    pub async fn suggest_recipe(&self, message: &str) -> ApiResult<RecipeSuggestion> {
        let req = self
            .request(Method::POST, "/suggest_recipe")
            .json(&SuggestRequest { message });
        self.execute(req).await
    }

    /// Clear the conversation history kept by the service
    pub async fn clear_history(&self) -> ApiResult<()> {
        let req = self.request(Method::POST, "/clear_history");
        self.execute_unit(req).await
    }

    // =========================================================================
    // Favorite Operations
    // =========================================================================

    /// List starred recipes
    pub async fn list_favorites(&self) -> ApiResult<Vec<FavoriteRecipe>> {
        let req = self.request(Method::GET, "/favorites");
        let body: FavoritesResponse = self.execute(req).await?;
        Ok(body.favorites)
    }

    /// Star a recipe
    pub async fn add_favorite(&self, recipe: &str, title: &str) -> ApiResult<FavoriteAdded> {
        let req = self
            .request(Method::POST, "/favorites")
            .json(&AddFavoriteRequest { recipe, title });
        self.execute(req).await
    }

    /// Remove a starred recipe
    pub async fn remove_favorite(&self, recipe_id: i64) -> ApiResult<()> {
        let req = self
            .request(Method::DELETE, "/favorites")
            .json(&RemoveFavoriteRequest { recipe_id });
        self.execute_unit(req).await
    }
}
