//! Request and response bodies exchanged with the service.

use rb_core::{FavoriteRecipe, UserProfile};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `POST /login/google` response
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub user: UserProfile,
    pub token: String,
    #[serde(default, rename = "isNewUser", alias = "is_new_user")]
    pub is_new_user: bool,
}

/// `POST /favorites` response
#[derive(Debug, Clone, Deserialize)]
pub struct FavoriteAdded {
    #[serde(default)]
    pub message: Option<String>,
    pub recipe: FavoriteRecipe,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FavoritesResponse {
    #[serde(default)]
    pub favorites: Vec<FavoriteRecipe>,
}

#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub token: &'a str,
}

#[derive(Serialize)]
pub(crate) struct SuggestRequest<'a> {
    pub message: &'a str,
}

#[derive(Serialize)]
pub(crate) struct AddFavoriteRequest<'a> {
    pub recipe: &'a str,
    pub title: &'a str,
}

#[derive(Serialize)]
pub(crate) struct RemoveFavoriteRequest {
    pub recipe_id: i64,
}

/// Fields pulled out of an error body.
#[derive(Debug, Default)]
pub(crate) struct ErrorDetails {
    pub message: Option<String>,
    pub code: Option<String>,
    pub requires_terms: bool,
    pub is_cooking_error: bool,
    pub profile: Option<UserProfile>,
}

/// Read an error body in any of the shapes the service uses:
/// `{"error": "text"}`, `{"error": {"code", "message"}}` or `{"message"}`.
pub(crate) fn error_details(body: &Value) -> ErrorDetails {
    let error = body.get("error");

    let message = match error {
        Some(Value::String(s)) => Some(s.clone()),
        Some(obj @ Value::Object(_)) => obj
            .get("message")
            .and_then(Value::as_str)
            .map(String::from),
        _ => None,
    }
    .or_else(|| body.get("message").and_then(Value::as_str).map(String::from));

    let code = error
        .and_then(|e| e.get("code"))
        .or_else(|| body.get("code"))
        .and_then(Value::as_str)
        .map(String::from);

    let flag = |name: &str| body.get(name).and_then(Value::as_bool).unwrap_or(false);

    let requires_terms = flag("requires_terms")
        || flag("requiresTerms")
        || code.as_deref() == Some("TERMS_REQUIRED");

    let profile = body
        .get("user")
        .and_then(|user| serde_json::from_value(user.clone()).ok());

    ErrorDetails {
        message,
        code,
        requires_terms,
        is_cooking_error: flag("is_cooking_error"),
        profile,
    }
}
