//! Profile snapshot returned by the recipe service.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

const DEFAULT_DISPLAY_NAME: &str = "Chef";

/// Read-only view of the signed-in user.
///
/// Held in memory only and replaced wholesale on every fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    /// Service-side identifier; the service sends either a string or a number
    #[serde(default, deserialize_with = "deserialize_id", alias = "google_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Avatar URL
    #[serde(default)]
    pub picture: Option<String>,
    /// `None` when the service does not report the flag
    #[serde(default, alias = "termsAccepted")]
    pub terms_accepted: Option<bool>,
}

impl UserProfile {
    /// Display name with the same fallback the dashboard greeting uses.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => DEFAULT_DISPLAY_NAME,
        }
    }

    /// True only when the service explicitly reports terms as not accepted.
    pub fn terms_pending(&self) -> bool {
        self.terms_accepted == Some(false)
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
