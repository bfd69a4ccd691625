use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A starred recipe stored by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRecipe {
    pub id: i64,
    pub title: String,
    /// Recipe body as returned by the model (HTML fragment)
    pub content: String,
    /// ISO-8601 timestamp as sent by the service
    pub date_added: String,
    #[serde(default)]
    pub starred: bool,
}

impl FavoriteRecipe {
    /// Parse `date_added`, accepting RFC 3339 and naive timestamps.
    pub fn added_at(&self) -> Option<NaiveDateTime> {
        let raw = self.date_added.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.naive_utc());
        }

        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    }

    /// Calendar date for list display, falling back to the raw value.
    pub fn added_date_label(&self) -> String {
        self.added_at()
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| self.date_added.clone())
    }
}
