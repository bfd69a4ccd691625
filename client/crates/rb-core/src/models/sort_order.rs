use crate::{CoreError, FavoriteRecipe, Result as CoreErrorResult};

use std::cmp::Ordering;
use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Ordering of the favorites list by date added
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Newest first
    #[default]
    Latest,
    /// Oldest first
    Oldest,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Oldest => "oldest",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Latest => "Newest First",
            Self::Oldest => "Oldest First",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Latest => Self::Oldest,
            Self::Oldest => Self::Latest,
        }
    }

    /// Stable sort in place. Entries whose date cannot be parsed go last.
    pub fn sort(&self, favorites: &mut [FavoriteRecipe]) {
        favorites.sort_by(|a, b| match (a.added_at(), b.added_at()) {
            (Some(x), Some(y)) => match self {
                Self::Latest => y.cmp(&x),
                Self::Oldest => x.cmp(&y),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
    }
}

impl FromStr for SortOrder {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        match s.to_lowercase().as_str() {
            "latest" | "newest" => Ok(Self::Latest),
            "oldest" => Ok(Self::Oldest),
            _ => Err(CoreError::InvalidSortOrder {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
