pub mod error_kind;

// -------------------------------------------------------------------------- //

use crate::ErrorKind;

use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid sort order: {value} {location}")]
    InvalidSortOrder {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid theme: {value} {location}")]
    InvalidTheme {
        value: String,
        location: ErrorLocation,
    },
}

impl CoreError {
    /// Create a validation error at the caller location
    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Every core error is a client-side validation failure.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }

    /// Message suitable for a user-facing notice.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::InvalidSortOrder { value, .. } => {
                format!("Unknown sort order '{value}', expected 'latest' or 'oldest'")
            }
            Self::InvalidTheme { value, .. } => {
                format!("Unknown theme '{value}', expected 'light' or 'dark'")
            }
        }
    }
}

pub type Result<T> = StdResult<T, CoreError>;
