use crate::client::wire::error_details;

use rb_core::{ErrorKind, UserProfile};

use std::panic::Location;

use error_location::ErrorLocation;
use serde_json::Value;
use thiserror::Error;

const STATUS_UNAUTHORIZED: u16 = 401;
const STATUS_FORBIDDEN: u16 = 403;
const STATUS_CONFLICT: u16 = 409;

/// Errors that can occur during API calls
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    #[error("JSON parse error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unauthorized: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    #[error("Terms acceptance required: {message} {location}")]
    AcceptanceRequired {
        message: String,
        /// Profile the service attached to the rejection, if any
        profile: Option<Box<UserProfile>>,
        location: ErrorLocation,
    },

    #[error("Conflict: {message} {location}")]
    Conflict {
        message: String,
        location: ErrorLocation,
    },

    #[error("API error: {message} (status: {status}, code: {code}) {location}")]
    Status {
        status: u16,
        code: String,
        message: String,
        /// The service rejected the prompt as not cooking-related
        is_cooking_error: bool,
        location: ErrorLocation,
    },
}

impl ApiError {
    /// Convert reqwest error with context
    #[track_caller]
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        ApiError::Http {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// Convert JSON error with context
    #[track_caller]
    pub fn from_json(err: serde_json::Error) -> Self {
        ApiError::Json {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// Classify a non-success response.
    ///
    /// 401 is always unauthorized. 403 is acceptance-required only when the
    /// body says so; any other 403 is a plain status error.
    #[track_caller]
    pub fn from_status(status: u16, body: &Value) -> Self {
        let location = ErrorLocation::from(Location::caller());
        let details = error_details(body);
        let message = details
            .message
            .unwrap_or_else(|| format!("HTTP {status}"));

        match status {
            STATUS_UNAUTHORIZED => ApiError::Unauthorized { message, location },
            STATUS_FORBIDDEN if details.requires_terms => ApiError::AcceptanceRequired {
                message,
                profile: details.profile.map(Box::new),
                location,
            },
            STATUS_CONFLICT => ApiError::Conflict { message, location },
            _ => ApiError::Status {
                status,
                code: details.code.unwrap_or_else(|| String::from("UNKNOWN")),
                message,
                is_cooking_error: details.is_cooking_error,
                location,
            },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::AcceptanceRequired { .. } => ErrorKind::AcceptanceRequired,
            Self::Http { .. } | Self::Json { .. } | Self::Conflict { .. } | Self::Status { .. } => {
                ErrorKind::Transient
            }
        }
    }

    pub fn is_cooking_error(&self) -> bool {
        matches!(
            self,
            Self::Status {
                is_cooking_error: true,
                ..
            }
        )
    }

    /// Message suitable for a user-facing notice.
    pub fn user_message(&self) -> String {
        match self {
            Self::Http { source, .. } if source.is_timeout() => {
                String::from("The recipe service did not respond in time.")
            }
            Self::Http { source, .. } if source.is_connect() => {
                String::from("Could not reach the recipe service.")
            }
            Self::Http { message, .. } | Self::Json { message, .. } => {
                format!("Unexpected response from the recipe service: {message}")
            }
            Self::Unauthorized { .. } => String::from("Please sign in again."),
            Self::AcceptanceRequired { .. } => {
                String::from("Please accept the terms and conditions to continue.")
            }
            Self::Conflict { message, .. } | Self::Status { message, .. } => message.clone(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        ApiError::from_reqwest(err)
    }
}

impl From<serde_json::Error> for ApiError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        ApiError::from_json(err)
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
