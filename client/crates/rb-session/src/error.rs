use crate::{SessionState, StoreError};

use rb_api::ApiError;
use rb_core::{CoreError, ErrorKind};

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Errors surfaced by session operations.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("A sign-in is already in progress {location}")]
    LoginInProgress { location: ErrorLocation },

    #[error("Cannot {operation} while {from} {location}")]
    InvalidTransition {
        from: SessionState,
        operation: &'static str,
        location: ErrorLocation,
    },

    #[error("Sign-in cancelled {location}")]
    Cancelled { location: ErrorLocation },

    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("{source}")]
    Api {
        #[from]
        source: ApiError,
    },

    #[error("{source}")]
    Store {
        #[from]
        source: StoreError,
    },

    #[error("{source}")]
    Core {
        #[from]
        source: CoreError,
    },
}

impl SessionError {
    #[track_caller]
    pub fn login_in_progress() -> Self {
        Self::LoginInProgress {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_transition(from: SessionState, operation: &'static str) -> Self {
        Self::InvalidTransition {
            from,
            operation,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn cancelled() -> Self {
        Self::Cancelled {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Api { source } => source.kind(),
            Self::Core { source } => source.kind(),
            Self::LoginInProgress { .. }
            | Self::InvalidTransition { .. }
            | Self::Validation { .. } => ErrorKind::Validation,
            Self::Cancelled { .. } | Self::Store { .. } => ErrorKind::Transient,
        }
    }

    /// Message suitable for a user-facing notice.
    pub fn user_message(&self) -> String {
        match self {
            Self::LoginInProgress { .. } => String::from("Sign-in is already in progress."),
            Self::InvalidTransition {
                from, operation, ..
            } => format!("Cannot {operation} while {}.", from.as_str().replace('_', " ")),
            Self::Cancelled { .. } => String::from("Sign-in was cancelled."),
            Self::Validation { message, .. } => message.clone(),
            Self::Api { source } => source.user_message(),
            Self::Store { source } => source.recovery_hint().to_string(),
            Self::Core { source } => source.user_message(),
        }
    }

    /// User-friendly recovery hint.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::LoginInProgress { .. } => "Wait for the current sign-in to finish.",
            Self::InvalidTransition { .. } => "Check the session state with `rb whoami`.",
            Self::Cancelled { .. } => "Sign in again when the service is available.",
            Self::Validation { .. } | Self::Core { .. } => "Correct the input and try again.",
            Self::Api { source } => match source.kind() {
                ErrorKind::Unauthorized => "Sign in again.",
                ErrorKind::AcceptanceRequired => "Accept the terms with `rb terms accept`.",
                _ => "Check your connection and try again.",
            },
            Self::Store { source } => source.recovery_hint(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
