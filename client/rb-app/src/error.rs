use rb_api::ApiError;
use rb_config::ConfigError;
use rb_core::{CoreError, ErrorKind};
use rb_session::{SessionError, SessionState, StoreError};

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Session(#[from] SessionError),

    /// A request failed for a reason the user cannot act on
    #[error("{message}: {source} {location}")]
    RequestFailed {
        message: String,
        #[source]
        source: ApiError,
        location: ErrorLocation,
    },

    #[error("Not signed in ({state}) {location}")]
    NotSignedIn {
        state: SessionState,
        location: ErrorLocation,
    },

    #[error("Favorite {id} not found {location}")]
    FavoriteNotFound { id: i64, location: ErrorLocation },

    #[error("Logger error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    #[error("Failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),
}

impl AppError {
    #[track_caller]
    pub fn request_failed(message: impl Into<String>, source: ApiError) -> Self {
        Self::RequestFailed {
            message: message.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Keep failures that change the session typed; replace any other
    /// failure with `message`. A cooking error keeps the service's wording.
    #[track_caller]
    pub fn from_request(source: ApiError, message: &str) -> Self {
        match source.kind() {
            ErrorKind::Transient if !source.is_cooking_error() => {
                Self::request_failed(message, source)
            }
            _ => Self::Session(SessionError::from(source)),
        }
    }

    #[track_caller]
    pub fn not_signed_in(state: SessionState) -> Self {
        Self::NotSignedIn {
            state,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn favorite_not_found(id: i64) -> Self {
        Self::FavoriteNotFound {
            id,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn logger(message: impl Into<String>) -> Self {
        Self::Logger {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Session(e) => e.kind(),
            Self::RequestFailed { .. } => ErrorKind::Transient,
            Self::NotSignedIn { state, .. } if *state == SessionState::AwaitingAcceptance => {
                ErrorKind::AcceptanceRequired
            }
            Self::NotSignedIn { .. } => ErrorKind::Unauthorized,
            Self::Config(_) | Self::FavoriteNotFound { .. } => ErrorKind::Validation,
            Self::Logger { .. } | Self::Output(_) => ErrorKind::Transient,
        }
    }

    /// Message suitable for a user-facing notice.
    pub fn user_message(&self) -> String {
        match self {
            Self::Session(e) => e.user_message(),
            Self::RequestFailed { message, .. } => message.clone(),
            Self::NotSignedIn { .. } => String::from("Please sign in first."),
            Self::FavoriteNotFound { id, .. } => format!("No starred recipe with ID {id}."),
            other => other.to_string(),
        }
    }
}

impl From<ApiError> for AppError {
    #[track_caller]
    fn from(err: ApiError) -> Self {
        Self::Session(SessionError::from(err))
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        Self::Session(SessionError::from(err))
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::Session(SessionError::from(err))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
