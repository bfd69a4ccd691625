//! Client session lifecycle and local durable state.

mod auth_service;
mod bootstrap;
mod credential_store;
mod error;
mod feedback;
mod local_store;
mod preferences;
mod readiness;
mod session_state;

#[cfg(test)]
mod tests;

pub use auth_service::AuthService;
pub use bootstrap::{EMPTY_ID_TOKEN_MESSAGE, SessionBootstrap};
pub use credential_store::CredentialStore;
pub use error::{Result as SessionResult, SessionError};
pub use feedback::{DEFAULT_NOTICE_DURATION, UserFeedback};
pub use local_store::{
    LocalStore,
    error::{Result as StoreResult, StoreError},
    file_store::FileLocalStore,
    memory_store::MemoryLocalStore,
};
pub use preferences::{Preferences, THEME_KEY};
pub use readiness::{ReadinessPolicy, wait_until_ready};
pub use session_state::SessionState;
