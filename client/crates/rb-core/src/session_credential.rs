//! Process-wide bearer credential shared by every request-issuing collaborator.

use std::sync::{Arc, PoisonError, RwLock};

/// Shared handle to the current session token.
///
/// Cloning the handle shares the slot. Requests read the token at call time,
/// so a request racing a sign-out may still carry the old value.
#[derive(Clone, Default)]
pub struct SessionCredential {
    token: Arc<RwLock<Option<String>>>,
}

impl SessionCredential {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current token, if any.
    pub fn get(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the token.
    pub fn set(&self, token: impl Into<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.into());
    }

    /// Remove the token, returning the previous value.
    pub fn clear(&self) -> Option<String> {
        self.token
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    pub fn is_present(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl std::fmt::Debug for SessionCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = if self.is_present() { "<redacted>" } else { "<none>" };
        f.debug_struct("SessionCredential")
            .field("token", &state)
            .finish()
    }
}
