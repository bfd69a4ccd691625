use crate::SessionError;

use rb_core::ErrorKind;

use std::time::Duration;

pub const DEFAULT_NOTICE_DURATION: Duration = Duration::from_secs(3);

/// What the front end shows for a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserFeedback {
    /// Dismissible message, hidden after `duration`
    Notice { message: String, duration: Duration },
    /// Back to the signed-out view, no message
    SignedOut,
    /// Open the terms gate
    ShowTerms,
}

impl UserFeedback {
    pub fn notice(message: impl Into<String>, duration: Duration) -> Self {
        Self::Notice {
            message: message.into(),
            duration,
        }
    }

    /// Map an error onto its user-visible behavior.
    pub fn for_error(error: &SessionError, notice_duration: Duration) -> Self {
        match error.kind() {
            ErrorKind::Unauthorized => Self::SignedOut,
            ErrorKind::AcceptanceRequired => Self::ShowTerms,
            ErrorKind::Transient | ErrorKind::Validation => {
                Self::notice(error.user_message(), notice_duration)
            }
        }
    }
}
