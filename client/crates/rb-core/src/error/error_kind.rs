use serde::Serialize;

/// Classification shared by every error that can reach the user.
///
/// Drives what the front end does with a failure:
/// - `Unauthorized` silently reverts to the signed-out view
/// - `AcceptanceRequired` opens the terms gate
/// - `Transient` and `Validation` show a dismissible notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Credential missing, invalid or expired
    Unauthorized,
    /// Credential valid but the one-time terms step is pending
    AcceptanceRequired,
    /// Network fault, timeout, or server-side failure
    Transient,
    /// Rejected client-side before any network call
    Validation,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::AcceptanceRequired => "acceptance_required",
            Self::Transient => "transient",
            Self::Validation => "validation",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
