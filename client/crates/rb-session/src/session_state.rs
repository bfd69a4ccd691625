/// Where the client is in the authentication lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session; sign-in is possible
    Unauthenticated,
    /// Sign-in is waiting for the service to answer its readiness probe
    AwaitingBackend { attempts: u32 },
    /// Identity token submitted, waiting for the session
    Authenticating,
    /// Session exists but the terms step is pending
    AwaitingAcceptance,
    /// Fully signed in
    Authenticated,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::AwaitingBackend { .. } => "awaiting_backend",
            Self::Authenticating => "authenticating",
            Self::AwaitingAcceptance => "awaiting_acceptance",
            Self::Authenticated => "authenticated",
        }
    }

    /// A session credential belongs to this state.
    pub fn has_session(&self) -> bool {
        matches!(self, Self::AwaitingAcceptance | Self::Authenticated)
    }

    /// Sign-in is in flight.
    pub fn is_signing_in(&self) -> bool {
        matches!(self, Self::AwaitingBackend { .. } | Self::Authenticating)
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AwaitingBackend { attempts } => {
                write!(f, "{} (attempt {})", self.as_str(), attempts)
            }
            _ => write!(f, "{}", self.as_str()),
        }
    }
}
