//! Lifecycle phases of an orchestrated request.

use std::fmt;

use crate::ErrorKind;

/// Where a request is in its lifecycle.
///
/// ```text
/// Received ──► SessionChecked ──► Authorized ──► Served
///     │               │                │
///     └───────────────┴────────────────┴──► Rejected(kind)
/// ```
///
/// Phases are reported on the request's tracing span; they are not stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    /// The path is being resolved.
    Received,
    /// The type's session requirement is satisfied.
    SessionChecked,
    /// Existence, visibility and the operation's checks all passed.
    Authorized,
    /// The operation completed.
    Served,
    /// The request was rejected with the given kind.
    Rejected(ErrorKind),
}

impl RequestPhase {
    /// Returns `true` for `Served` and `Rejected`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestPhase::Served | RequestPhase::Rejected(_))
    }
}

impl fmt::Display for RequestPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestPhase::Received => write!(f, "received"),
            RequestPhase::SessionChecked => write!(f, "session_checked"),
            RequestPhase::Authorized => write!(f, "authorized"),
            RequestPhase::Served => write!(f, "served"),
            RequestPhase::Rejected(kind) => write!(f, "rejected ({})", kind),
        }
    }
}
