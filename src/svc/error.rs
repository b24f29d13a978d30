//! Error taxonomy for command handlers.

use std::fmt;

use crate::engagement::EngagementError;
use crate::leaderboard::LeaderboardError;
use crate::registry::RegistryError;
use crate::toggle::ToggleError;

/// Error type for command handler operations.
///
/// Validation failures are detected before any mutation; duplicate-edge
/// conflicts never reach this layer (the toggle engine downgrades them);
/// upstream failures are surfaced as retryable rather than swallowed.
#[derive(Debug)]
pub enum HandlerError {
    /// No handler registered for this command name.
    UnknownCommand(String),
    /// Payload decode / deserialization failed.
    DecodeFailed(String),
    /// Guard rejected the command (shallow input validation failed).
    GuardRejected(String),
    /// The command requires an authenticated actor and none was supplied.
    Unauthenticated(String),
    /// The `(kind, id)` pair does not resolve to any content.
    InvalidSubject(String),
    /// Requested resource does not exist.
    NotFound(String),
    /// A collaborator lookup failed; the caller may retry.
    Upstream(String),
    /// Engagement storage failure.
    Storage(String),
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerError::UnknownCommand(name) => write!(f, "unknown command: {}", name),
            HandlerError::DecodeFailed(msg) => write!(f, "decode failed: {}", msg),
            HandlerError::GuardRejected(name) => write!(f, "guard rejected command: {}", name),
            HandlerError::Unauthenticated(msg) => write!(f, "unauthenticated: {}", msg),
            HandlerError::InvalidSubject(subject) => write!(f, "invalid subject: {}", subject),
            HandlerError::NotFound(what) => write!(f, "not found: {}", what),
            HandlerError::Upstream(msg) => write!(f, "upstream unavailable: {}", msg),
            HandlerError::Storage(msg) => write!(f, "storage error: {}", msg),
        }
    }
}

impl std::error::Error for HandlerError {}

impl HandlerError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::UnknownCommand(_) => 404,
            HandlerError::DecodeFailed(_) => 400,
            HandlerError::GuardRejected(_) => 400,
            HandlerError::Unauthenticated(_) => 401,
            HandlerError::InvalidSubject(_) => 404,
            HandlerError::NotFound(_) => 404,
            HandlerError::Upstream(_) => 503,
            HandlerError::Storage(_) => 500,
        }
    }

    /// Stable machine-readable kind, carried in the error envelope.
    pub fn error_kind(&self) -> &'static str {
        match self {
            HandlerError::UnknownCommand(_) => "unknown_command",
            HandlerError::DecodeFailed(_) => "decode_failed",
            HandlerError::GuardRejected(_) => "guard_rejected",
            HandlerError::Unauthenticated(_) => "unauthenticated",
            HandlerError::InvalidSubject(_) => "invalid_subject",
            HandlerError::NotFound(_) => "not_found",
            HandlerError::Upstream(_) => "upstream_unavailable",
            HandlerError::Storage(_) => "storage",
        }
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::DecodeFailed(err.to_string())
    }
}

impl From<EngagementError> for HandlerError {
    fn from(err: EngagementError) -> Self {
        HandlerError::Storage(err.to_string())
    }
}

impl From<RegistryError> for HandlerError {
    fn from(err: RegistryError) -> Self {
        HandlerError::Upstream(err.to_string())
    }
}

impl From<ToggleError> for HandlerError {
    fn from(err: ToggleError) -> Self {
        match err {
            ToggleError::InvalidSubject(subject) => {
                HandlerError::InvalidSubject(subject.to_string())
            }
            ToggleError::Engagement(e) => HandlerError::Storage(e.to_string()),
            ToggleError::Upstream(e) => HandlerError::Upstream(e.to_string()),
        }
    }
}

impl From<LeaderboardError> for HandlerError {
    fn from(err: LeaderboardError) -> Self {
        match err {
            LeaderboardError::Engagement(e) => HandlerError::Storage(e.to_string()),
            LeaderboardError::Upstream(e) => HandlerError::Upstream(e.to_string()),
            LeaderboardError::OwnerNotFound(id) => HandlerError::NotFound(id),
        }
    }
}
