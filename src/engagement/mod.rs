//! Engagement ledger — the rows the whole engine is built on.
//!
//! Two record types, both owned exclusively by the engagement store:
//!
//! - [`LikeEdge`]: one actor's endorsement of one subject. At most one edge
//!   exists per `(kind, subject, actor)` triple at any time; created and
//!   deleted by the toggle engine, never updated in place.
//! - [`ViewEvent`]: one observation of one subject. Appended once per view,
//!   never deduplicated, never mutated. Anonymous views are allowed.

mod in_memory;
mod store;

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::subject::SubjectRef;

pub use in_memory::InMemoryEngagementStore;
pub use store::EngagementStore;

/// One actor's like of one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeEdge {
    pub subject: SubjectRef,
    pub actor_id: String,
    /// Milliseconds since the Unix epoch.
    pub created_at: u64,
}

/// One observation of one subject. `actor_id` is `None` for anonymous views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewEvent {
    pub subject: SubjectRef,
    pub actor_id: Option<String>,
    /// Milliseconds since the Unix epoch.
    pub created_at: u64,
}

/// Which ledger a ranking query counts over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Likes,
    Views,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Likes => f.write_str("likes"),
            Metric::Views => f.write_str("views"),
        }
    }
}

/// Error type for engagement store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngagementError {
    /// A like edge already exists for this `(kind, subject, actor)` triple.
    /// Callers must treat this as "already liked", not a hard failure.
    DuplicateEdge {
        subject: SubjectRef,
        actor_id: String,
    },
    /// Storage-level error.
    Storage(String),
}

impl fmt::Display for EngagementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngagementError::DuplicateEdge { subject, actor_id } => {
                write!(f, "duplicate like edge: {} by {}", subject, actor_id)
            }
            EngagementError::Storage(msg) => write!(f, "engagement storage error: {}", msg),
        }
    }
}

impl std::error::Error for EngagementError {}

/// Current wall-clock time as milliseconds since the Unix epoch.
pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
