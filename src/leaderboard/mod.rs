//! Leaderboards — ranked, owner-resolved views over the engagement ledger.
//!
//! Nothing here owns persistent state: every query is recomputed from the
//! ledger on demand, so there is no counter to keep in sync and no cache to
//! invalidate. The [`Aggregator`] does the ranking and resolution work; the
//! [`LeaderboardService`] narrows it to the fixed query shapes the product
//! actually exposes.

mod aggregate;
mod service;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engagement::EngagementError;
use crate::registry::{ContentRecord, OwnerProfile, RegistryError};
use crate::subject::SubjectRef;

pub use aggregate::Aggregator;
pub use service::LeaderboardService;

/// One entry in a content leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRank {
    pub subject_id: String,
    pub score: u64,
    pub content: ContentRecord,
}

/// One entry in an author leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRank {
    pub owner_id: String,
    pub score: u64,
    pub profile: OwnerProfile,
}

/// One item in an actor's liked list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikedItem {
    pub subject: SubjectRef,
    /// Milliseconds since the Unix epoch.
    pub liked_at: u64,
    pub content: ContentRecord,
}

/// Aggregated engagement across everything one owner owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerEngagement {
    pub owner_id: String,
    pub total_likes: u64,
    pub total_views: u64,
}

/// Error type for aggregation queries.
///
/// An empty leaderboard is not an error; it comes back as `Ok(vec![])`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardError {
    /// Engagement store failure.
    Engagement(EngagementError),
    /// Registry or profile lookup failed. The whole query fails so the
    /// caller can retry; rows are never silently dropped on a transient
    /// lookup failure.
    Upstream(RegistryError),
    /// Owner summary requested for an owner that does not resolve.
    OwnerNotFound(String),
}

impl fmt::Display for LeaderboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaderboardError::Engagement(e) => write!(f, "engagement store error: {}", e),
            LeaderboardError::Upstream(e) => write!(f, "{}", e),
            LeaderboardError::OwnerNotFound(id) => write!(f, "owner not found: {}", id),
        }
    }
}

impl std::error::Error for LeaderboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LeaderboardError::Engagement(e) => Some(e),
            LeaderboardError::Upstream(e) => Some(e),
            LeaderboardError::OwnerNotFound(_) => None,
        }
    }
}

impl From<EngagementError> for LeaderboardError {
    fn from(err: EngagementError) -> Self {
        LeaderboardError::Engagement(err)
    }
}

impl From<RegistryError> for LeaderboardError {
    fn from(err: RegistryError) -> Self {
        LeaderboardError::Upstream(err)
    }
}
