//! EngagementStore - Abstract storage for the engagement ledger.

use crate::subject::{SubjectKind, SubjectRef};

use super::{EngagementError, LikeEdge, Metric, ViewEvent};

/// Abstract storage for like edges and view events.
///
/// The store is the only shared mutable resource in the engine: all
/// coordination happens through its guarantees (atomic insert honoring the
/// per-kind like-uniqueness constraint, atomic delete). Implementations must
/// be safe to share across concurrent request tasks.
pub trait EngagementStore: Send + Sync {
    /// Insert a like edge. Fails with `DuplicateEdge` if one already exists
    /// for the `(kind, subject, actor)` triple.
    fn record_like(&self, subject: &SubjectRef, actor_id: &str)
        -> Result<LikeEdge, EngagementError>;

    /// Delete the matching edge if present. Returns whether a row was removed.
    fn remove_like(&self, subject: &SubjectRef, actor_id: &str)
        -> Result<bool, EngagementError>;

    /// Get the edge for a triple, if any.
    fn find_like(
        &self,
        subject: &SubjectRef,
        actor_id: &str,
    ) -> Result<Option<LikeEdge>, EngagementError>;

    /// Append a view event. Never fails on repeats; `actor_id` may be absent.
    fn record_view(
        &self,
        subject: &SubjectRef,
        actor_id: Option<&str>,
    ) -> Result<ViewEvent, EngagementError>;

    /// Point count of likes for one subject.
    fn count_likes(&self, subject: &SubjectRef) -> Result<u64, EngagementError>;

    /// Point count of views for one subject.
    fn count_views(&self, subject: &SubjectRef) -> Result<u64, EngagementError>;

    /// Grouped row counts per subject id, restricted to one kind.
    ///
    /// No ordering guarantee; ranking is the aggregation engine's job.
    fn subject_counts(
        &self,
        metric: Metric,
        kind: SubjectKind,
    ) -> Result<Vec<(String, u64)>, EngagementError>;

    /// One tagged subject ref per row in the given ledger, across all kinds.
    /// Used for owner-level aggregation.
    fn engagement_subjects(&self, metric: Metric) -> Result<Vec<SubjectRef>, EngagementError>;

    /// All like edges created by one actor.
    fn likes_by_actor(&self, actor_id: &str) -> Result<Vec<LikeEdge>, EngagementError>;
}
