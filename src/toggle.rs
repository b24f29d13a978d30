//! ToggleEngine - idempotent like/unlike semantics over the engagement store.
//!
//! One two-state machine per `(kind, subject, actor)` triple: `Liked` and
//! `NotLiked`, initial state `NotLiked`. A toggle reads the current state and
//! applies the opposite action. The read-then-act sequence is deliberately
//! not atomic; the store's uniqueness constraint is the authoritative guard,
//! and a lost insert race surfaces as `DuplicateEdge`, which is reinterpreted
//! here as "already liked" rather than propagated.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engagement::{EngagementError, EngagementStore, LikeEdge, ViewEvent};
use crate::registry::{ContentRegistry, RegistryError};
use crate::subject::SubjectRef;

/// The like state of one `(subject, actor)` pair after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LikeState {
    Liked,
    NotLiked,
}

/// Result of a toggle: the new state, and the edge if one now exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleOutcome {
    pub state: LikeState,
    pub edge: Option<LikeEdge>,
}

/// Error type for write-side engagement operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleError {
    /// The `(kind, id)` pair does not resolve in the content registry.
    /// Detected before any mutation; no dangling edges are ever created.
    InvalidSubject(SubjectRef),
    /// Engagement store failure.
    Engagement(EngagementError),
    /// Content registry failure.
    Upstream(RegistryError),
}

impl fmt::Display for ToggleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToggleError::InvalidSubject(subject) => {
                write!(f, "invalid subject: {}", subject)
            }
            ToggleError::Engagement(e) => write!(f, "engagement store error: {}", e),
            ToggleError::Upstream(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ToggleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ToggleError::Engagement(e) => Some(e),
            ToggleError::Upstream(e) => Some(e),
            ToggleError::InvalidSubject(_) => None,
        }
    }
}

impl From<EngagementError> for ToggleError {
    fn from(err: EngagementError) -> Self {
        ToggleError::Engagement(err)
    }
}

impl From<RegistryError> for ToggleError {
    fn from(err: RegistryError) -> Self {
        ToggleError::Upstream(err)
    }
}

/// Write-side engine: like toggles and view recording.
///
/// Borrows the store and registry; holds no state and no locks of its own.
pub struct ToggleEngine<'a, S, C> {
    store: &'a S,
    registry: &'a C,
}

impl<'a, S: EngagementStore, C: ContentRegistry> ToggleEngine<'a, S, C> {
    pub fn new(store: &'a S, registry: &'a C) -> Self {
        Self { store, registry }
    }

    /// Flip the like state for `(subject, actor)`.
    ///
    /// The same machine serves every kind; the only kind-specific input is
    /// the tag carried inside `subject`.
    pub fn toggle_like(
        &self,
        subject: &SubjectRef,
        actor_id: &str,
    ) -> Result<ToggleOutcome, ToggleError> {
        if self.registry.resolve(subject)?.is_none() {
            return Err(ToggleError::InvalidSubject(subject.clone()));
        }

        if self.store.find_like(subject, actor_id)?.is_some() {
            // Liked → NotLiked. A concurrent removal makes this delete a
            // no-op; the resulting state is NotLiked either way.
            self.store.remove_like(subject, actor_id)?;
            tracing::debug!(subject = %subject, actor_id, "like removed");
            return Ok(ToggleOutcome {
                state: LikeState::NotLiked,
                edge: None,
            });
        }

        match self.store.record_like(subject, actor_id) {
            Ok(edge) => {
                tracing::debug!(subject = %subject, actor_id, "like recorded");
                Ok(ToggleOutcome {
                    state: LikeState::Liked,
                    edge: Some(edge),
                })
            }
            Err(EngagementError::DuplicateEdge { .. }) => {
                // Lost the insert race to a concurrent toggle for the same
                // triple: the triple is already liked, which is what this
                // call was trying to achieve.
                tracing::debug!(subject = %subject, actor_id, "duplicate edge, already liked");
                let edge = self.store.find_like(subject, actor_id)?;
                Ok(ToggleOutcome {
                    state: LikeState::Liked,
                    edge,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Append one view of `subject`, anonymously or as `actor_id`.
    ///
    /// Repeat views all count; there is no deduplication.
    pub fn record_view(
        &self,
        subject: &SubjectRef,
        actor_id: Option<&str>,
    ) -> Result<ViewEvent, ToggleError> {
        if self.registry.resolve(subject)?.is_none() {
            return Err(ToggleError::InvalidSubject(subject.clone()));
        }
        Ok(self.store.record_view(subject, actor_id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engagement::InMemoryEngagementStore;
    use crate::registry::{ContentRecord, InMemoryContentRegistry};
    use crate::subject::SubjectKind;

    fn seeded() -> (InMemoryEngagementStore, InMemoryContentRegistry) {
        let store = InMemoryEngagementStore::new();
        let registry = InMemoryContentRegistry::new();
        registry.put(ContentRecord {
            subject: SubjectRef::new(SubjectKind::Book, "b1"),
            owner_id: "o1".into(),
            title: "book b1".into(),
        });
        (store, registry)
    }

    #[test]
    fn toggle_flips_state_both_ways() {
        let (store, registry) = seeded();
        let engine = ToggleEngine::new(&store, &registry);
        let subject = SubjectRef::new(SubjectKind::Book, "b1");

        let first = engine.toggle_like(&subject, "alice").unwrap();
        assert_eq!(first.state, LikeState::Liked);
        assert!(first.edge.is_some());
        assert_eq!(store.count_likes(&subject).unwrap(), 1);

        let second = engine.toggle_like(&subject, "alice").unwrap();
        assert_eq!(second.state, LikeState::NotLiked);
        assert!(second.edge.is_none());
        assert_eq!(store.count_likes(&subject).unwrap(), 0);
    }

    #[test]
    fn unresolvable_subject_is_rejected_without_mutation() {
        let (store, registry) = seeded();
        let engine = ToggleEngine::new(&store, &registry);
        let ghost = SubjectRef::new(SubjectKind::Video, "nope");

        let err = engine.toggle_like(&ghost, "alice").unwrap_err();
        assert!(matches!(err, ToggleError::InvalidSubject(_)));
        assert_eq!(store.count_likes(&ghost).unwrap(), 0);

        let err = engine.record_view(&ghost, None).unwrap_err();
        assert!(matches!(err, ToggleError::InvalidSubject(_)));
        assert_eq!(store.count_views(&ghost).unwrap(), 0);
    }

    /// Store wrapper whose reads miss the edge, forcing the toggle down the
    /// record_like path against a triple that is already liked. This is the
    /// window between a toggle's read and its insert.
    struct StaleReadStore(InMemoryEngagementStore);

    impl EngagementStore for StaleReadStore {
        fn record_like(
            &self,
            subject: &SubjectRef,
            actor_id: &str,
        ) -> Result<LikeEdge, EngagementError> {
            self.0.record_like(subject, actor_id)
        }
        fn remove_like(
            &self,
            subject: &SubjectRef,
            actor_id: &str,
        ) -> Result<bool, EngagementError> {
            self.0.remove_like(subject, actor_id)
        }
        fn find_like(
            &self,
            _subject: &SubjectRef,
            _actor_id: &str,
        ) -> Result<Option<LikeEdge>, EngagementError> {
            Ok(None)
        }
        fn record_view(
            &self,
            subject: &SubjectRef,
            actor_id: Option<&str>,
        ) -> Result<crate::engagement::ViewEvent, EngagementError> {
            self.0.record_view(subject, actor_id)
        }
        fn count_likes(&self, subject: &SubjectRef) -> Result<u64, EngagementError> {
            self.0.count_likes(subject)
        }
        fn count_views(&self, subject: &SubjectRef) -> Result<u64, EngagementError> {
            self.0.count_views(subject)
        }
        fn subject_counts(
            &self,
            metric: crate::engagement::Metric,
            kind: SubjectKind,
        ) -> Result<Vec<(String, u64)>, EngagementError> {
            self.0.subject_counts(metric, kind)
        }
        fn engagement_subjects(
            &self,
            metric: crate::engagement::Metric,
        ) -> Result<Vec<SubjectRef>, EngagementError> {
            self.0.engagement_subjects(metric)
        }
        fn likes_by_actor(&self, actor_id: &str) -> Result<Vec<LikeEdge>, EngagementError> {
            self.0.likes_by_actor(actor_id)
        }
    }

    #[test]
    fn lost_insert_race_reads_as_already_liked() {
        let (inner, registry) = seeded();
        let subject = SubjectRef::new(SubjectKind::Book, "b1");
        inner.record_like(&subject, "alice").unwrap();

        let store = StaleReadStore(inner);
        let engine = ToggleEngine::new(&store, &registry);

        // The stale read misses the edge, the insert hits the uniqueness
        // constraint, and the engine downgrades the conflict to a no-op.
        let outcome = engine.toggle_like(&subject, "alice").unwrap();
        assert_eq!(outcome.state, LikeState::Liked);
        assert_eq!(store.count_likes(&subject).unwrap(), 1);
    }

    #[test]
    fn self_like_is_permitted() {
        let (store, registry) = seeded();
        let engine = ToggleEngine::new(&store, &registry);
        let subject = SubjectRef::new(SubjectKind::Book, "b1");

        // "o1" owns b1 and likes their own book; no exclusion rule applies.
        let outcome = engine.toggle_like(&subject, "o1").unwrap();
        assert_eq!(outcome.state, LikeState::Liked);
        assert_eq!(store.count_likes(&subject).unwrap(), 1);
    }

    #[test]
    fn anonymous_and_named_views_both_count() {
        let (store, registry) = seeded();
        let engine = ToggleEngine::new(&store, &registry);
        let subject = SubjectRef::new(SubjectKind::Book, "b1");

        engine.record_view(&subject, Some("alice")).unwrap();
        engine.record_view(&subject, None).unwrap();
        engine.record_view(&subject, Some("alice")).unwrap();

        assert_eq!(store.count_views(&subject).unwrap(), 3);
    }
}
