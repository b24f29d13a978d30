//! InMemoryEngagementStore - RwLock-backed ledger for testing and development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::subject::{SubjectKind, SubjectRef};

use super::{now_millis, EngagementError, EngagementStore, LikeEdge, Metric, ViewEvent};

/// Uniqueness scope for like edges. Keying on the kind keeps the four id
/// spaces independent: `("42", actor)` as a book and as a video are two
/// distinct edges.
type LikeKey = (SubjectKind, String, String);

#[derive(Default)]
struct Ledger {
    likes: HashMap<LikeKey, LikeEdge>,
    views: Vec<ViewEvent>,
}

/// In-memory engagement store.
///
/// The like-uniqueness invariant is enforced by the map key under a single
/// write lock, which is the store-level atomic insert the toggle engine
/// relies on. Clone-friendly via Arc: clones share storage.
#[derive(Clone)]
pub struct InMemoryEngagementStore {
    ledger: Arc<RwLock<Ledger>>,
}

impl Default for InMemoryEngagementStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryEngagementStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            ledger: Arc::new(RwLock::new(Ledger::default())),
        }
    }

    fn make_key(subject: &SubjectRef, actor_id: &str) -> LikeKey {
        (subject.kind, subject.id.clone(), actor_id.to_string())
    }
}

impl EngagementStore for InMemoryEngagementStore {
    fn record_like(
        &self,
        subject: &SubjectRef,
        actor_id: &str,
    ) -> Result<LikeEdge, EngagementError> {
        let mut ledger = self
            .ledger
            .write()
            .map_err(|_| EngagementError::Storage("lock poisoned".into()))?;

        let key = Self::make_key(subject, actor_id);
        if ledger.likes.contains_key(&key) {
            tracing::warn!(subject = %subject, actor_id, "duplicate like edge rejected");
            return Err(EngagementError::DuplicateEdge {
                subject: subject.clone(),
                actor_id: actor_id.to_string(),
            });
        }

        let edge = LikeEdge {
            subject: subject.clone(),
            actor_id: actor_id.to_string(),
            created_at: now_millis(),
        };
        ledger.likes.insert(key, edge.clone());
        Ok(edge)
    }

    fn remove_like(&self, subject: &SubjectRef, actor_id: &str) -> Result<bool, EngagementError> {
        let mut ledger = self
            .ledger
            .write()
            .map_err(|_| EngagementError::Storage("lock poisoned".into()))?;

        let key = Self::make_key(subject, actor_id);
        Ok(ledger.likes.remove(&key).is_some())
    }

    fn find_like(
        &self,
        subject: &SubjectRef,
        actor_id: &str,
    ) -> Result<Option<LikeEdge>, EngagementError> {
        let ledger = self
            .ledger
            .read()
            .map_err(|_| EngagementError::Storage("lock poisoned".into()))?;

        let key = Self::make_key(subject, actor_id);
        Ok(ledger.likes.get(&key).cloned())
    }

    fn record_view(
        &self,
        subject: &SubjectRef,
        actor_id: Option<&str>,
    ) -> Result<ViewEvent, EngagementError> {
        let mut ledger = self
            .ledger
            .write()
            .map_err(|_| EngagementError::Storage("lock poisoned".into()))?;

        let view = ViewEvent {
            subject: subject.clone(),
            actor_id: actor_id.map(str::to_string),
            created_at: now_millis(),
        };
        ledger.views.push(view.clone());
        Ok(view)
    }

    fn count_likes(&self, subject: &SubjectRef) -> Result<u64, EngagementError> {
        let ledger = self
            .ledger
            .read()
            .map_err(|_| EngagementError::Storage("lock poisoned".into()))?;

        Ok(ledger
            .likes
            .values()
            .filter(|edge| &edge.subject == subject)
            .count() as u64)
    }

    fn count_views(&self, subject: &SubjectRef) -> Result<u64, EngagementError> {
        let ledger = self
            .ledger
            .read()
            .map_err(|_| EngagementError::Storage("lock poisoned".into()))?;

        Ok(ledger
            .views
            .iter()
            .filter(|view| &view.subject == subject)
            .count() as u64)
    }

    fn subject_counts(
        &self,
        metric: Metric,
        kind: SubjectKind,
    ) -> Result<Vec<(String, u64)>, EngagementError> {
        let ledger = self
            .ledger
            .read()
            .map_err(|_| EngagementError::Storage("lock poisoned".into()))?;

        let mut counts: HashMap<&str, u64> = HashMap::new();
        match metric {
            Metric::Likes => {
                for edge in ledger.likes.values() {
                    if edge.subject.kind == kind {
                        *counts.entry(edge.subject.id.as_str()).or_default() += 1;
                    }
                }
            }
            Metric::Views => {
                for view in &ledger.views {
                    if view.subject.kind == kind {
                        *counts.entry(view.subject.id.as_str()).or_default() += 1;
                    }
                }
            }
        }

        Ok(counts
            .into_iter()
            .map(|(id, count)| (id.to_string(), count))
            .collect())
    }

    fn engagement_subjects(&self, metric: Metric) -> Result<Vec<SubjectRef>, EngagementError> {
        let ledger = self
            .ledger
            .read()
            .map_err(|_| EngagementError::Storage("lock poisoned".into()))?;

        Ok(match metric {
            Metric::Likes => ledger
                .likes
                .values()
                .map(|edge| edge.subject.clone())
                .collect(),
            Metric::Views => ledger
                .views
                .iter()
                .map(|view| view.subject.clone())
                .collect(),
        })
    }

    fn likes_by_actor(&self, actor_id: &str) -> Result<Vec<LikeEdge>, EngagementError> {
        let ledger = self
            .ledger
            .read()
            .map_err(|_| EngagementError::Storage("lock poisoned".into()))?;

        Ok(ledger
            .likes
            .values()
            .filter(|edge| edge.actor_id == actor_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: &str) -> SubjectRef {
        SubjectRef::new(SubjectKind::Book, id)
    }

    #[test]
    fn record_and_find_like() {
        let store = InMemoryEngagementStore::new();
        let edge = store.record_like(&book("b1"), "alice").unwrap();
        assert_eq!(edge.subject, book("b1"));
        assert_eq!(edge.actor_id, "alice");

        let found = store.find_like(&book("b1"), "alice").unwrap().unwrap();
        assert_eq!(found, edge);
    }

    #[test]
    fn duplicate_like_is_rejected() {
        let store = InMemoryEngagementStore::new();
        store.record_like(&book("b1"), "alice").unwrap();

        let err = store.record_like(&book("b1"), "alice").unwrap_err();
        assert!(matches!(err, EngagementError::DuplicateEdge { .. }));
        assert_eq!(store.count_likes(&book("b1")).unwrap(), 1);
    }

    #[test]
    fn uniqueness_is_scoped_per_kind() {
        let store = InMemoryEngagementStore::new();
        store.record_like(&book("42"), "alice").unwrap();
        store
            .record_like(&SubjectRef::new(SubjectKind::Video, "42"), "alice")
            .unwrap();

        assert_eq!(store.count_likes(&book("42")).unwrap(), 1);
        assert_eq!(
            store
                .count_likes(&SubjectRef::new(SubjectKind::Video, "42"))
                .unwrap(),
            1
        );
    }

    #[test]
    fn remove_like_reports_presence() {
        let store = InMemoryEngagementStore::new();
        store.record_like(&book("b1"), "alice").unwrap();

        assert!(store.remove_like(&book("b1"), "alice").unwrap());
        assert!(!store.remove_like(&book("b1"), "alice").unwrap());
        assert_eq!(store.count_likes(&book("b1")).unwrap(), 0);
    }

    #[test]
    fn views_are_never_deduplicated() {
        let store = InMemoryEngagementStore::new();
        store.record_view(&book("b1"), Some("alice")).unwrap();
        store.record_view(&book("b1"), Some("alice")).unwrap();
        store.record_view(&book("b1"), None).unwrap();

        assert_eq!(store.count_views(&book("b1")).unwrap(), 3);
    }

    #[test]
    fn subject_counts_group_by_id_within_kind() {
        let store = InMemoryEngagementStore::new();
        store.record_like(&book("b1"), "alice").unwrap();
        store.record_like(&book("b1"), "bob").unwrap();
        store.record_like(&book("b2"), "alice").unwrap();
        store
            .record_like(&SubjectRef::new(SubjectKind::Tweet, "t1"), "alice")
            .unwrap();

        let mut counts = store.subject_counts(Metric::Likes, SubjectKind::Book).unwrap();
        counts.sort();
        assert_eq!(counts, vec![("b1".to_string(), 2), ("b2".to_string(), 1)]);
    }

    #[test]
    fn engagement_subjects_lists_one_ref_per_row() {
        let store = InMemoryEngagementStore::new();
        store.record_view(&book("b1"), None).unwrap();
        store.record_view(&book("b1"), None).unwrap();

        let subjects = store.engagement_subjects(Metric::Views).unwrap();
        assert_eq!(subjects.len(), 2);
        assert!(subjects.iter().all(|s| s == &book("b1")));
    }

    #[test]
    fn likes_by_actor_filters_on_actor() {
        let store = InMemoryEngagementStore::new();
        store.record_like(&book("b1"), "alice").unwrap();
        store.record_like(&book("b2"), "alice").unwrap();
        store.record_like(&book("b1"), "bob").unwrap();

        let likes = store.likes_by_actor("alice").unwrap();
        assert_eq!(likes.len(), 2);
        assert!(likes.iter().all(|edge| edge.actor_id == "alice"));
    }

    #[test]
    fn clone_shares_storage() {
        let store = InMemoryEngagementStore::new();
        let clone = store.clone();

        store.record_like(&book("b1"), "alice").unwrap();
        assert_eq!(clone.count_likes(&book("b1")).unwrap(), 1);
    }
}
