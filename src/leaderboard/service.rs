//! LeaderboardService - the fixed query shapes exposed to callers.
//!
//! Deliberately thin: its value is bounding worst-case aggregation cost by
//! offering a small, pre-approved set of shapes instead of an open-ended
//! query language. All the work happens in the [`Aggregator`].

use crate::engagement::{EngagementStore, Metric};
use crate::registry::{ContentRegistry, ProfileDirectory};
use crate::subject::SubjectKind;

use super::{Aggregator, AuthorRank, ContentRank, LeaderboardError};

/// The two limits the current product surface uses. The engine itself
/// accepts any limit; these are the shapes the routes pin down.
pub const TOP_TEN: usize = 10;
pub const TOP_HUNDRED: usize = 100;

/// Façade over the aggregator fixing the supported query shapes.
pub struct LeaderboardService<'a, S, C, P> {
    agg: Aggregator<'a, S, C, P>,
}

impl<'a, S, C, P> LeaderboardService<'a, S, C, P>
where
    S: EngagementStore,
    C: ContentRegistry,
    P: ProfileDirectory,
{
    pub fn new(store: &'a S, registry: &'a C, profiles: &'a P) -> Self {
        Self {
            agg: Aggregator::new(store, registry, profiles),
        }
    }

    /// Content board with an arbitrary limit.
    pub fn content(
        &self,
        kind: SubjectKind,
        metric: Metric,
        limit: usize,
    ) -> Result<Vec<ContentRank>, LeaderboardError> {
        self.agg.rank_content(kind, metric, limit)
    }

    /// Author board with an arbitrary limit.
    pub fn authors(
        &self,
        metric: Metric,
        limit: usize,
    ) -> Result<Vec<AuthorRank>, LeaderboardError> {
        self.agg.rank_authors(metric, limit)
    }

    pub fn top_ten_liked(&self, kind: SubjectKind) -> Result<Vec<ContentRank>, LeaderboardError> {
        self.content(kind, Metric::Likes, TOP_TEN)
    }

    pub fn top_hundred_liked(
        &self,
        kind: SubjectKind,
    ) -> Result<Vec<ContentRank>, LeaderboardError> {
        self.content(kind, Metric::Likes, TOP_HUNDRED)
    }

    pub fn top_ten_viewed(&self, kind: SubjectKind) -> Result<Vec<ContentRank>, LeaderboardError> {
        self.content(kind, Metric::Views, TOP_TEN)
    }

    pub fn top_hundred_viewed(
        &self,
        kind: SubjectKind,
    ) -> Result<Vec<ContentRank>, LeaderboardError> {
        self.content(kind, Metric::Views, TOP_HUNDRED)
    }

    pub fn top_ten_liked_authors(&self) -> Result<Vec<AuthorRank>, LeaderboardError> {
        self.authors(Metric::Likes, TOP_TEN)
    }

    pub fn top_ten_viewed_authors(&self) -> Result<Vec<AuthorRank>, LeaderboardError> {
        self.authors(Metric::Views, TOP_TEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engagement::{EngagementStore, InMemoryEngagementStore};
    use crate::registry::{
        ContentRecord, InMemoryContentRegistry, InMemoryProfileDirectory, OwnerProfile,
    };
    use crate::subject::SubjectRef;

    #[test]
    fn fixed_shapes_delegate_with_their_limits() {
        let store = InMemoryEngagementStore::new();
        let registry = InMemoryContentRegistry::new();
        let profiles = InMemoryProfileDirectory::new();
        profiles.put(OwnerProfile {
            owner_id: "o1".into(),
            display_name: "Olive".into(),
            handle: "olive".into(),
            avatar: "a.png".into(),
        });

        // Twelve books with one like each: top-ten cuts, top-hundred doesn't.
        for i in 0..12 {
            let subject = SubjectRef::new(SubjectKind::Book, format!("b{:02}", i));
            registry.put(ContentRecord {
                subject: subject.clone(),
                owner_id: "o1".into(),
                title: format!("book {}", i),
            });
            store.record_like(&subject, "alice").unwrap();
        }

        let service = LeaderboardService::new(&store, &registry, &profiles);
        assert_eq!(service.top_ten_liked(SubjectKind::Book).unwrap().len(), 10);
        assert_eq!(
            service.top_hundred_liked(SubjectKind::Book).unwrap().len(),
            12
        );
        assert!(service.top_ten_viewed(SubjectKind::Book).unwrap().is_empty());

        let authors = service.top_ten_liked_authors().unwrap();
        assert_eq!(authors.len(), 1);
        assert_eq!(authors[0].score, 12);
    }
}
