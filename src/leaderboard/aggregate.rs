//! Aggregator - turns raw ledger rows into ranked, owner-resolved summaries.

use std::collections::HashMap;

use crate::engagement::{EngagementStore, Metric};
use crate::registry::{ContentRegistry, ProfileDirectory};
use crate::subject::{SubjectKind, SubjectRef};

use super::{AuthorRank, ContentRank, LeaderboardError, LikedItem, OwnerEngagement};

/// Read-side engine over the ledger, the content registry, and the profile
/// directory. Owns no persistent state; every query recomputes from scratch.
pub struct Aggregator<'a, S, C, P> {
    store: &'a S,
    registry: &'a C,
    profiles: &'a P,
}

impl<'a, S, C, P> Aggregator<'a, S, C, P>
where
    S: EngagementStore,
    C: ContentRegistry,
    P: ProfileDirectory,
{
    pub fn new(store: &'a S, registry: &'a C, profiles: &'a P) -> Self {
        Self {
            store,
            registry,
            profiles,
        }
    }

    /// Rank content of one kind by like or view count.
    ///
    /// Group, sort (descending score, ascending id tiebreak), truncate to
    /// `limit`, then join the registry. Subjects that no longer resolve are
    /// dropped after the cut: content deleted since the engagement was
    /// recorded is data hygiene, not an error, so a board can come back
    /// shorter than `limit`.
    pub fn rank_content(
        &self,
        kind: SubjectKind,
        metric: Metric,
        limit: usize,
    ) -> Result<Vec<ContentRank>, LeaderboardError> {
        let mut counts = self.store.subject_counts(metric, kind)?;
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts.truncate(limit);

        let mut ranked = Vec::with_capacity(counts.len());
        for (subject_id, score) in counts {
            let subject = SubjectRef::new(kind, subject_id.clone());
            if let Some(content) = self.registry.resolve(&subject)? {
                ranked.push(ContentRank {
                    subject_id,
                    score,
                    content,
                });
            }
        }
        Ok(ranked)
    }

    /// Rank authors by engagement aggregated across every kind they own.
    ///
    /// Each row resolves through the single kind it carries; ids are never
    /// probed against other kinds' id spaces. Rows whose subject no longer
    /// resolves are discarded, so an owner with zero resolvable rows never
    /// appears. A failed lookup fails the whole query.
    pub fn rank_authors(
        &self,
        metric: Metric,
        limit: usize,
    ) -> Result<Vec<AuthorRank>, LeaderboardError> {
        let rows = self.store.engagement_subjects(metric)?;

        // Owner resolution memo, local to this query.
        let mut memo: HashMap<SubjectRef, Option<String>> = HashMap::new();
        let mut scores: HashMap<String, u64> = HashMap::new();

        for subject in rows {
            let owner = match memo.get(&subject) {
                Some(cached) => cached.clone(),
                None => {
                    let resolved = self
                        .registry
                        .resolve(&subject)?
                        .map(|record| record.owner_id);
                    memo.insert(subject, resolved.clone());
                    resolved
                }
            };
            if let Some(owner_id) = owner {
                *scores.entry(owner_id).or_default() += 1;
            }
        }

        let mut ranked: Vec<(String, u64)> = scores.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(limit);

        let mut out = Vec::with_capacity(ranked.len());
        for (owner_id, score) in ranked {
            if let Some(profile) = self.profiles.resolve(&owner_id)? {
                out.push(AuthorRank {
                    owner_id,
                    score,
                    profile,
                });
            }
        }
        Ok(out)
    }

    /// Everything one actor currently likes, newest first, enriched with the
    /// content record. Likes of deleted content are dropped.
    pub fn liked_by_actor(
        &self,
        actor_id: &str,
        kind: Option<SubjectKind>,
    ) -> Result<Vec<LikedItem>, LeaderboardError> {
        let mut edges = self.store.likes_by_actor(actor_id)?;
        if let Some(kind) = kind {
            edges.retain(|edge| edge.subject.kind == kind);
        }
        edges.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.subject.id.cmp(&b.subject.id))
        });

        let mut items = Vec::with_capacity(edges.len());
        for edge in edges {
            if let Some(content) = self.registry.resolve(&edge.subject)? {
                items.push(LikedItem {
                    subject: edge.subject,
                    liked_at: edge.created_at,
                    content,
                });
            }
        }
        Ok(items)
    }

    /// Total likes and views across everything `owner_id` owns, summed over
    /// all kinds. Fails with `OwnerNotFound` if the owner does not resolve.
    pub fn owner_engagement(&self, owner_id: &str) -> Result<OwnerEngagement, LeaderboardError> {
        if self.profiles.resolve(owner_id)?.is_none() {
            return Err(LeaderboardError::OwnerNotFound(owner_id.to_string()));
        }

        let mut memo: HashMap<SubjectRef, bool> = HashMap::new();
        let mut totals = OwnerEngagement {
            owner_id: owner_id.to_string(),
            total_likes: 0,
            total_views: 0,
        };

        for metric in [Metric::Likes, Metric::Views] {
            for subject in self.store.engagement_subjects(metric)? {
                let owned = match memo.get(&subject) {
                    Some(&cached) => cached,
                    None => {
                        let owned = self
                            .registry
                            .resolve(&subject)?
                            .is_some_and(|record| record.owner_id == owner_id);
                        memo.insert(subject, owned);
                        owned
                    }
                };
                if owned {
                    match metric {
                        Metric::Likes => totals.total_likes += 1,
                        Metric::Views => totals.total_views += 1,
                    }
                }
            }
        }
        Ok(totals)
    }
}
