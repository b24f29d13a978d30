//! EngagementCore - wiring of the store and collaborator seams.
//!
//! Bundles an engagement store, a content registry, and a profile directory,
//! and hands out the engines that borrow them. The bundle is what the
//! command service is generic over, so handlers reach everything through
//! one state value.

use crate::engagement::{EngagementStore, InMemoryEngagementStore};
use crate::leaderboard::{Aggregator, LeaderboardService};
use crate::registry::{
    ContentRegistry, InMemoryContentRegistry, InMemoryProfileDirectory, ProfileDirectory,
};
use crate::toggle::ToggleEngine;

/// The assembled engine: one store, two read-only collaborator lookups.
#[derive(Clone)]
pub struct EngagementCore<S, C, P> {
    store: S,
    registry: C,
    profiles: P,
}

/// Core with all in-memory components, for tests and development.
pub type InMemoryCore =
    EngagementCore<InMemoryEngagementStore, InMemoryContentRegistry, InMemoryProfileDirectory>;

impl EngagementCore<InMemoryEngagementStore, InMemoryContentRegistry, InMemoryProfileDirectory> {
    /// Fully in-memory core.
    pub fn in_memory() -> InMemoryCore {
        EngagementCore::new(
            InMemoryEngagementStore::new(),
            InMemoryContentRegistry::new(),
            InMemoryProfileDirectory::new(),
        )
    }
}

impl<S, C, P> EngagementCore<S, C, P>
where
    S: EngagementStore,
    C: ContentRegistry,
    P: ProfileDirectory,
{
    pub fn new(store: S, registry: C, profiles: P) -> Self {
        Self {
            store,
            registry,
            profiles,
        }
    }

    /// The write-side engine.
    pub fn toggles(&self) -> ToggleEngine<'_, S, C> {
        ToggleEngine::new(&self.store, &self.registry)
    }

    /// The read-side aggregation engine.
    pub fn aggregator(&self) -> Aggregator<'_, S, C, P> {
        Aggregator::new(&self.store, &self.registry, &self.profiles)
    }

    /// The fixed-shape leaderboard façade.
    pub fn leaderboards(&self) -> LeaderboardService<'_, S, C, P> {
        LeaderboardService::new(&self.store, &self.registry, &self.profiles)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn registry(&self) -> &C {
        &self.registry
    }

    pub fn profiles(&self) -> &P {
        &self.profiles
    }
}
