//! tallyboard — polymorphic engagement ledger and leaderboard engine.
//!
//! Records like and view events against heterogeneous content kinds (videos,
//! tweets, books, comments), guarantees at most one active like per
//! `(actor, subject)`, and computes ranked leaderboards on demand: top
//! content of a kind by likes or views, and top authors by engagement
//! aggregated across everything they own.
//!
//! The engine owns only the ledger. Content and user profiles live behind
//! the [`registry::ContentRegistry`] and [`registry::ProfileDirectory`]
//! seams; leaderboards are recomputed from the ledger per query, never
//! maintained as running totals.
//!
//! ```ignore
//! use tallyboard::{EngagementCore, SubjectKind, SubjectRef};
//!
//! let core = EngagementCore::in_memory();
//! let subject = SubjectRef::new(SubjectKind::Book, "b1");
//! // seed core.registry() / core.profiles(), then:
//! let outcome = core.toggles().toggle_like(&subject, "user-42")?;
//! let board = core.leaderboards().top_ten_liked(SubjectKind::Book)?;
//! ```

mod core;
pub mod engagement;
pub mod leaderboard;
pub mod registry;
mod subject;
pub mod svc;
mod toggle;

pub use crate::core::{EngagementCore, InMemoryCore};
pub use engagement::{
    EngagementError, EngagementStore, InMemoryEngagementStore, LikeEdge, Metric, ViewEvent,
};
pub use leaderboard::{
    Aggregator, AuthorRank, ContentRank, LeaderboardError, LeaderboardService, LikedItem,
    OwnerEngagement,
};
pub use registry::{
    ContentRecord, ContentRegistry, InMemoryContentRegistry, InMemoryProfileDirectory,
    OwnerProfile, ProfileDirectory, RegistryError,
};
pub use subject::{SubjectKind, SubjectRef, UnknownKind};
pub use toggle::{LikeState, ToggleEngine, ToggleError, ToggleOutcome};
