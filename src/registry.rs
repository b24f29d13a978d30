//! External collaborator seams: content ownership and owner profiles.
//!
//! The engine never stores content or user rows of its own. It consumes two
//! narrow read-only lookups: `(kind, id) → content record` for resolving a
//! subject's owner, and `ownerId → profile` for leaderboard enrichment.
//! `Ok(None)` means the row does not exist (content deleted, unknown owner);
//! `Err(Unavailable)` means the lookup itself failed and the caller must not
//! treat the data as absent.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::subject::SubjectRef;

/// A content item as the registry knows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    pub subject: SubjectRef,
    pub owner_id: String,
    pub title: String,
}

/// Display fields for one owner, used to enrich author leaderboards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerProfile {
    pub owner_id: String,
    pub display_name: String,
    pub handle: String,
    pub avatar: String,
}

/// Error type for collaborator lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The upstream lookup failed (transient outage, timeout). Retryable by
    /// the caller; never to be confused with "row absent".
    Unavailable(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Unavailable(msg) => write!(f, "upstream unavailable: {}", msg),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Read-only lookup of content records by tagged subject ref.
pub trait ContentRegistry: Send + Sync {
    /// Resolve a subject. `Ok(None)` if no such content exists.
    fn resolve(&self, subject: &SubjectRef) -> Result<Option<ContentRecord>, RegistryError>;
}

/// Read-only lookup of owner display profiles.
pub trait ProfileDirectory: Send + Sync {
    /// Resolve an owner id. `Ok(None)` if unknown.
    fn resolve(&self, owner_id: &str) -> Result<Option<OwnerProfile>, RegistryError>;
}

/// In-memory content registry for tests and embedding.
///
/// Clone-friendly via Arc: clones share storage.
#[derive(Clone, Default)]
pub struct InMemoryContentRegistry {
    records: Arc<RwLock<HashMap<SubjectRef, ContentRecord>>>,
}

impl InMemoryContentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a content record.
    pub fn put(&self, record: ContentRecord) {
        if let Ok(mut records) = self.records.write() {
            records.insert(record.subject.clone(), record);
        }
    }

    /// Remove a content record, simulating content deletion.
    pub fn remove(&self, subject: &SubjectRef) {
        if let Ok(mut records) = self.records.write() {
            records.remove(subject);
        }
    }
}

impl ContentRegistry for InMemoryContentRegistry {
    fn resolve(&self, subject: &SubjectRef) -> Result<Option<ContentRecord>, RegistryError> {
        let records = self
            .records
            .read()
            .map_err(|_| RegistryError::Unavailable("registry lock poisoned".into()))?;
        Ok(records.get(subject).cloned())
    }
}

/// In-memory profile directory for tests and embedding.
#[derive(Clone, Default)]
pub struct InMemoryProfileDirectory {
    profiles: Arc<RwLock<HashMap<String, OwnerProfile>>>,
}

impl InMemoryProfileDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) an owner profile.
    pub fn put(&self, profile: OwnerProfile) {
        if let Ok(mut profiles) = self.profiles.write() {
            profiles.insert(profile.owner_id.clone(), profile);
        }
    }
}

impl ProfileDirectory for InMemoryProfileDirectory {
    fn resolve(&self, owner_id: &str) -> Result<Option<OwnerProfile>, RegistryError> {
        let profiles = self
            .profiles
            .read()
            .map_err(|_| RegistryError::Unavailable("profile lock poisoned".into()))?;
        Ok(profiles.get(owner_id).cloned())
    }
}
