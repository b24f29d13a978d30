//! Session variables from the request context.
//!
//! Identity is issued by the out-of-scope authentication layer and arrives
//! here as the `x-actor-id` variable (an HTTP header on the axum transport).
//! The engine never mints or verifies identities itself.

use std::collections::HashMap;

/// Variable carrying the authenticated actor's id.
pub const ACTOR_ID: &str = "x-actor-id";

/// Parsed session variables from the incoming request.
#[derive(Debug, Clone, Default)]
pub struct Session {
    variables: HashMap<String, String>,
}

impl Session {
    /// Create an empty (anonymous) session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session from a map of variables.
    pub fn from_map(variables: HashMap<String, String>) -> Self {
        Self { variables }
    }

    /// Create a session authenticated as `actor_id`.
    pub fn with_actor(actor_id: impl Into<String>) -> Self {
        let mut session = Self::new();
        session.set(ACTOR_ID, actor_id);
        session
    }

    /// Get the acting user's id, if authenticated.
    pub fn actor_id(&self) -> Option<&str> {
        self.get(ACTOR_ID)
    }

    /// Get a session variable by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(|v| v.as_str())
    }

    /// Set a session variable.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Check if a session variable exists.
    pub fn has(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    /// Get all session variables.
    pub fn variables(&self) -> &HashMap<String, String> {
        &self.variables
    }
}
