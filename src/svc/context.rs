//! Context passed to command handlers.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::HandlerError;
use super::session::Session;

/// The context passed to every command handler.
///
/// Generic over `R`, the application state (normally an `EngagementCore`),
/// so handlers reach the engines through `ctx.repo()`.
pub struct Context<'a, R> {
    command_name: String,
    input: Value,
    session: Session,
    repo: &'a R,
}

impl<'a, R> Context<'a, R> {
    pub(crate) fn new(command_name: String, input: Value, session: Session, repo: &'a R) -> Self {
        Self {
            command_name,
            input,
            session,
            repo,
        }
    }

    /// Deserialize the input payload into a typed struct.
    pub fn input<T: DeserializeOwned>(&self) -> Result<T, HandlerError> {
        serde_json::from_value(self.input.clone())
            .map_err(|e| HandlerError::DecodeFailed(e.to_string()))
    }

    /// Get the raw JSON input.
    pub fn raw_input(&self) -> &Value {
        &self.input
    }

    /// Get the command name.
    pub fn command_name(&self) -> &str {
        &self.command_name
    }

    /// Get the session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The authenticated actor's id. Fails with `Unauthenticated` when the
    /// auth layer supplied none; likes require identity, views do not.
    pub fn actor_id(&self) -> Result<&str, HandlerError> {
        self.session
            .actor_id()
            .ok_or_else(|| HandlerError::Unauthenticated("missing actor id in session".into()))
    }

    /// Get a reference to the application state.
    pub fn repo(&self) -> &R {
        self.repo
    }

    /// Check if the raw input contains a field.
    pub fn has_field(&self, field: &str) -> bool {
        self.input.get(field).is_some()
    }

    /// Check if the raw input contains all specified fields.
    pub fn has_fields(&self, fields: &[&str]) -> bool {
        fields.iter().all(|f| self.has_field(f))
    }
}
