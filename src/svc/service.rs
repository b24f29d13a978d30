//! Service — command registry and dispatch.
//!
//! `Service<R>` holds the application state and a set of named command
//! handlers. Each handler receives a `Context<R>` and returns
//! `Result<Reply, HandlerError>`; transports wrap the result in the
//! `ApiEnvelope` response shape.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::context::Context;
use super::error::HandlerError;
use super::session::Session;

/// A handler's successful result: the payload plus a human-readable message
/// for the response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub payload: Value,
    pub message: String,
}

impl Reply {
    pub fn new(payload: Value, message: impl Into<String>) -> Self {
        Self {
            payload,
            message: message.into(),
        }
    }
}

/// The response envelope every caller sees, success or failure.
///
/// Errors carry `{ "error": <kind> }` as the payload; there is never a bare
/// transport-level failure with no body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope {
    pub status: u16,
    pub payload: Value,
    pub message: String,
}

impl ApiEnvelope {
    fn ok(reply: Reply) -> Self {
        Self {
            status: 200,
            payload: reply.payload,
            message: reply.message,
        }
    }

    fn err(error: &HandlerError) -> Self {
        Self {
            status: error.status_code(),
            payload: serde_json::json!({ "error": error.error_kind() }),
            message: error.to_string(),
        }
    }
}

/// An inbound command request, transport-agnostic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandRequest {
    /// Command name (URL path on the HTTP transport).
    pub command: String,
    /// JSON input payload.
    pub input: Value,
    /// Session variables (actor id etc.).
    #[serde(default)]
    pub session_variables: HashMap<String, String>,
}

/// A registered command handler with optional guard.
struct CommandHandler<R> {
    guard: Option<Box<dyn Fn(&Context<R>) -> bool + Send + Sync>>,
    handle: Box<dyn Fn(&Context<R>) -> Result<Reply, HandlerError> + Send + Sync>,
}

/// A service that routes commands to handler functions.
pub struct Service<R> {
    repo: R,
    handlers: HashMap<String, CommandHandler<R>>,
}

impl<R: Send + Sync + 'static> Service<R> {
    /// Create a new service with the given application state.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            handlers: HashMap::new(),
        }
    }

    /// Register a command handler. Builder pattern, returns `self`.
    pub fn command<F>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(&Context<R>) -> Result<Reply, HandlerError> + Send + Sync + 'static,
    {
        self.handlers.insert(
            name.to_string(),
            CommandHandler {
                guard: None,
                handle: Box::new(handler),
            },
        );
        self
    }

    /// Register a command handler with a guard. The guard runs first; if it
    /// returns `false` the command is rejected with `GuardRejected`.
    pub fn command_guarded<G, F>(mut self, name: &str, guard: G, handler: F) -> Self
    where
        G: Fn(&Context<R>) -> bool + Send + Sync + 'static,
        F: Fn(&Context<R>) -> Result<Reply, HandlerError> + Send + Sync + 'static,
    {
        self.handlers.insert(
            name.to_string(),
            CommandHandler {
                guard: Some(Box::new(guard)),
                handle: Box::new(handler),
            },
        );
        self
    }

    /// Dispatch a command by name.
    pub fn dispatch(
        &self,
        command: &str,
        input: Value,
        session: Session,
    ) -> Result<Reply, HandlerError> {
        let handler = self
            .handlers
            .get(command)
            .ok_or_else(|| HandlerError::UnknownCommand(command.to_string()))?;

        let ctx = Context::new(command.to_string(), input, session, &self.repo);

        if let Some(guard) = &handler.guard {
            if !guard(&ctx) {
                tracing::debug!(command, "guard rejected");
                return Err(HandlerError::GuardRejected(command.to_string()));
            }
        }

        let result = (handler.handle)(&ctx);
        match &result {
            Ok(_) => tracing::debug!(command, "handled"),
            Err(e) => tracing::debug!(command, error = %e, "handler failed"),
        }
        result
    }

    /// Dispatch a `CommandRequest`, returning the response envelope.
    pub fn dispatch_request(&self, request: &CommandRequest) -> ApiEnvelope {
        let session = Session::from_map(request.session_variables.clone());
        match self.dispatch(&request.command, request.input.clone(), session) {
            Ok(reply) => ApiEnvelope::ok(reply),
            Err(e) => ApiEnvelope::err(&e),
        }
    }

    /// List registered command names.
    pub fn commands(&self) -> Vec<&str> {
        self.handlers.keys().map(|s| s.as_str()).collect()
    }

    /// Get a reference to the application state.
    pub fn repo(&self) -> &R {
        &self.repo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_service() -> Service<()> {
        Service::new(())
    }

    #[test]
    fn dispatch_returns_handler_reply() {
        let service =
            test_service().command("ping", |_ctx| Ok(Reply::new(json!({ "pong": true }), "pong")));
        let reply = service.dispatch("ping", json!({}), Session::new()).unwrap();
        assert_eq!(reply.payload, json!({ "pong": true }));
        assert_eq!(reply.message, "pong");
    }

    #[test]
    fn unknown_command() {
        let service = test_service();
        let result = service.dispatch("nope", json!({}), Session::new());
        assert!(matches!(result, Err(HandlerError::UnknownCommand(ref s)) if s == "nope"));
    }

    #[test]
    fn guard_rejects_missing_fields() {
        let service = test_service().command_guarded(
            "greet",
            |ctx| ctx.has_fields(&["name"]),
            |_ctx| panic!("handler should not run"),
        );
        let result = service.dispatch("greet", json!({ "wrong": 1 }), Session::new());
        assert!(matches!(result, Err(HandlerError::GuardRejected(ref s)) if s == "greet"));
    }

    #[test]
    fn actor_required_yields_unauthenticated() {
        let service = test_service().command("whoami", |ctx| {
            let actor = ctx.actor_id()?;
            Ok(Reply::new(json!({ "actor": actor }), "ok"))
        });

        let result = service.dispatch("whoami", json!({}), Session::new());
        assert!(matches!(result, Err(HandlerError::Unauthenticated(_))));

        let reply = service
            .dispatch("whoami", json!({}), Session::with_actor("user-9"))
            .unwrap();
        assert_eq!(reply.payload, json!({ "actor": "user-9" }));
    }

    #[test]
    fn envelope_wraps_success_and_failure() {
        let service = test_service()
            .command("ping", |_ctx| Ok(Reply::new(json!({ "pong": true }), "pong")))
            .command("boom", |_ctx| Err(HandlerError::Storage("down".into())));

        let ok = service.dispatch_request(&CommandRequest {
            command: "ping".to_string(),
            input: json!({}),
            session_variables: HashMap::new(),
        });
        assert_eq!(ok.status, 200);
        assert_eq!(ok.payload, json!({ "pong": true }));
        assert_eq!(ok.message, "pong");

        let err = service.dispatch_request(&CommandRequest {
            command: "boom".to_string(),
            input: json!({}),
            session_variables: HashMap::new(),
        });
        assert_eq!(err.status, 500);
        assert_eq!(err.payload, json!({ "error": "storage" }));

        let missing = service.dispatch_request(&CommandRequest {
            command: "nope".to_string(),
            input: json!({}),
            session_variables: HashMap::new(),
        });
        assert_eq!(missing.status, 404);
        assert_eq!(missing.payload, json!({ "error": "unknown_command" }));
    }

    #[test]
    fn commands_list() {
        let service = test_service()
            .command("a", |_| Ok(Reply::new(json!({}), "")))
            .command("b", |_| Ok(Reply::new(json!({}), "")));
        let mut cmds = service.commands();
        cmds.sort();
        assert_eq!(cmds, vec!["a", "b"]);
    }
}
