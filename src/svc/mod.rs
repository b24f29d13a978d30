//! svc — Convention-based command layer over the engagement core.
//!
//! Commands are registered on a [`Service`] by name; each handler receives a
//! [`Context<R>`] with the parsed input, the session variables, and the core.
//! The transport is pluggable: dispatch directly, or serve the same service
//! over HTTP (feature `http`).
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use tallyboard::{svc, EngagementCore};
//!
//! let core = EngagementCore::in_memory();
//! let service = Arc::new(svc::service(core));
//!
//! // Direct dispatch
//! let reply = service.dispatch(
//!     "like.toggle",
//!     serde_json::json!({ "kind": "book", "subjectId": "b1" }),
//!     svc::Session::with_actor("user-42"),
//! );
//!
//! // HTTP transport (requires the "http" feature)
//! // svc::serve(service, "0.0.0.0:3000").await?;
//! ```
//!
//! ## Handler Convention
//!
//! Each handler module exports:
//! - `COMMAND: &str` — the command name
//! - `guard(ctx) -> bool` — shallow input validation
//! - `handle(ctx) -> Result<Reply, HandlerError>` — the handler

mod context;
mod error;
pub mod handlers;
mod service;
mod session;

pub use context::Context;
pub use error::HandlerError;
pub use service::{ApiEnvelope, CommandRequest, Reply, Service};
pub use session::Session;

// HTTP transport (requires "http" feature)
#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::{router, serve};

use crate::core::EngagementCore;
use crate::engagement::EngagementStore;
use crate::registry::{ContentRegistry, ProfileDirectory};

/// Register handler modules with a service using the convention pattern.
#[macro_export]
macro_rules! register_handlers {
    ($service:expr, $( $($seg:ident)::+ ),+ $(,)?) => {
        $service
        $(
            .command_guarded(
                $($seg)::+::COMMAND,
                $($seg)::+::guard,
                $($seg)::+::handle,
            )
        )+
    };
}

/// Build the full command surface over a core.
pub fn service<S, C, P>(core: EngagementCore<S, C, P>) -> Service<EngagementCore<S, C, P>>
where
    S: EngagementStore + Send + Sync + 'static,
    C: ContentRegistry + Send + Sync + 'static,
    P: ProfileDirectory + Send + Sync + 'static,
{
    crate::register_handlers!(
        Service::new(core),
        handlers::like_toggle,
        handlers::view_record,
        handlers::engagement_counts,
        handlers::leaderboard_content,
        handlers::leaderboard_authors,
        handlers::likes_list,
        handlers::owner_stats,
    )
}
