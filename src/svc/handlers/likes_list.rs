//! Handler: likes.list
//!
//! Everything the calling actor currently likes, newest first, optionally
//! restricted to one kind. Likes of since-deleted content are dropped.

use serde::Deserialize;
use serde_json::json;

use crate::core::EngagementCore;
use crate::engagement::EngagementStore;
use crate::registry::{ContentRegistry, ProfileDirectory};
use crate::subject::SubjectKind;
use crate::svc::{Context, HandlerError, Reply};

pub const COMMAND: &str = "likes.list";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub kind: Option<SubjectKind>,
}

pub fn guard<S, C, P>(_ctx: &Context<EngagementCore<S, C, P>>) -> bool {
    // No required fields; identity is checked in the handler.
    true
}

pub fn handle<S, C, P>(ctx: &Context<EngagementCore<S, C, P>>) -> Result<Reply, HandlerError>
where
    S: EngagementStore,
    C: ContentRegistry,
    P: ProfileDirectory,
{
    let actor_id = ctx.actor_id()?.to_string();
    let input: Input = ctx.input()?;

    let items = ctx
        .repo()
        .aggregator()
        .liked_by_actor(&actor_id, input.kind)?;

    Ok(Reply::new(
        json!({ "items": items }),
        "liked content fetched",
    ))
}
