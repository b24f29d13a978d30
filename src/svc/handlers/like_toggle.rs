//! Handler: like.toggle
//!
//! Flips the caller's like state on one subject. Requires an authenticated
//! actor; there are no separate like/unlike commands.

use serde::Deserialize;
use serde_json::json;

use crate::core::EngagementCore;
use crate::engagement::EngagementStore;
use crate::registry::{ContentRegistry, ProfileDirectory};
use crate::subject::{SubjectKind, SubjectRef};
use crate::svc::{Context, HandlerError, Reply};
use crate::toggle::LikeState;

pub const COMMAND: &str = "like.toggle";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub kind: SubjectKind,
    pub subject_id: String,
}

pub fn guard<S, C, P>(ctx: &Context<EngagementCore<S, C, P>>) -> bool {
    ctx.has_fields(&["kind", "subjectId"])
}

pub fn handle<S, C, P>(ctx: &Context<EngagementCore<S, C, P>>) -> Result<Reply, HandlerError>
where
    S: EngagementStore,
    C: ContentRegistry,
    P: ProfileDirectory,
{
    let actor_id = ctx.actor_id()?.to_string();
    let input: Input = ctx.input()?;
    let subject = SubjectRef::new(input.kind, input.subject_id);

    let outcome = ctx.repo().toggles().toggle_like(&subject, &actor_id)?;

    let message = match outcome.state {
        LikeState::Liked => format!("liked the {}", subject.kind),
        LikeState::NotLiked => format!("unliked the {}", subject.kind),
    };
    Ok(Reply::new(
        json!({
            "state": outcome.state,
            "edge": outcome.edge,
            "subject": subject,
        }),
        message,
    ))
}
