//! Handler: engagement.counts
//!
//! Point counts for one subject, used by single-item displays. Unlike the
//! leaderboard path, a subject that does not resolve is a `NotFound` here.

use serde::Deserialize;
use serde_json::json;

use crate::core::EngagementCore;
use crate::engagement::EngagementStore;
use crate::registry::{ContentRegistry, ProfileDirectory};
use crate::subject::{SubjectKind, SubjectRef};
use crate::svc::{Context, HandlerError, Reply};

pub const COMMAND: &str = "engagement.counts";

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
    let input: Input = ctx.input()?;
    let subject = SubjectRef::new(input.kind, input.subject_id);

    let core = ctx.repo();
    if core.registry().resolve(&subject)?.is_none() {
        return Err(HandlerError::NotFound(subject.to_string()));
    }

    let likes = core.store().count_likes(&subject)?;
    let views = core.store().count_views(&subject)?;

    Ok(Reply::new(
        json!({ "subject": subject, "likes": likes, "views": views }),
        "engagement counts fetched",
    ))
}
