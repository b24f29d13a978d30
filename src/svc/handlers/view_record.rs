//! Handler: view.record
//!
//! Appends one view event. Anonymous callers are allowed; repeat views all
//! count.

use serde::Deserialize;
use serde_json::json;

use crate::core::EngagementCore;
use crate::engagement::EngagementStore;
use crate::registry::{ContentRegistry, ProfileDirectory};
use crate::subject::{SubjectKind, SubjectRef};
use crate::svc::{Context, HandlerError, Reply};

pub const COMMAND: &str = "view.record";

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
    let actor_id = ctx.session().actor_id();

    ctx.repo().toggles().record_view(&subject, actor_id)?;

    Ok(Reply::new(
        json!({ "recorded": true, "subject": subject }),
        "view recorded",
    ))
}
