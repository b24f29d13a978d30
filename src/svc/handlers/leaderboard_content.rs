//! Handler: leaderboard.content
//!
//! Top content of one kind by likes or views. `limit` defaults to 10; the
//! routes in front of this pin 10 and 100, but any positive limit works.

use serde::Deserialize;
use serde_json::json;

use crate::core::EngagementCore;
use crate::engagement::{EngagementStore, Metric};
use crate::registry::{ContentRegistry, ProfileDirectory};
use crate::subject::SubjectKind;
use crate::svc::{Context, HandlerError, Reply};

pub const COMMAND: &str = "leaderboard.content";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub kind: SubjectKind,
    pub metric: Metric,
    pub limit: Option<usize>,
}

pub fn guard<S, C, P>(ctx: &Context<EngagementCore<S, C, P>>) -> bool {
    ctx.has_fields(&["kind", "metric"])
}

pub fn handle<S, C, P>(ctx: &Context<EngagementCore<S, C, P>>) -> Result<Reply, HandlerError>
where
    S: EngagementStore,
    C: ContentRegistry,
    P: ProfileDirectory,
{
    let input: Input = ctx.input()?;
    let limit = input.limit.unwrap_or(10);
    if limit == 0 {
        return Err(HandlerError::DecodeFailed(
            "limit must be a positive integer".into(),
        ));
    }

    let entries = ctx
        .repo()
        .leaderboards()
        .content(input.kind, input.metric, limit)?;

    Ok(Reply::new(
        json!({ "entries": entries }),
        format!("top {} {} by {}", limit, input.kind, input.metric),
    ))
}
