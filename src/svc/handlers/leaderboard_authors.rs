//! Handler: leaderboard.authors
//!
//! Top authors by engagement aggregated across every kind they own.

use serde::Deserialize;
use serde_json::json;

use crate::core::EngagementCore;
use crate::engagement::{EngagementStore, Metric};
use crate::registry::{ContentRegistry, ProfileDirectory};
use crate::svc::{Context, HandlerError, Reply};

pub const COMMAND: &str = "leaderboard.authors";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub metric: Metric,
    pub limit: Option<usize>,
}

pub fn guard<S, C, P>(ctx: &Context<EngagementCore<S, C, P>>) -> bool {
    ctx.has_fields(&["metric"])
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

    let entries = ctx.repo().leaderboards().authors(input.metric, limit)?;

    Ok(Reply::new(
        json!({ "entries": entries }),
        format!("top {} authors by {}", limit, input.metric),
    ))
}
