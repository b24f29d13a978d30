//! Handler: owner.stats
//!
//! Total likes and views across everything one owner owns, all kinds summed.

use serde::Deserialize;
use serde_json::json;

use crate::core::EngagementCore;
use crate::engagement::EngagementStore;
use crate::registry::{ContentRegistry, ProfileDirectory};
use crate::svc::{Context, HandlerError, Reply};

pub const COMMAND: &str = "owner.stats";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub owner_id: String,
}

pub fn guard<S, C, P>(ctx: &Context<EngagementCore<S, C, P>>) -> bool {
    ctx.has_fields(&["ownerId"])
}

pub fn handle<S, C, P>(ctx: &Context<EngagementCore<S, C, P>>) -> Result<Reply, HandlerError>
where
    S: EngagementStore,
    C: ContentRegistry,
    P: ProfileDirectory,
{
    let input: Input = ctx.input()?;

    let totals = ctx.repo().aggregator().owner_engagement(&input.owner_id)?;

    Ok(Reply::new(
        json!({
            "ownerId": totals.owner_id,
            "totalLikes": totals.total_likes,
            "totalViews": totals.total_views,
        }),
        "owner engagement fetched",
    ))
}
