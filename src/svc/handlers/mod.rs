//! Command handlers, one module per command.
//!
//! Each module follows the convention: `COMMAND` (the name), `guard`
//! (shallow field presence checks, rejected as 400 before the handler
//! runs), and `handle` (the handler, generic over the core's store and
//! collaborator implementations).

pub mod engagement_counts;
pub mod leaderboard_authors;
pub mod leaderboard_content;
pub mod like_toggle;
pub mod likes_list;
pub mod owner_stats;
pub mod view_record;
