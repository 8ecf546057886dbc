//! Polls attached to a post.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{MemberID, PostID};

pub type PollID = Uuid;
pub type PollOptionID = Uuid;

pub const MIN_POLL_OPTIONS: usize = 2;
pub const MAX_POLL_OPTIONS: usize = 10;

/// A poll with its options and current tallies.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Poll {
    pub id: PollID,
    pub post_id: PostID,
    pub question: String,
    /// Ordered by `position`.
    pub options: Vec<PollOption>,
    pub total_votes: i64,
    /// Votes are rejected at or after this instant.
    pub closes_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PollOption {
    pub id: PollOptionID,
    pub label: String,
    pub position: i64,
    pub votes: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PollCreate {
    pub question: String,
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closes_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PollVoteCreate {
    pub option_id: PollOptionID,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PollVote {
    pub id: Uuid,
    pub poll_id: PollID,
    pub option_id: PollOptionID,
    pub member_id: MemberID,
    pub created_at: DateTime<Utc>,
}
