//! Posts and their tags.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CategoryID, MemberID};

pub type PostID = Uuid;

/// Maximum number of tags a post can carry.
pub const MAX_POST_TAGS: usize = 5;

/// Full post record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Post {
    pub id: PostID,

    pub category_id: CategoryID,

    pub author_id: MemberID,

    pub title: String,

    pub body: String,

    /// Lowercase labels, at most [`MAX_POST_TAGS`].
    pub tags: Vec<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    pub deleted_at: Option<DateTime<Utc>>,
}

/// Post representation used by `GET /posts`. Carries the number of live comments
/// instead of the body.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PostSummary {
    pub id: PostID,
    pub category_id: CategoryID,
    pub author_id: MemberID,
    pub title: String,
    pub tags: Vec<String>,
    pub comment_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PostCreate {
    pub category_id: CategoryID,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct PostUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// Replaces the tag set of a post. Moderators and administrators only.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PostTagsUpdate {
    pub tags: Vec<String>,
}
