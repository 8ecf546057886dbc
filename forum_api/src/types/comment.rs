//! Comments attached to a post, optionally threaded under another comment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{MemberID, PostID};

pub type CommentID = Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: CommentID,
    pub post_id: PostID,
    pub author_id: MemberID,
    /// Comment this one replies to, always on the same post.
    pub parent_id: Option<CommentID>,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CommentSummary {
    pub id: CommentID,
    pub post_id: PostID,
    pub author_id: MemberID,
    pub parent_id: Option<CommentID>,
    pub body: String,
    pub created_at: DateTime<Utc>,
}
impl From<Comment> for CommentSummary {
    fn from(val: Comment) -> Self {
        CommentSummary {
            id: val.id,
            post_id: val.post_id,
            author_id: val.author_id,
            parent_id: val.parent_id,
            body: val.body,
            created_at: val.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CommentCreate {
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CommentID>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CommentUpdate {
    pub body: String,
}
