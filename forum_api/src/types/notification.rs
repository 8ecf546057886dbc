//! Notifications delivered to a single member.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CommentID, MemberID, PostID};

pub type NotificationID = Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationID,
    /// Recipient.
    pub member_id: MemberID,
    pub kind: NotificationKind,
    pub message: String,
    pub post_id: Option<PostID>,
    pub comment_id: Option<CommentID>,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    CommentOnPost,
    ReplyToComment,
    Moderation,
    ReportResolved,
}
impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                NotificationKind::CommentOnPost => "comment_on_post",
                NotificationKind::ReplyToComment => "reply_to_comment",
                NotificationKind::Moderation => "moderation",
                NotificationKind::ReportResolved => "report_resolved",
            }
        )
    }
}
impl FromStr for NotificationKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "comment_on_post" => Ok(NotificationKind::CommentOnPost),
            "reply_to_comment" => Ok(NotificationKind::ReplyToComment),
            "moderation" => Ok(NotificationKind::Moderation),
            "report_resolved" => Ok(NotificationKind::ReportResolved),
            _ => Err(()),
        }
    }
}
