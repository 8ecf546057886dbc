//! Moderation actions: the append-only audit log of staff interventions.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CommentID, MemberID, PostID, ReportID};

pub type ModerationActionID = Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ModerationAction {
    pub id: ModerationActionID,
    pub moderator_id: MemberID,
    pub action_type: ModerationActionType,
    /// Member affected by the action (the content author for removals).
    pub member_id: Option<MemberID>,
    pub post_id: Option<PostID>,
    pub comment_id: Option<CommentID>,
    /// Report closed by this action, if any.
    pub report_id: Option<ReportID>,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ModerationActionCreate {
    pub action_type: ModerationActionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_id: Option<MemberID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<PostID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<CommentID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_id: Option<ReportID>,
    pub reason: String,
}

/// What a moderator did. Each kind requires a specific target field.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ModerationActionType {
    /// Soft-deletes a post. Requires `post_id`.
    RemovePost,
    /// Soft-deletes a comment. Requires `comment_id`.
    RemoveComment,
    /// Notifies a member. Requires `member_id`.
    WarnMember,
    /// Blocks a member from creating content. Requires `member_id`.
    SuspendMember,
    /// Lifts a suspension. Requires `member_id`.
    ReinstateMember,
}
impl std::fmt::Display for ModerationActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ModerationActionType::RemovePost => "remove_post",
                ModerationActionType::RemoveComment => "remove_comment",
                ModerationActionType::WarnMember => "warn_member",
                ModerationActionType::SuspendMember => "suspend_member",
                ModerationActionType::ReinstateMember => "reinstate_member",
            }
        )
    }
}
impl FromStr for ModerationActionType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "remove_post" => Ok(ModerationActionType::RemovePost),
            "remove_comment" => Ok(ModerationActionType::RemoveComment),
            "warn_member" => Ok(ModerationActionType::WarnMember),
            "suspend_member" => Ok(ModerationActionType::SuspendMember),
            "reinstate_member" => Ok(ModerationActionType::ReinstateMember),
            _ => Err(()),
        }
    }
}
