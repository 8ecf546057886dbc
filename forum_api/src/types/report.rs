//! Member reports against posts or comments.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CommentID, MemberID, PostID};

pub type ReportID = Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Report {
    pub id: ReportID,

    pub reporter_id: MemberID,

    /// Exactly one of `post_id` and `comment_id` is set.
    pub post_id: Option<PostID>,

    pub comment_id: Option<CommentID>,

    pub reason: String,

    pub status: ReportStatus,

    pub resolution_note: Option<String>,

    /// Moderator who closed the report.
    pub resolved_by: Option<MemberID>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    pub resolved_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReportSummary {
    pub id: ReportID,
    pub reporter_id: MemberID,
    pub post_id: Option<PostID>,
    pub comment_id: Option<CommentID>,
    pub reason: String,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}
impl From<Report> for ReportSummary {
    fn from(val: Report) -> Self {
        ReportSummary {
            id: val.id,
            reporter_id: val.reporter_id,
            post_id: val.post_id,
            comment_id: val.comment_id,
            reason: val.reason,
            status: val.status,
            created_at: val.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ReportCreate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<PostID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<CommentID>,
    pub reason: String,
}

/// Closes a pending report.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ReportUpdate {
    pub status: ReportStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_note: Option<String>,
}

/// Lifecycle of a report. Only `Pending` reports can be updated.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Resolved,
    Dismissed,
}
impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ReportStatus::Pending => "pending",
                ReportStatus::Resolved => "resolved",
                ReportStatus::Dismissed => "dismissed",
            }
        )
    }
}
impl FromStr for ReportStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReportStatus::Pending),
            "resolved" => Ok(ReportStatus::Resolved),
            "dismissed" => Ok(ReportStatus::Dismissed),
            _ => Err(()),
        }
    }
}
