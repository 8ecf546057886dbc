use forum_api::types::{
    Member, ModerationAction, ModerationActionCreate, ModerationActionID, ModerationActionType,
    NotificationKind, Page, ReportStatus,
};
use forum_api::ModerationActionQuery;
use uuid::Uuid;

use super::reports::close_report;
use super::{notification, require_staff, Forum};
use crate::db::{now, Db, DbModerationFilter};
use crate::error::ForumError;
use crate::pagination::PageWindow;
use crate::validation::{validate_optional_uuid, validate_reason};

/// The member an action lands on. Staff may act on their own content but
/// never on a member of equal or higher rank.
fn check_rank(actor: &Member, target: &Member) -> Result<(), ForumError> {
    if actor.id != target.id && target.role >= actor.role {
        return Err(ForumError::Forbidden(format!(
            "cannot moderate a member with the {} role",
            target.role
        )));
    }
    Ok(())
}

fn load_member(db: &Db, id: Option<Uuid>) -> Result<Member, ForumError> {
    let id = id.ok_or_else(|| ForumError::InvalidInput("member_id is required".to_string()))?;
    db.get_member(id)?
        .ok_or_else(|| ForumError::not_found("member", id))
}

/// Author of removed content. Erased authors have nobody left to notify.
fn content_author(
    db: &Db,
    actor: &Member,
    author_id: Uuid,
) -> Result<Option<Member>, ForumError> {
    let author = db.get_member(author_id)?;
    if let Some(ref author) = author {
        check_rank(actor, author)?;
    }
    Ok(author)
}

impl Forum {
    /// Applies a moderation action and records it in the audit log.
    ///
    /// `remove_post` and `remove_comment` soft-delete their target,
    /// `suspend_member` and `reinstate_member` toggle the suspension flag and
    /// `warn_member` only notifies. A `report_id` resolves that report.
    pub fn create_moderation_action(
        &self,
        actor: &Member,
        body: &ModerationActionCreate,
    ) -> Result<ModerationAction, ForumError> {
        require_staff(actor)?;
        let reason = validate_reason(&body.reason)?;

        let db = self.db();
        let report = match body.report_id {
            Some(report_id) => {
                let report = db
                    .get_report(report_id)?
                    .ok_or_else(|| ForumError::not_found("report", report_id))?;
                if report.status != ReportStatus::Pending {
                    return Err(ForumError::Conflict(format!(
                        "report {} is already {}",
                        report_id, report.status
                    )));
                }
                Some(report)
            }
            None => None,
        };

        let at = now();
        let mut action = ModerationAction {
            id: Uuid::new_v4(),
            moderator_id: actor.id,
            action_type: body.action_type,
            member_id: None,
            post_id: None,
            comment_id: None,
            report_id: body.report_id,
            reason: reason.clone(),
            created_at: at,
        };

        let affected = match body.action_type {
            ModerationActionType::RemovePost => {
                let post_id = body
                    .post_id
                    .ok_or_else(|| ForumError::InvalidInput("post_id is required".to_string()))?;
                let post = db
                    .get_post(post_id)?
                    .ok_or_else(|| ForumError::not_found("post", post_id))?;
                let author = content_author(&db, actor, post.author_id)?;
                db.erase_post(post_id, at)?;
                action.post_id = Some(post_id);
                author
            }
            ModerationActionType::RemoveComment => {
                let comment_id = body.comment_id.ok_or_else(|| {
                    ForumError::InvalidInput("comment_id is required".to_string())
                })?;
                let comment = db
                    .get_comment(comment_id)?
                    .ok_or_else(|| ForumError::not_found("comment", comment_id))?;
                let author = content_author(&db, actor, comment.author_id)?;
                db.erase_comment(comment_id, at)?;
                action.post_id = Some(comment.post_id);
                action.comment_id = Some(comment_id);
                author
            }
            ModerationActionType::WarnMember
            | ModerationActionType::SuspendMember
            | ModerationActionType::ReinstateMember => {
                let mut member = load_member(&db, body.member_id)?;
                if member.id == actor.id {
                    return Err(ForumError::InvalidInput(
                        "cannot take member actions against yourself".to_string(),
                    ));
                }
                check_rank(actor, &member)?;
                match body.action_type {
                    ModerationActionType::SuspendMember if member.suspended => {
                        return Err(ForumError::Conflict(format!(
                            "{} is already suspended",
                            member.username
                        )))
                    }
                    ModerationActionType::ReinstateMember if !member.suspended => {
                        return Err(ForumError::Conflict(format!(
                            "{} is not suspended",
                            member.username
                        )))
                    }
                    ModerationActionType::SuspendMember | ModerationActionType::ReinstateMember => {
                        member.suspended = body.action_type == ModerationActionType::SuspendMember;
                        member.updated_at = at;
                        db.update_member(&member)?;
                    }
                    _ => {}
                }
                Some(member)
            }
        };
        action.member_id = affected.as_ref().map(|m| m.id);
        db.insert_moderation_action(&action)?;

        if let Some(report) = report {
            close_report(&db, report, actor, ReportStatus::Resolved, Some(reason.clone()))?;
        }
        if let Some(member) = affected.as_ref().filter(|m| m.id != actor.id) {
            let mut n = notification(
                member.id,
                NotificationKind::Moderation,
                format!("A moderator applied {}: {}", action.action_type, reason),
            );
            n.post_id = action.post_id;
            n.comment_id = action.comment_id;
            db.insert_notification(&n)?;
        }

        tracing::info!(
            "{} applied {} to {}",
            actor.username,
            action.action_type,
            affected.as_ref().map_or("an erased member", |m| m.username.as_str())
        );
        Ok(action)
    }

    pub fn list_moderation_actions(
        &self,
        actor: &Member,
        query: &ModerationActionQuery,
    ) -> Result<Page<ModerationAction>, ForumError> {
        require_staff(actor)?;
        let window = PageWindow::resolve(&query.common)?;
        let filter = DbModerationFilter {
            action_type: query.action_type,
            moderator_id: validate_optional_uuid(query.moderator_id.as_deref(), "moderator_id")?,
            member_id: validate_optional_uuid(query.member_id.as_deref(), "member_id")?,
        };
        let (records, actions) = self.db().query_moderation_actions(&filter, &window)?;
        Ok(window.into_page(records, actions))
    }

    pub fn get_moderation_action(
        &self,
        actor: &Member,
        id: ModerationActionID,
    ) -> Result<ModerationAction, ForumError> {
        require_staff(actor)?;
        self.db()
            .get_moderation_action(id)?
            .ok_or_else(|| ForumError::not_found("moderation action", id))
    }
}
