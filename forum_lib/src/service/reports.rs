use forum_api::types::{
    Member, NotificationKind, Page, Report, ReportCreate, ReportID, ReportStatus, ReportSummary,
    ReportUpdate,
};
use forum_api::ReportQuery;
use uuid::Uuid;

use super::{notification, require_active, require_staff, Forum};
use crate::db::{now, Db, DbReportFilter};
use crate::error::ForumError;
use crate::pagination::PageWindow;
use crate::validation::{validate_optional_uuid, validate_reason};

impl Forum {
    /// Files a report against exactly one live post or comment.
    pub fn create_report(
        &self,
        actor: &Member,
        body: &ReportCreate,
    ) -> Result<Report, ForumError> {
        require_active(actor)?;
        let reason = validate_reason(&body.reason)?;

        let db = self.db();
        match (body.post_id, body.comment_id) {
            (Some(post_id), None) => {
                if db.get_post(post_id)?.is_none() {
                    return Err(ForumError::not_found("post", post_id));
                }
            }
            (None, Some(comment_id)) => {
                if db.get_comment(comment_id)?.is_none() {
                    return Err(ForumError::not_found("comment", comment_id));
                }
            }
            _ => {
                return Err(ForumError::InvalidInput(
                    "a report targets exactly one of post_id or comment_id".to_string(),
                ))
            }
        }
        if db.has_pending_report(actor.id, body.post_id, body.comment_id)? {
            return Err(ForumError::Conflict(
                "you already have a pending report on this content".to_string(),
            ));
        }

        let at = now();
        let report = Report {
            id: Uuid::new_v4(),
            reporter_id: actor.id,
            post_id: body.post_id,
            comment_id: body.comment_id,
            reason,
            status: ReportStatus::Pending,
            resolution_note: None,
            resolved_by: None,
            created_at: at,
            updated_at: at,
            resolved_at: None,
        };
        db.insert_report(&report)?;
        Ok(report)
    }

    pub fn list_reports(
        &self,
        actor: &Member,
        query: &ReportQuery,
    ) -> Result<Page<ReportSummary>, ForumError> {
        require_staff(actor)?;
        let window = PageWindow::resolve(&query.common)?;
        let filter = DbReportFilter {
            status: query.status,
            reporter_id: validate_optional_uuid(query.reporter_id.as_deref(), "reporter_id")?,
        };
        let (records, reports) = self.db().query_reports(&filter, &window)?;
        Ok(window.into_page(records, reports.into_iter().map(Into::into).collect()))
    }

    /// Visible to the reporter and to staff.
    pub fn get_report(&self, actor: &Member, id: ReportID) -> Result<Report, ForumError> {
        let report = self
            .db()
            .get_report(id)?
            .ok_or_else(|| ForumError::not_found("report", id))?;
        if report.reporter_id != actor.id && !actor.role.is_staff() {
            return Err(ForumError::Forbidden(
                "only the reporter or a moderator can view this report".to_string(),
            ));
        }
        Ok(report)
    }

    /// Resolves or dismisses a pending report and tells the reporter.
    pub fn update_report(
        &self,
        actor: &Member,
        id: ReportID,
        body: &ReportUpdate,
    ) -> Result<Report, ForumError> {
        require_staff(actor)?;
        if body.status == ReportStatus::Pending {
            return Err(ForumError::InvalidInput(
                "status must be resolved or dismissed".to_string(),
            ));
        }
        let note = body
            .resolution_note
            .as_deref()
            .map(validate_reason)
            .transpose()?;

        let db = self.db();
        let report = db
            .get_report(id)?
            .ok_or_else(|| ForumError::not_found("report", id))?;
        close_report(&db, report, actor, body.status, note)
    }
}

/// Moves a pending report to `status` and notifies its reporter.
pub(super) fn close_report(
    db: &Db,
    mut report: Report,
    actor: &Member,
    status: ReportStatus,
    note: Option<String>,
) -> Result<Report, ForumError> {
    if report.status != ReportStatus::Pending {
        return Err(ForumError::Conflict(format!(
            "report {} is already {}",
            report.id, report.status
        )));
    }
    let at = now();
    report.status = status;
    report.resolution_note = note;
    report.resolved_by = Some(actor.id);
    report.updated_at = at;
    report.resolved_at = Some(at);
    if !db.update_report(&report)? {
        return Err(ForumError::Conflict(format!(
            "report {} is no longer pending",
            report.id
        )));
    }

    let mut n = notification(
        report.reporter_id,
        NotificationKind::ReportResolved,
        format!("Your report was {}", status),
    );
    n.post_id = report.post_id;
    n.comment_id = report.comment_id;
    db.insert_notification(&n)?;
    Ok(report)
}
