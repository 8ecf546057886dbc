use forum_api::types::{CommentID, MemberID, PostID, Report, ReportID, ReportStatus};
use rusqlite::{params, OptionalExtension, Row};

use super::{enum_at, opt_id, opt_uuid_at, uuid_at, Db, DbError, Filters, Listing};
use crate::pagination::PageWindow;

const REPORT_COLUMNS: &str = "r.id, r.reporter_id, r.post_id, r.comment_id, r.reason, r.status,
     r.resolution_note, r.resolved_by, r.created_at, r.updated_at, r.resolved_at";

#[derive(Debug, Clone, Default)]
pub struct DbReportFilter {
    pub status: Option<ReportStatus>,
    pub reporter_id: Option<MemberID>,
}

fn report_from_row(row: &Row<'_>) -> rusqlite::Result<Report> {
    Ok(Report {
        id: uuid_at(row, 0)?,
        reporter_id: uuid_at(row, 1)?,
        post_id: opt_uuid_at(row, 2)?,
        comment_id: opt_uuid_at(row, 3)?,
        reason: row.get(4)?,
        status: enum_at(row, 5)?,
        resolution_note: row.get(6)?,
        resolved_by: opt_uuid_at(row, 7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
        resolved_at: row.get(10)?,
    })
}

impl Db {
    pub fn insert_report(&self, report: &Report) -> Result<(), DbError> {
        self.conn.execute(
            "INSERT INTO reports (id, reporter_id, post_id, comment_id, reason, status,
                                  resolution_note, resolved_by, created_at, updated_at, resolved_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                report.id.to_string(),
                report.reporter_id.to_string(),
                opt_id(report.post_id),
                opt_id(report.comment_id),
                report.reason,
                report.status.to_string(),
                report.resolution_note,
                opt_id(report.resolved_by),
                report.created_at,
                report.updated_at,
                report.resolved_at,
            ],
        )?;
        Ok(())
    }

    pub fn get_report(&self, id: ReportID) -> Result<Option<Report>, DbError> {
        let sql = format!("SELECT {} FROM reports r WHERE r.id = ?1", REPORT_COLUMNS);
        Ok(self
            .conn
            .query_row(&sql, params![id.to_string()], report_from_row)
            .optional()?)
    }

    /// Whether `reporter_id` already has a pending report on the same target.
    pub fn has_pending_report(
        &self,
        reporter_id: MemberID,
        post_id: Option<PostID>,
        comment_id: Option<CommentID>,
    ) -> Result<bool, DbError> {
        Ok(self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM reports
                           WHERE reporter_id = ?1 AND status = 'pending'
                             AND post_id IS ?2 AND comment_id IS ?3)",
            params![reporter_id.to_string(), opt_id(post_id), opt_id(comment_id)],
            |row| row.get(0),
        )?)
    }

    /// Writes the resolution of a report that is still pending.
    pub fn update_report(&self, report: &Report) -> Result<bool, DbError> {
        let changed = self.conn.execute(
            "UPDATE reports
             SET status = ?2, resolution_note = ?3, resolved_by = ?4,
                 updated_at = ?5, resolved_at = ?6
             WHERE id = ?1 AND status = 'pending'",
            params![
                report.id.to_string(),
                report.status.to_string(),
                report.resolution_note,
                opt_id(report.resolved_by),
                report.updated_at,
                report.resolved_at,
            ],
        )?;
        Ok(changed > 0)
    }

    pub fn query_reports(
        &self,
        filter: &DbReportFilter,
        window: &PageWindow,
    ) -> Result<(i64, Vec<Report>), DbError> {
        let mut filters = Filters::new();
        if let Some(status) = filter.status {
            let n = filters.bind(status.to_string());
            filters.push(format!("r.status = ?{}", n));
        }
        if let Some(reporter_id) = filter.reporter_id {
            let n = filters.bind(reporter_id.to_string());
            filters.push(format!("r.reporter_id = ?{}", n));
        }

        let listing = Listing {
            columns: REPORT_COLUMNS,
            from: "reports r",
            alias: "r",
        };
        self.query_page(&listing, &filters, "r.created_at", window, report_from_row)
    }
}
