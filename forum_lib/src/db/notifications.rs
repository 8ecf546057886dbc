use chrono::{DateTime, Utc};
use forum_api::types::{MemberID, Notification, NotificationID};
use rusqlite::{params, OptionalExtension, Row};

use super::{enum_at, opt_id, opt_uuid_at, uuid_at, Db, DbError, Filters, Listing};
use crate::pagination::PageWindow;

const NOTIFICATION_COLUMNS: &str = "n.id, n.member_id, n.kind, n.message, n.post_id,
     n.comment_id, n.read_at, n.created_at, n.deleted_at";

#[derive(Debug, Clone)]
pub struct DbNotificationFilter {
    pub member_id: MemberID,
    pub unread_only: bool,
}

fn notification_from_row(row: &Row<'_>) -> rusqlite::Result<Notification> {
    Ok(Notification {
        id: uuid_at(row, 0)?,
        member_id: uuid_at(row, 1)?,
        kind: enum_at(row, 2)?,
        message: row.get(3)?,
        post_id: opt_uuid_at(row, 4)?,
        comment_id: opt_uuid_at(row, 5)?,
        read_at: row.get(6)?,
        created_at: row.get(7)?,
        deleted_at: row.get(8)?,
    })
}

impl Db {
    pub fn insert_notification(&self, notification: &Notification) -> Result<(), DbError> {
        self.conn.execute(
            "INSERT INTO notifications (id, member_id, kind, message, post_id, comment_id,
                                        read_at, created_at, deleted_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                notification.id.to_string(),
                notification.member_id.to_string(),
                notification.kind.to_string(),
                notification.message,
                opt_id(notification.post_id),
                opt_id(notification.comment_id),
                notification.read_at,
                notification.created_at,
                notification.deleted_at,
            ],
        )?;
        Ok(())
    }

    pub fn get_notification(&self, id: NotificationID) -> Result<Option<Notification>, DbError> {
        let sql = format!(
            "SELECT {} FROM notifications n WHERE n.id = ?1 AND n.deleted_at IS NULL",
            NOTIFICATION_COLUMNS
        );
        Ok(self
            .conn
            .query_row(&sql, params![id.to_string()], notification_from_row)
            .optional()?)
    }

    /// Sets `read_at` unless it is already set.
    pub fn mark_notification_read(
        &self,
        id: NotificationID,
        at: DateTime<Utc>,
    ) -> Result<bool, DbError> {
        let changed = self.conn.execute(
            "UPDATE notifications SET read_at = ?2
             WHERE id = ?1 AND read_at IS NULL AND deleted_at IS NULL",
            params![id.to_string(), at],
        )?;
        Ok(changed > 0)
    }

    pub fn erase_notification(
        &self,
        id: NotificationID,
        at: DateTime<Utc>,
    ) -> Result<bool, DbError> {
        let changed = self.conn.execute(
            "UPDATE notifications SET deleted_at = ?2 WHERE id = ?1 AND deleted_at IS NULL",
            params![id.to_string(), at],
        )?;
        Ok(changed > 0)
    }

    pub fn query_notifications(
        &self,
        filter: &DbNotificationFilter,
        window: &PageWindow,
    ) -> Result<(i64, Vec<Notification>), DbError> {
        let mut filters = Filters::new();
        filters.push("n.deleted_at IS NULL");
        let n = filters.bind(filter.member_id.to_string());
        filters.push(format!("n.member_id = ?{}", n));
        if filter.unread_only {
            filters.push("n.read_at IS NULL");
        }

        let listing = Listing {
            columns: NOTIFICATION_COLUMNS,
            from: "notifications n",
            alias: "n",
        };
        self.query_page(&listing, &filters, "n.created_at", window, notification_from_row)
    }
}
