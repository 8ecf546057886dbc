use forum_api::types::{Member, Notification, NotificationID, Page};
use forum_api::NotificationQuery;

use super::Forum;
use crate::db::{now, Db, DbNotificationFilter};
use crate::error::ForumError;
use crate::pagination::PageWindow;

fn own_notification(
    db: &Db,
    actor: &Member,
    id: NotificationID,
) -> Result<Notification, ForumError> {
    let notification = db
        .get_notification(id)?
        .ok_or_else(|| ForumError::not_found("notification", id))?;
    if notification.member_id != actor.id {
        return Err(ForumError::Forbidden(
            "notifications are visible to their recipient only".to_string(),
        ));
    }
    Ok(notification)
}

impl Forum {
    /// The caller's own notifications, newest first by default.
    pub fn list_notifications(
        &self,
        actor: &Member,
        query: &NotificationQuery,
    ) -> Result<Page<Notification>, ForumError> {
        let window = PageWindow::resolve(&query.common)?;
        let filter = DbNotificationFilter {
            member_id: actor.id,
            unread_only: query.unread_only,
        };
        let (records, notifications) = self.db().query_notifications(&filter, &window)?;
        Ok(window.into_page(records, notifications))
    }

    /// Marks a notification read. Reading it again keeps the first `read_at`.
    pub fn read_notification(
        &self,
        actor: &Member,
        id: NotificationID,
    ) -> Result<Notification, ForumError> {
        let db = self.db();
        own_notification(&db, actor, id)?;
        db.mark_notification_read(id, now())?;
        own_notification(&db, actor, id)
    }

    pub fn erase_notification(
        &self,
        actor: &Member,
        id: NotificationID,
    ) -> Result<Notification, ForumError> {
        let db = self.db();
        let notification = own_notification(&db, actor, id)?;
        let at = now();
        db.erase_notification(id, at)?;
        Ok(Notification {
            deleted_at: Some(at),
            ..notification
        })
    }
}
