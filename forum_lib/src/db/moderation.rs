use forum_api::types::{MemberID, ModerationAction, ModerationActionID, ModerationActionType};
use rusqlite::{params, OptionalExtension, Row};

use super::{enum_at, opt_id, opt_uuid_at, uuid_at, Db, DbError, Filters, Listing};
use crate::pagination::PageWindow;

const ACTION_COLUMNS: &str = "a.id, a.moderator_id, a.action_type, a.member_id, a.post_id,
     a.comment_id, a.report_id, a.reason, a.created_at";

#[derive(Debug, Clone, Default)]
pub struct DbModerationFilter {
    pub action_type: Option<ModerationActionType>,
    pub moderator_id: Option<MemberID>,
    pub member_id: Option<MemberID>,
}

fn action_from_row(row: &Row<'_>) -> rusqlite::Result<ModerationAction> {
    Ok(ModerationAction {
        id: uuid_at(row, 0)?,
        moderator_id: uuid_at(row, 1)?,
        action_type: enum_at(row, 2)?,
        member_id: opt_uuid_at(row, 3)?,
        post_id: opt_uuid_at(row, 4)?,
        comment_id: opt_uuid_at(row, 5)?,
        report_id: opt_uuid_at(row, 6)?,
        reason: row.get(7)?,
        created_at: row.get(8)?,
    })
}

impl Db {
    pub fn insert_moderation_action(&self, action: &ModerationAction) -> Result<(), DbError> {
        self.conn.execute(
            "INSERT INTO moderation_actions (id, moderator_id, action_type, member_id, post_id,
                                             comment_id, report_id, reason, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                action.id.to_string(),
                action.moderator_id.to_string(),
                action.action_type.to_string(),
                opt_id(action.member_id),
                opt_id(action.post_id),
                opt_id(action.comment_id),
                opt_id(action.report_id),
                action.reason,
                action.created_at,
            ],
        )?;
        Ok(())
    }

    pub fn get_moderation_action(
        &self,
        id: ModerationActionID,
    ) -> Result<Option<ModerationAction>, DbError> {
        let sql = format!(
            "SELECT {} FROM moderation_actions a WHERE a.id = ?1",
            ACTION_COLUMNS
        );
        Ok(self
            .conn
            .query_row(&sql, params![id.to_string()], action_from_row)
            .optional()?)
    }

    pub fn query_moderation_actions(
        &self,
        filter: &DbModerationFilter,
        window: &PageWindow,
    ) -> Result<(i64, Vec<ModerationAction>), DbError> {
        let mut filters = Filters::new();
        if let Some(action_type) = filter.action_type {
            let n = filters.bind(action_type.to_string());
            filters.push(format!("a.action_type = ?{}", n));
        }
        if let Some(moderator_id) = filter.moderator_id {
            let n = filters.bind(moderator_id.to_string());
            filters.push(format!("a.moderator_id = ?{}", n));
        }
        if let Some(member_id) = filter.member_id {
            let n = filters.bind(member_id.to_string());
            filters.push(format!("a.member_id = ?{}", n));
        }

        let listing = Listing {
            columns: ACTION_COLUMNS,
            from: "moderation_actions a",
            alias: "a",
        };
        self.query_page(&listing, &filters, "a.created_at", window, action_from_row)
    }
}
