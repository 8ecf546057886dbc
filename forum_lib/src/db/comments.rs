use chrono::{DateTime, Utc};
use forum_api::types::{Comment, CommentID, MemberID, PostID};
use forum_api::CommentSortBy;
use rusqlite::{params, OptionalExtension, Row};

use super::{like, opt_id, opt_uuid_at, uuid_at, Db, DbError, Filters, Listing};
use crate::pagination::PageWindow;

const COMMENT_COLUMNS: &str = "c.id, c.post_id, c.author_id, c.parent_id, c.body,
     c.created_at, c.updated_at, c.deleted_at";

#[derive(Debug, Clone)]
pub struct DbCommentFilter {
    pub post_id: PostID,
    pub author_id: Option<MemberID>,
    pub search: Option<String>,
    pub sort_by: CommentSortBy,
}

fn comment_from_row(row: &Row<'_>) -> rusqlite::Result<Comment> {
    Ok(Comment {
        id: uuid_at(row, 0)?,
        post_id: uuid_at(row, 1)?,
        author_id: uuid_at(row, 2)?,
        parent_id: opt_uuid_at(row, 3)?,
        body: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
        deleted_at: row.get(7)?,
    })
}

impl Db {
    pub fn insert_comment(&self, comment: &Comment) -> Result<(), DbError> {
        self.conn.execute(
            "INSERT INTO comments (id, post_id, author_id, parent_id, body,
                                   created_at, updated_at, deleted_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                comment.id.to_string(),
                comment.post_id.to_string(),
                comment.author_id.to_string(),
                opt_id(comment.parent_id),
                comment.body,
                comment.created_at,
                comment.updated_at,
                comment.deleted_at,
            ],
        )?;
        Ok(())
    }

    /// Active comment by id, regardless of which post it belongs to.
    pub fn get_comment(&self, id: CommentID) -> Result<Option<Comment>, DbError> {
        let sql = format!(
            "SELECT {} FROM comments c WHERE c.id = ?1 AND c.deleted_at IS NULL",
            COMMENT_COLUMNS
        );
        Ok(self
            .conn
            .query_row(&sql, params![id.to_string()], comment_from_row)
            .optional()?)
    }

    pub fn update_comment(&self, comment: &Comment) -> Result<bool, DbError> {
        let changed = self.conn.execute(
            "UPDATE comments SET body = ?2, updated_at = ?3
             WHERE id = ?1 AND deleted_at IS NULL",
            params![comment.id.to_string(), comment.body, comment.updated_at],
        )?;
        Ok(changed > 0)
    }

    pub fn erase_comment(&self, id: CommentID, at: DateTime<Utc>) -> Result<bool, DbError> {
        let changed = self.conn.execute(
            "UPDATE comments SET deleted_at = ?2, updated_at = ?2
             WHERE id = ?1 AND deleted_at IS NULL",
            params![id.to_string(), at],
        )?;
        Ok(changed > 0)
    }

    pub fn query_comments(
        &self,
        filter: &DbCommentFilter,
        window: &PageWindow,
    ) -> Result<(i64, Vec<Comment>), DbError> {
        let mut filters = Filters::new();
        filters.push("c.deleted_at IS NULL");
        let n = filters.bind(filter.post_id.to_string());
        filters.push(format!("c.post_id = ?{}", n));
        if let Some(author_id) = filter.author_id {
            let n = filters.bind(author_id.to_string());
            filters.push(format!("c.author_id = ?{}", n));
        }
        if let Some(ref search) = filter.search {
            let n = filters.bind(like(search));
            filters.push(format!("c.body LIKE ?{} ESCAPE '\\'", n));
        }

        let order_by = match filter.sort_by {
            CommentSortBy::CreatedAt => "c.created_at",
            CommentSortBy::UpdatedAt => "c.updated_at",
        };
        let listing = Listing {
            columns: COMMENT_COLUMNS,
            from: "comments c",
            alias: "c",
        };
        self.query_page(&listing, &filters, order_by, window, comment_from_row)
    }
}
