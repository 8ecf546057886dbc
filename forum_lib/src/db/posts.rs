use chrono::{DateTime, Utc};
use forum_api::types::{CategoryID, MemberID, Post, PostID, PostSummary};
use forum_api::PostSortBy;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{like, uuid_at, Db, DbError, Filters, Listing};
use crate::pagination::PageWindow;

const POST_COLUMNS: &str = "p.id, p.category_id, p.author_id, p.title, p.body,
     p.created_at, p.updated_at, p.deleted_at";

const POST_SUMMARY_COLUMNS: &str = "p.id, p.category_id, p.author_id, p.title,
     (SELECT COUNT(*) FROM comments cm WHERE cm.post_id = p.id AND cm.deleted_at IS NULL),
     p.created_at, p.updated_at";

#[derive(Debug, Clone, Default)]
pub struct DbPostFilter {
    pub category_id: Option<CategoryID>,
    pub author_id: Option<MemberID>,
    pub search: Option<String>,
    pub tag: Option<String>,
    pub sort_by: PostSortBy,
}

fn post_from_row(row: &Row<'_>) -> rusqlite::Result<Post> {
    Ok(Post {
        id: uuid_at(row, 0)?,
        category_id: uuid_at(row, 1)?,
        author_id: uuid_at(row, 2)?,
        title: row.get(3)?,
        body: row.get(4)?,
        tags: Vec::new(),
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
        deleted_at: row.get(7)?,
    })
}

fn post_summary_from_row(row: &Row<'_>) -> rusqlite::Result<PostSummary> {
    Ok(PostSummary {
        id: uuid_at(row, 0)?,
        category_id: uuid_at(row, 1)?,
        author_id: uuid_at(row, 2)?,
        title: row.get(3)?,
        tags: Vec::new(),
        comment_count: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

fn load_tags(conn: &Connection, post_id: PostID) -> Result<Vec<String>, DbError> {
    let mut stmt =
        conn.prepare_cached("SELECT tag FROM post_tags WHERE post_id = ?1 ORDER BY position")?;
    let rows = stmt.query_map(params![post_id.to_string()], |row| row.get(0))?;
    let mut tags = Vec::new();
    for row in rows {
        tags.push(row?);
    }
    Ok(tags)
}

fn write_tags(conn: &Connection, post_id: PostID, tags: &[String]) -> Result<(), DbError> {
    conn.execute(
        "DELETE FROM post_tags WHERE post_id = ?1",
        params![post_id.to_string()],
    )?;
    let mut stmt =
        conn.prepare_cached("INSERT INTO post_tags (post_id, tag, position) VALUES (?1, ?2, ?3)")?;
    for (position, tag) in tags.iter().enumerate() {
        stmt.execute(params![post_id.to_string(), tag, position as i64])?;
    }
    Ok(())
}

impl Db {
    /// Inserts the post and its tags atomically.
    pub fn insert_post(&mut self, post: &Post) -> Result<(), DbError> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO posts (id, category_id, author_id, title, body,
                                created_at, updated_at, deleted_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                post.id.to_string(),
                post.category_id.to_string(),
                post.author_id.to_string(),
                post.title,
                post.body,
                post.created_at,
                post.updated_at,
                post.deleted_at,
            ],
        )?;
        write_tags(&tx, post.id, &post.tags)?;
        tx.commit()?;
        Ok(())
    }

    pub fn get_post(&self, id: PostID) -> Result<Option<Post>, DbError> {
        let sql = format!(
            "SELECT {} FROM posts p WHERE p.id = ?1 AND p.deleted_at IS NULL",
            POST_COLUMNS
        );
        let post = self
            .conn
            .query_row(&sql, params![id.to_string()], post_from_row)
            .optional()?;
        match post {
            Some(mut post) => {
                post.tags = load_tags(&self.conn, post.id)?;
                Ok(Some(post))
            }
            None => Ok(None),
        }
    }

    pub fn update_post(&self, post: &Post) -> Result<bool, DbError> {
        let changed = self.conn.execute(
            "UPDATE posts SET category_id = ?2, title = ?3, body = ?4, updated_at = ?5
             WHERE id = ?1 AND deleted_at IS NULL",
            params![
                post.id.to_string(),
                post.category_id.to_string(),
                post.title,
                post.body,
                post.updated_at,
            ],
        )?;
        Ok(changed > 0)
    }

    /// Replaces the tag set of an active post.
    pub fn set_post_tags(
        &mut self,
        id: PostID,
        tags: &[String],
        at: DateTime<Utc>,
    ) -> Result<bool, DbError> {
        let tx = self.conn.transaction()?;
        let changed = tx.execute(
            "UPDATE posts SET updated_at = ?2 WHERE id = ?1 AND deleted_at IS NULL",
            params![id.to_string(), at],
        )?;
        if changed == 0 {
            return Ok(false);
        }
        write_tags(&tx, id, tags)?;
        tx.commit()?;
        Ok(true)
    }

    pub fn erase_post(&self, id: PostID, at: DateTime<Utc>) -> Result<bool, DbError> {
        let changed = self.conn.execute(
            "UPDATE posts SET deleted_at = ?2, updated_at = ?2
             WHERE id = ?1 AND deleted_at IS NULL",
            params![id.to_string(), at],
        )?;
        Ok(changed > 0)
    }

    pub fn query_posts(
        &self,
        filter: &DbPostFilter,
        window: &PageWindow,
    ) -> Result<(i64, Vec<PostSummary>), DbError> {
        let mut filters = Filters::new();
        filters.push("p.deleted_at IS NULL");
        if let Some(category_id) = filter.category_id {
            let n = filters.bind(category_id.to_string());
            filters.push(format!("p.category_id = ?{}", n));
        }
        if let Some(author_id) = filter.author_id {
            let n = filters.bind(author_id.to_string());
            filters.push(format!("p.author_id = ?{}", n));
        }
        if let Some(ref search) = filter.search {
            let n = filters.bind(like(search));
            filters.push(format!(
                "(p.title LIKE ?{n} ESCAPE '\\' OR p.body LIKE ?{n} ESCAPE '\\')",
                n = n
            ));
        }
        if let Some(ref tag) = filter.tag {
            let n = filters.bind(tag.clone());
            filters.push(format!(
                "EXISTS (SELECT 1 FROM post_tags pt WHERE pt.post_id = p.id AND pt.tag = ?{})",
                n
            ));
        }

        let order_by = match filter.sort_by {
            PostSortBy::CreatedAt => "p.created_at",
            PostSortBy::UpdatedAt => "p.updated_at",
            PostSortBy::Title => "p.title COLLATE NOCASE",
        };
        let listing = Listing {
            columns: POST_SUMMARY_COLUMNS,
            from: "posts p",
            alias: "p",
        };
        let (records, mut posts) =
            self.query_page(&listing, &filters, order_by, window, post_summary_from_row)?;
        for post in &mut posts {
            post.tags = load_tags(&self.conn, post.id)?;
        }
        Ok((records, posts))
    }
}
