use chrono::{DateTime, Utc};
use forum_api::types::{Category, CategoryID};
use forum_api::CategorySortBy;
use rusqlite::{params, OptionalExtension, Row};

use super::{like, uuid_at, Db, DbError, Filters, Listing};
use crate::pagination::PageWindow;

const CATEGORY_COLUMNS: &str =
    "c.id, c.name, c.description, c.created_at, c.updated_at, c.deleted_at";

#[derive(Debug, Clone, Default)]
pub struct DbCategoryFilter {
    pub search: Option<String>,
    pub sort_by: CategorySortBy,
}

fn category_from_row(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: uuid_at(row, 0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
        deleted_at: row.get(5)?,
    })
}

impl Db {
    pub fn insert_category(&self, category: &Category) -> Result<(), DbError> {
        self.conn.execute(
            "INSERT INTO categories (id, name, description, created_at, updated_at, deleted_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                category.id.to_string(),
                category.name,
                category.description,
                category.created_at,
                category.updated_at,
                category.deleted_at,
            ],
        )?;
        Ok(())
    }

    pub fn get_category(&self, id: CategoryID) -> Result<Option<Category>, DbError> {
        let sql = format!(
            "SELECT {} FROM categories c WHERE c.id = ?1 AND c.deleted_at IS NULL",
            CATEGORY_COLUMNS
        );
        Ok(self
            .conn
            .query_row(&sql, params![id.to_string()], category_from_row)
            .optional()?)
    }

    /// Whether an active category other than `except` already uses `name` (case-insensitive).
    pub fn category_name_taken(
        &self,
        name: &str,
        except: Option<CategoryID>,
    ) -> Result<bool, DbError> {
        Ok(self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM categories
                           WHERE name = ?1 COLLATE NOCASE AND deleted_at IS NULL
                             AND (?2 IS NULL OR id <> ?2))",
            params![name, except.map(|id| id.to_string())],
            |row| row.get(0),
        )?)
    }

    pub fn count_active_categories(&self) -> Result<i64, DbError> {
        Ok(self.conn.query_row(
            "SELECT COUNT(*) FROM categories WHERE deleted_at IS NULL",
            [],
            |row| row.get(0),
        )?)
    }

    /// Active posts still filed under the category.
    pub fn count_category_posts(&self, id: CategoryID) -> Result<i64, DbError> {
        Ok(self.conn.query_row(
            "SELECT COUNT(*) FROM posts WHERE category_id = ?1 AND deleted_at IS NULL",
            params![id.to_string()],
            |row| row.get(0),
        )?)
    }

    pub fn update_category(&self, category: &Category) -> Result<bool, DbError> {
        let changed = self.conn.execute(
            "UPDATE categories SET name = ?2, description = ?3, updated_at = ?4
             WHERE id = ?1 AND deleted_at IS NULL",
            params![
                category.id.to_string(),
                category.name,
                category.description,
                category.updated_at,
            ],
        )?;
        Ok(changed > 0)
    }

    pub fn erase_category(&self, id: CategoryID, at: DateTime<Utc>) -> Result<bool, DbError> {
        let changed = self.conn.execute(
            "UPDATE categories SET deleted_at = ?2, updated_at = ?2
             WHERE id = ?1 AND deleted_at IS NULL",
            params![id.to_string(), at],
        )?;
        Ok(changed > 0)
    }

    pub fn query_categories(
        &self,
        filter: &DbCategoryFilter,
        window: &PageWindow,
    ) -> Result<(i64, Vec<Category>), DbError> {
        let mut filters = Filters::new();
        filters.push("c.deleted_at IS NULL");
        if let Some(ref search) = filter.search {
            let n = filters.bind(like(search));
            filters.push(format!(
                "(c.name LIKE ?{n} ESCAPE '\\' OR c.description LIKE ?{n} ESCAPE '\\')",
                n = n
            ));
        }

        let order_by = match filter.sort_by {
            CategorySortBy::Name => "c.name COLLATE NOCASE",
            CategorySortBy::CreatedAt => "c.created_at",
        };
        let listing = Listing {
            columns: CATEGORY_COLUMNS,
            from: "categories c",
            alias: "c",
        };
        self.query_page(&listing, &filters, order_by, window, category_from_row)
    }
}
