//! SQLite storage for the forum.

use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use rusqlite::types::{ToSql, Type};
use rusqlite::{Connection, Row};
use uuid::Uuid;

use crate::pagination::PageWindow;

mod categories;
mod comments;
mod members;
mod moderation;
mod notifications;
mod polls;
mod posts;
mod reports;

pub use self::categories::DbCategoryFilter;
pub use self::comments::DbCommentFilter;
pub use self::members::DbMemberFilter;
pub use self::moderation::DbModerationFilter;
pub use self::notifications::DbNotificationFilter;
pub use self::posts::DbPostFilter;
pub use self::reports::DbReportFilter;

#[derive(thiserror::Error, Debug)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub struct Db {
    conn: Connection,
}

impl Db {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    #[doc(hidden)]
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn init(&self) -> Result<(), DbError> {
        // Migrations run before the DDL so that indexes in the schema can
        // reference columns added by them.
        let version: i32 = self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))?;

        if version < 1 {
            self.migrate_v1()?;
            self.conn.pragma_update(None, "user_version", 1)?;
        }

        if version < 2 {
            self.migrate_v2()?;
            self.conn.pragma_update(None, "user_version", 2)?;
        }

        let schema = include_str!("../../../schema/sqlite.sql");
        self.conn.execute_batch(schema)?;

        Ok(())
    }

    /// Member suspension flag.
    fn migrate_v1(&self) -> Result<(), DbError> {
        self.add_columns(&["ALTER TABLE members ADD COLUMN suspended INTEGER NOT NULL DEFAULT 0"])
    }

    /// Soft delete for notifications.
    fn migrate_v2(&self) -> Result<(), DbError> {
        self.add_columns(&["ALTER TABLE notifications ADD COLUMN deleted_at TEXT"])
    }

    fn add_columns(&self, statements: &[&str]) -> Result<(), DbError> {
        for sql in statements {
            match self.conn.execute(sql, []) {
                Ok(_) => {}
                Err(rusqlite::Error::SqliteFailure(_, Some(ref msg)))
                    if msg.contains("duplicate column name") || msg.contains("no such table") => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Runs a filtered, paged listing: one `COUNT(*)` over the filtered rows and
    /// one windowed `SELECT` ordered by `order_by` with `id` as tie-break.
    fn query_page<T>(
        &self,
        listing: &Listing<'_>,
        filters: &Filters,
        order_by: &str,
        window: &PageWindow,
        map_row: impl FnMut(&Row<'_>) -> rusqlite::Result<T>,
    ) -> Result<(i64, Vec<T>), DbError> {
        let where_clause = filters.where_clause();
        let params = filters.params();

        let count_sql = format!("SELECT COUNT(*) FROM {} {}", listing.from, where_clause);
        let records: i64 = self
            .conn
            .query_row(&count_sql, params.as_slice(), |row| row.get(0))?;

        let direction = window.sort_direction.as_sql();
        let sql = format!(
            "SELECT {} FROM {} {} ORDER BY {} {}, {}.id {} LIMIT {} OFFSET {}",
            listing.columns,
            listing.from,
            where_clause,
            order_by,
            direction,
            listing.alias,
            direction,
            window.limit,
            window.offset()
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params.as_slice(), map_row)?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok((records, result))
    }
}

/// The fixed parts of a listing query. `from` is everything between `FROM` and
/// the filters; `alias` names the table whose `id` breaks ordering ties.
pub(crate) struct Listing<'a> {
    pub columns: &'a str,
    pub from: &'a str,
    pub alias: &'a str,
}

/// `WHERE` clause builder with numbered `?N` parameters.
#[derive(Default)]
pub(crate) struct Filters {
    clauses: Vec<String>,
    params: Vec<Box<dyn ToSql>>,
}

impl Filters {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Binds a value and returns its parameter index.
    pub(crate) fn bind(&mut self, value: impl ToSql + 'static) -> usize {
        self.params.push(Box::new(value));
        self.params.len()
    }

    pub(crate) fn push(&mut self, clause: impl Into<String>) {
        self.clauses.push(clause.into());
    }

    pub(crate) fn where_clause(&self) -> String {
        if self.clauses.is_empty() {
            "WHERE 1=1".to_string()
        } else {
            format!("WHERE {}", self.clauses.join(" AND "))
        }
    }

    pub(crate) fn params(&self) -> Vec<&dyn ToSql> {
        self.params.iter().map(|p| p.as_ref()).collect()
    }
}

/// Current time at microsecond precision, the resolution timestamps are stored at.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// `%term%` for `LIKE ... ESCAPE '\'` matching, with the term's own
/// wildcards escaped so it matches literally.
pub(crate) fn like(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

pub(crate) fn uuid_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
    let raw: String = row.get(idx)?;
    Uuid::parse_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn opt_uuid_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<Uuid>> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|s| {
        Uuid::parse_str(&s)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    })
    .transpose()
}

/// Reads a text column into one of the wire enums.
pub(crate) fn enum_at<T: FromStr>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    raw.parse::<T>().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("unknown value '{}'", raw).into(),
        )
    })
}

pub(crate) fn opt_id(id: Option<Uuid>) -> Option<String> {
    id.map(|id| id.to_string())
}

#[cfg(test)]
mod tests;
