use chrono::{DateTime, Utc};
use forum_api::types::{Member, MemberID, Role};
use forum_api::MemberSortBy;
use rusqlite::{params, OptionalExtension, Row};

use super::{enum_at, like, uuid_at, Db, DbError, Filters, Listing};
use crate::pagination::PageWindow;

const MEMBER_COLUMNS: &str = "m.id, m.email, m.username, m.display_name, m.bio, m.role,
     m.suspended, m.created_at, m.updated_at, m.deleted_at";

#[derive(Debug, Clone, Default)]
pub struct DbMemberFilter {
    pub search: Option<String>,
    pub role: Option<Role>,
    pub sort_by: MemberSortBy,
}

fn member_from_row(row: &Row<'_>) -> rusqlite::Result<Member> {
    Ok(Member {
        id: uuid_at(row, 0)?,
        email: row.get(1)?,
        username: row.get(2)?,
        display_name: row.get(3)?,
        bio: row.get(4)?,
        role: enum_at(row, 5)?,
        suspended: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
        deleted_at: row.get(9)?,
    })
}

impl Db {
    pub fn insert_member(&self, member: &Member, password_hash: &str) -> Result<(), DbError> {
        self.conn.execute(
            "INSERT INTO members (id, email, username, password_hash, display_name, bio,
                                  role, suspended, created_at, updated_at, deleted_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                member.id.to_string(),
                member.email,
                member.username,
                password_hash,
                member.display_name,
                member.bio,
                member.role.to_string(),
                member.suspended,
                member.created_at,
                member.updated_at,
                member.deleted_at,
            ],
        )?;
        Ok(())
    }

    /// Number of members ever registered, erased ones included.
    pub fn count_members(&self) -> Result<i64, DbError> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM members", [], |row| row.get(0))?)
    }

    /// Whether `email` or `username` is already taken, erased members included.
    pub fn member_identity_taken(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<&'static str>, DbError> {
        let (email_taken, username_taken): (bool, bool) = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM members WHERE email = ?1),
                    EXISTS(SELECT 1 FROM members WHERE username = ?2)",
            params![email, username],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok(if email_taken {
            Some("email")
        } else if username_taken {
            Some("username")
        } else {
            None
        })
    }

    /// Active member by id.
    pub fn get_member(&self, id: MemberID) -> Result<Option<Member>, DbError> {
        let sql = format!(
            "SELECT {} FROM members m WHERE m.id = ?1 AND m.deleted_at IS NULL",
            MEMBER_COLUMNS
        );
        Ok(self
            .conn
            .query_row(&sql, params![id.to_string()], member_from_row)
            .optional()?)
    }

    /// Active member by username.
    pub fn find_member_by_username(&self, username: &str) -> Result<Option<Member>, DbError> {
        let sql = format!(
            "SELECT {} FROM members m WHERE m.username = ?1 AND m.deleted_at IS NULL",
            MEMBER_COLUMNS
        );
        Ok(self
            .conn
            .query_row(&sql, params![username], member_from_row)
            .optional()?)
    }

    /// Active member by email, with the stored password hash.
    pub fn member_credentials(&self, email: &str) -> Result<Option<(Member, String)>, DbError> {
        let sql = format!(
            "SELECT {}, m.password_hash FROM members m
             WHERE m.email = ?1 AND m.deleted_at IS NULL",
            MEMBER_COLUMNS
        );
        Ok(self
            .conn
            .query_row(&sql, params![email], |row| {
                Ok((member_from_row(row)?, row.get(10)?))
            })
            .optional()?)
    }

    /// Writes the mutable profile fields, role and suspension flag.
    pub fn update_member(&self, member: &Member) -> Result<bool, DbError> {
        let changed = self.conn.execute(
            "UPDATE members
             SET display_name = ?2, bio = ?3, role = ?4, suspended = ?5, updated_at = ?6
             WHERE id = ?1 AND deleted_at IS NULL",
            params![
                member.id.to_string(),
                member.display_name,
                member.bio,
                member.role.to_string(),
                member.suspended,
                member.updated_at,
            ],
        )?;
        Ok(changed > 0)
    }

    pub fn erase_member(&self, id: MemberID, at: DateTime<Utc>) -> Result<bool, DbError> {
        let changed = self.conn.execute(
            "UPDATE members SET deleted_at = ?2, updated_at = ?2
             WHERE id = ?1 AND deleted_at IS NULL",
            params![id.to_string(), at],
        )?;
        Ok(changed > 0)
    }

    pub fn query_members(
        &self,
        filter: &DbMemberFilter,
        window: &PageWindow,
    ) -> Result<(i64, Vec<Member>), DbError> {
        let mut filters = Filters::new();
        filters.push("m.deleted_at IS NULL");
        if let Some(ref search) = filter.search {
            let n = filters.bind(like(search));
            filters.push(format!(
                "(m.username LIKE ?{n} ESCAPE '\\' OR m.email LIKE ?{n} ESCAPE '\\')",
                n = n
            ));
        }
        if let Some(role) = filter.role {
            let n = filters.bind(role.to_string());
            filters.push(format!("m.role = ?{}", n));
        }

        let order_by = match filter.sort_by {
            MemberSortBy::CreatedAt => "m.created_at",
            MemberSortBy::Username => "m.username",
        };
        let listing = Listing {
            columns: MEMBER_COLUMNS,
            from: "members m",
            alias: "m",
        };
        self.query_page(&listing, &filters, order_by, window, member_from_row)
    }
}
