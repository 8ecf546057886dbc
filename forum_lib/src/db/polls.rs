use chrono::{DateTime, Utc};
use forum_api::types::{MemberID, Poll, PollID, PollOption, PollVote, PostID};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{uuid_at, Db, DbError};

const POLL_COLUMNS: &str = "p.id, p.post_id, p.question, p.closes_at, p.created_at, p.deleted_at";

fn poll_from_row(row: &Row<'_>) -> rusqlite::Result<Poll> {
    Ok(Poll {
        id: uuid_at(row, 0)?,
        post_id: uuid_at(row, 1)?,
        question: row.get(2)?,
        options: Vec::new(),
        total_votes: 0,
        closes_at: row.get(3)?,
        created_at: row.get(4)?,
        deleted_at: row.get(5)?,
    })
}

/// Options in display order, each with its current vote count.
fn load_options(conn: &Connection, poll_id: PollID) -> Result<Vec<PollOption>, DbError> {
    let mut stmt = conn.prepare_cached(
        "SELECT o.id, o.label, o.position,
                (SELECT COUNT(*) FROM poll_votes v WHERE v.option_id = o.id)
         FROM poll_options o
         WHERE o.poll_id = ?1
         ORDER BY o.position",
    )?;
    let rows = stmt.query_map(params![poll_id.to_string()], |row| {
        Ok(PollOption {
            id: uuid_at(row, 0)?,
            label: row.get(1)?,
            position: row.get(2)?,
            votes: row.get(3)?,
        })
    })?;
    let mut options = Vec::new();
    for row in rows {
        options.push(row?);
    }
    Ok(options)
}

impl Db {
    fn fill_poll(&self, poll: Option<Poll>) -> Result<Option<Poll>, DbError> {
        match poll {
            Some(mut poll) => {
                poll.options = load_options(&self.conn, poll.id)?;
                poll.total_votes = poll.options.iter().map(|o| o.votes).sum();
                Ok(Some(poll))
            }
            None => Ok(None),
        }
    }

    /// Inserts the poll and its options atomically.
    pub fn insert_poll(&mut self, poll: &Poll) -> Result<(), DbError> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO polls (id, post_id, question, closes_at, created_at, deleted_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                poll.id.to_string(),
                poll.post_id.to_string(),
                poll.question,
                poll.closes_at,
                poll.created_at,
                poll.deleted_at,
            ],
        )?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO poll_options (id, poll_id, label, position) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for option in &poll.options {
                stmt.execute(params![
                    option.id.to_string(),
                    poll.id.to_string(),
                    option.label,
                    option.position,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    pub fn get_poll(&self, id: PollID) -> Result<Option<Poll>, DbError> {
        let sql = format!(
            "SELECT {} FROM polls p WHERE p.id = ?1 AND p.deleted_at IS NULL",
            POLL_COLUMNS
        );
        let poll = self
            .conn
            .query_row(&sql, params![id.to_string()], poll_from_row)
            .optional()?;
        self.fill_poll(poll)
    }

    /// The active poll attached to a post, if any.
    pub fn get_post_poll(&self, post_id: PostID) -> Result<Option<Poll>, DbError> {
        let sql = format!(
            "SELECT {} FROM polls p WHERE p.post_id = ?1 AND p.deleted_at IS NULL",
            POLL_COLUMNS
        );
        let poll = self
            .conn
            .query_row(&sql, params![post_id.to_string()], poll_from_row)
            .optional()?;
        self.fill_poll(poll)
    }

    pub fn erase_poll(&self, id: PollID, at: DateTime<Utc>) -> Result<bool, DbError> {
        let changed = self.conn.execute(
            "UPDATE polls SET deleted_at = ?2 WHERE id = ?1 AND deleted_at IS NULL",
            params![id.to_string(), at],
        )?;
        Ok(changed > 0)
    }

    pub fn has_voted(&self, poll_id: PollID, member_id: MemberID) -> Result<bool, DbError> {
        Ok(self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM poll_votes WHERE poll_id = ?1 AND member_id = ?2)",
            params![poll_id.to_string(), member_id.to_string()],
            |row| row.get(0),
        )?)
    }

    pub fn insert_vote(&self, vote: &PollVote) -> Result<(), DbError> {
        self.conn.execute(
            "INSERT INTO poll_votes (id, poll_id, option_id, member_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                vote.id.to_string(),
                vote.poll_id.to_string(),
                vote.option_id.to_string(),
                vote.member_id.to_string(),
                vote.created_at,
            ],
        )?;
        Ok(())
    }
}
