//! Business rules of the board, one `impl Forum` block per entity.
//!
//! Every operation takes the acting member where the rules need one and
//! returns a [`ForumError`] that the HTTP layer maps onto a status code.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use forum_api::types::{Member, MemberID, Notification, NotificationKind, Role};
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::db::{now, Db};
use crate::error::ForumError;
use crate::seed::seed_categories;
use crate::session::SessionStore;

mod auth;
mod categories;
mod comments;
mod members;
mod moderation;
mod notifications;
mod polls;
mod posts;
mod reports;

pub struct Forum {
    db: Mutex<Db>,
    sessions: SessionStore,
    bcrypt_cost: u32,
}

impl Forum {
    pub fn new(db: Db, session_ttl: Duration, bcrypt_cost: u32) -> Self {
        Self {
            db: Mutex::new(db),
            sessions: SessionStore::new(session_ttl),
            bcrypt_cost,
        }
    }

    /// Opens the configured database, applies migrations and seeds default
    /// categories on an empty board.
    pub fn open(config: &ServerConfig) -> Result<Self, ForumError> {
        let db = Db::open(&config.database)?;
        Self::prepare(db, config)
    }

    /// Same as [`Forum::open`] against a fresh in-memory database.
    pub fn open_in_memory(config: &ServerConfig) -> Result<Self, ForumError> {
        Self::prepare(Db::open_in_memory()?, config)
    }

    fn prepare(db: Db, config: &ServerConfig) -> Result<Self, ForumError> {
        db.init()?;
        seed_categories(&db)?;
        Ok(Self::new(db, config.session_ttl(), config.bcrypt_cost))
    }

    pub(crate) fn db(&self) -> MutexGuard<'_, Db> {
        self.db.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Resolves a bearer token to its live member.
    pub fn authenticate(&self, token: &str) -> Result<Member, ForumError> {
        let session = self
            .sessions
            .lookup(token)
            .ok_or_else(|| ForumError::Unauthorized("invalid or expired session".to_string()))?;
        match self.db().get_member(session.member_id)? {
            Some(member) => Ok(member),
            None => {
                self.sessions.revoke(token);
                Err(ForumError::Unauthorized("member no longer exists".to_string()))
            }
        }
    }
}

fn require_role(actor: &Member, role: Role) -> Result<(), ForumError> {
    if actor.role < role {
        return Err(ForumError::Forbidden(format!("requires the {} role", role)));
    }
    Ok(())
}

fn require_staff(actor: &Member) -> Result<(), ForumError> {
    require_role(actor, Role::Moderator)
}

/// Suspended members can read but not contribute.
fn require_active(actor: &Member) -> Result<(), ForumError> {
    if actor.suspended {
        return Err(ForumError::Forbidden("member is suspended".to_string()));
    }
    Ok(())
}

fn require_owner_or_staff(actor: &Member, owner: MemberID, what: &str) -> Result<(), ForumError> {
    if actor.id != owner && !actor.role.is_staff() {
        return Err(ForumError::Forbidden(format!(
            "only the author or a moderator can modify this {}",
            what
        )));
    }
    Ok(())
}

fn require_self_or_admin(actor: &Member, member: MemberID) -> Result<(), ForumError> {
    if actor.id != member && actor.role != Role::Administrator {
        return Err(ForumError::Forbidden(
            "only the member or an administrator can modify this account".to_string(),
        ));
    }
    Ok(())
}

fn notification(
    member_id: MemberID,
    kind: NotificationKind,
    message: String,
) -> Notification {
    Notification {
        id: Uuid::new_v4(),
        member_id,
        kind,
        message,
        post_id: None,
        comment_id: None,
        read_at: None,
        created_at: now(),
        deleted_at: None,
    }
}
