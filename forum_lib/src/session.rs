//! Opaque bearer tokens and password hashing.

use std::time::Duration;

use chrono::{DateTime, Utc};
use forum_api::types::MemberID;
use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::cache::MemoryCache;
use crate::error::ForumError;

const TOKEN_LENGTH: usize = 48;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub member_id: MemberID,
    pub expires_at: DateTime<Utc>,
}

/// Live sessions keyed by token. Sessions expire after the configured TTL and
/// do not survive a restart.
pub struct SessionStore {
    cache: MemoryCache<Session>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: MemoryCache::new(ttl),
        }
    }

    /// Issues a fresh token for `member_id`.
    pub fn issue(&self, member_id: MemberID) -> Result<(String, Session), ForumError> {
        let ttl = chrono::Duration::from_std(self.cache.ttl())
            .map_err(|e| ForumError::Internal(format!("session ttl out of range: {}", e)))?;
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LENGTH)
            .map(char::from)
            .collect();
        let session = Session {
            member_id,
            expires_at: Utc::now() + ttl,
        };
        self.cache.purge_expired();
        self.cache.set(token.clone(), session.clone());
        Ok((token, session))
    }

    pub fn lookup(&self, token: &str) -> Option<Session> {
        self.cache.get(token)
    }

    pub fn revoke(&self, token: &str) -> bool {
        self.cache.remove(token).is_some()
    }

    /// Drops every session belonging to `member_id`.
    pub fn revoke_member(&self, member_id: MemberID) {
        self.cache.retain(|session| session.member_id != member_id);
    }
}

pub fn hash_password(password: &str, cost: u32) -> Result<String, ForumError> {
    Ok(bcrypt::hash(password, cost)?)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, ForumError> {
    Ok(bcrypt::verify(password, hash)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn issued_token_resolves_to_member() {
        let store = SessionStore::new(Duration::from_secs(60));
        let member = Uuid::new_v4();
        let (token, session) = store.issue(member).unwrap();
        assert_eq!(token.len(), TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(store.lookup(&token), Some(session));
    }

    #[test]
    fn tokens_are_distinct() {
        let store = SessionStore::new(Duration::from_secs(60));
        let member = Uuid::new_v4();
        let (a, _) = store.issue(member).unwrap();
        let (b, _) = store.issue(member).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn revoke_forgets_token() {
        let store = SessionStore::new(Duration::from_secs(60));
        let (token, _) = store.issue(Uuid::new_v4()).unwrap();
        assert!(store.revoke(&token));
        assert!(store.lookup(&token).is_none());
        assert!(!store.revoke(&token));
    }

    #[test]
    fn revoke_member_only_touches_that_member() {
        let store = SessionStore::new(Duration::from_secs(60));
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let (a1, _) = store.issue(alice).unwrap();
        let (a2, _) = store.issue(alice).unwrap();
        let (b1, _) = store.issue(bob).unwrap();
        store.revoke_member(alice);
        assert!(store.lookup(&a1).is_none());
        assert!(store.lookup(&a2).is_none());
        assert!(store.lookup(&b1).is_some());
    }

    #[test]
    fn expired_session_is_gone() {
        let store = SessionStore::new(Duration::from_millis(1));
        let (token, _) = store.issue(Uuid::new_v4()).unwrap();
        std::thread::sleep(Duration::from_millis(10));
        assert!(store.lookup(&token).is_none());
    }

    #[test]
    fn password_round_trip() {
        let hash = hash_password("correct horse", 4).unwrap();
        assert_ne!(hash, "correct horse");
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("wrong horse", &hash).unwrap());
    }
}
