//! Error types for the library layer.

use std::fmt;

use rusqlite::ErrorCode;

use crate::db::DbError;

/// Errors produced by the library layer. Each variant maps onto one HTTP
/// status in the server adapter.
#[derive(Debug)]
pub enum ForumError {
    /// User-provided input failed validation.
    InvalidInput(String),
    /// No session, or the session is unknown or expired.
    Unauthorized(String),
    /// The caller is signed in but lacks the role or ownership required.
    Forbidden(String),
    /// The entity does not exist or has been soft-deleted.
    NotFound(String),
    /// Uniqueness, referential or state conflict.
    Conflict(String),
    /// A storage operation failed.
    Db(DbError),
    /// Anything else that is not the caller's fault.
    Internal(String),
}

impl ForumError {
    pub fn not_found(entity: &str, id: impl fmt::Display) -> Self {
        Self::NotFound(format!("{} {} not found", entity, id))
    }
}

impl fmt::Display for ForumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            Self::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::Conflict(msg) => write!(f, "Conflict: {}", msg),
            Self::Db(e) => write!(f, "Database error: {}", e),
            Self::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ForumError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Db(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DbError> for ForumError {
    fn from(e: DbError) -> Self {
        match &e {
            DbError::Sqlite(rusqlite::Error::SqliteFailure(code, msg))
                if code.code == ErrorCode::ConstraintViolation =>
            {
                Self::Conflict(
                    msg.clone()
                        .unwrap_or_else(|| "constraint violation".to_string()),
                )
            }
            _ => Self::Db(e),
        }
    }
}

impl From<rusqlite::Error> for ForumError {
    fn from(e: rusqlite::Error) -> Self {
        DbError::from(e).into()
    }
}

impl From<bcrypt::BcryptError> for ForumError {
    fn from(e: bcrypt::BcryptError) -> Self {
        Self::Internal(format!("password hashing failed: {}", e))
    }
}

impl From<crate::seed::SeedError> for ForumError {
    fn from(e: crate::seed::SeedError) -> Self {
        match e {
            crate::seed::SeedError::Db(e) => e.into(),
            other => Self::Internal(other.to_string()),
        }
    }
}
