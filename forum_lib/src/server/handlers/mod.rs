//! Route handlers grouped by resource.

pub mod auth;
pub mod categories;
pub mod comments;
pub mod health;
pub mod members;
pub mod moderation;
pub mod notifications;
pub mod polls;
pub mod posts;
pub mod reports;

use crate::error::ForumError;

use super::error::HttpError;

/// Runs CPU-heavy work (password hashing) off the async workers.
pub(crate) async fn blocking<T, F>(work: F) -> Result<T, HttpError>
where
    F: FnOnce() -> Result<T, ForumError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| HttpError::Internal(format!("worker task failed: {}", e)))?
        .map_err(HttpError::from)
}
