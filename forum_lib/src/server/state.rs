//! Shared application state type.

use std::sync::Arc;

use crate::service::Forum;

/// State shared across all handlers.
pub type AppState = Arc<Forum>;
