//! Typed SDK for the forum REST API: DTOs, the pagination envelope, list-query
//! builders and an async HTTP client.

mod client;
mod errors;
mod query;
pub mod types;
pub use self::client::Client;
pub use self::errors::Error;
pub use self::query::{
    CategoryQuery, CategorySortBy, CommentQuery, CommentSortBy, MemberQuery, MemberSortBy,
    ModerationActionQuery, NotificationQuery, PostQuery, PostSortBy, Query, QueryCommon,
    ReportQuery, SortDirection, DEFAULT_LIMIT, MAX_LIMIT,
};
