mod common;
pub use self::common::{Query, QueryCommon, SortDirection, DEFAULT_LIMIT, MAX_LIMIT};
mod lenient;

mod member;
pub use self::member::{MemberQuery, MemberSortBy};

mod category;
pub use self::category::{CategoryQuery, CategorySortBy};

mod post;
pub use self::post::{PostQuery, PostSortBy};

mod comment;
pub use self::comment::{CommentQuery, CommentSortBy};

mod report;
pub use self::report::ReportQuery;

mod moderation;
pub use self::moderation::ModerationActionQuery;

mod notification;
pub use self::notification::NotificationQuery;
