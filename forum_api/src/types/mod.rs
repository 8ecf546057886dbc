mod meta;
pub use self::meta::{Page, Pagination};

mod auth;
pub use self::auth::{Authorized, MemberJoin, MemberLogin};

mod member;
pub use self::member::{Member, MemberID, MemberRoleUpdate, MemberSummary, MemberUpdate, Role};

mod category;
pub use self::category::{Category, CategoryCreate, CategoryID, CategorySummary, CategoryUpdate};

mod post;
pub use self::post::{Post, PostCreate, PostID, PostSummary, PostTagsUpdate, PostUpdate, MAX_POST_TAGS};

mod comment;
pub use self::comment::{Comment, CommentCreate, CommentID, CommentSummary, CommentUpdate};

mod report;
pub use self::report::{Report, ReportCreate, ReportID, ReportStatus, ReportSummary, ReportUpdate};

mod moderation;
pub use self::moderation::{
    ModerationAction, ModerationActionCreate, ModerationActionID, ModerationActionType,
};

mod notification;
pub use self::notification::{Notification, NotificationID, NotificationKind};

mod poll;
pub use self::poll::{
    Poll, PollCreate, PollID, PollOption, PollOptionID, PollVote, PollVoteCreate,
    MAX_POLL_OPTIONS, MIN_POLL_OPTIONS,
};
