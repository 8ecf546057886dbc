use super::*;
use forum_api::types::{
    Category, Comment, Member, ModerationAction, ModerationActionType, Notification,
    NotificationKind, Poll, PollOption, PollVote, Post, Report, ReportStatus, Role,
};
use forum_api::{PostSortBy, SortDirection};

fn open_test_db() -> Db {
    let db = Db::open_in_memory().expect("open in-memory db");
    db.init().expect("init schema");
    db
}

fn has_column(db: &Db, table: &str, column: &str) -> bool {
    let sql = format!("PRAGMA table_info({})", table);
    let mut stmt = db.conn.prepare(&sql).expect("prepare pragma");
    let names: Vec<String> = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .expect("query")
        .filter_map(|r| r.ok())
        .collect();
    names.contains(&column.to_string())
}

fn get_user_version(db: &Db) -> i32 {
    db.conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .expect("read user_version")
}

/// Member and notification tables before suspension and notification soft delete existed.
const OLD_SCHEMA: &str = "
CREATE TABLE members (
    id TEXT PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    display_name TEXT,
    bio TEXT,
    role TEXT NOT NULL DEFAULT 'member',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    deleted_at TEXT
);
CREATE TABLE notifications (
    id TEXT PRIMARY KEY,
    member_id TEXT NOT NULL,
    kind TEXT NOT NULL,
    message TEXT NOT NULL,
    post_id TEXT,
    comment_id TEXT,
    read_at TEXT,
    created_at TEXT NOT NULL
);
";

fn member(username: &str, role: Role) -> Member {
    let at = now();
    Member {
        id: Uuid::new_v4(),
        email: format!("{}@example.com", username),
        username: username.to_string(),
        display_name: None,
        bio: None,
        role,
        suspended: false,
        created_at: at,
        updated_at: at,
        deleted_at: None,
    }
}

fn seed_member(db: &Db, username: &str) -> Member {
    let m = member(username, Role::Member);
    db.insert_member(&m, "hash").expect("insert member");
    m
}

fn seed_category(db: &Db, name: &str) -> Category {
    let at = now();
    let category = Category {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: None,
        created_at: at,
        updated_at: at,
        deleted_at: None,
    };
    db.insert_category(&category).expect("insert category");
    category
}

fn seed_post(db: &mut Db, category: &Category, author: &Member, title: &str, tags: &[&str]) -> Post {
    let at = now();
    let post = Post {
        id: Uuid::new_v4(),
        category_id: category.id,
        author_id: author.id,
        title: title.to_string(),
        body: format!("body of {}", title),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        created_at: at,
        updated_at: at,
        deleted_at: None,
    };
    db.insert_post(&post).expect("insert post");
    post
}

fn seed_comment(db: &Db, post: &Post, author: &Member) -> Comment {
    let at = now();
    let comment = Comment {
        id: Uuid::new_v4(),
        post_id: post.id,
        author_id: author.id,
        parent_id: None,
        body: "a comment".to_string(),
        created_at: at,
        updated_at: at,
        deleted_at: None,
    };
    db.insert_comment(&comment).expect("insert comment");
    comment
}

fn window(page: i64, limit: i64) -> PageWindow {
    PageWindow {
        page,
        limit,
        sort_direction: SortDirection::Asc,
    }
}

// -- Schema and migrations --

#[test]
fn init_is_idempotent() {
    let db = open_test_db();
    db.init().expect("second init");
    assert_eq!(get_user_version(&db), 2);
}

#[test]
fn file_database_persists_across_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("forum.db");

    let db = Db::open(&path).expect("open file db");
    db.init().expect("init");
    let alice = seed_member(&db, "alice");
    drop(db);

    let db = Db::open(&path).expect("reopen file db");
    db.init().expect("init again");
    assert_eq!(get_user_version(&db), 2);
    assert_eq!(db.get_member(alice.id).unwrap(), Some(alice));
    let mode: String = db
        .conn()
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .unwrap();
    assert_eq!(mode, "wal");
}

#[test]
fn fresh_schema_has_all_columns() {
    let db = open_test_db();
    assert!(has_column(&db, "members", "suspended"));
    assert!(has_column(&db, "notifications", "deleted_at"));
    assert!(has_column(&db, "post_tags", "position"));
}

#[test]
fn migrates_old_schema() {
    let db = Db::open_in_memory().expect("open");
    db.conn.execute_batch(OLD_SCHEMA).expect("old schema");
    assert!(!has_column(&db, "members", "suspended"));

    db.init().expect("init over old schema");

    assert!(has_column(&db, "members", "suspended"));
    assert!(has_column(&db, "notifications", "deleted_at"));
    assert_eq!(get_user_version(&db), 2);
}

// -- Members --

#[test]
fn member_round_trip() {
    let db = open_test_db();
    let m = seed_member(&db, "alice");
    assert_eq!(db.get_member(m.id).unwrap(), Some(m.clone()));

    let (found, hash) = db.member_credentials("alice@example.com").unwrap().unwrap();
    assert_eq!(found.id, m.id);
    assert_eq!(hash, "hash");
    assert_eq!(db.count_members().unwrap(), 1);
}

#[test]
fn member_identity_taken_reports_field() {
    let db = open_test_db();
    seed_member(&db, "alice");
    assert_eq!(
        db.member_identity_taken("alice@example.com", "other").unwrap(),
        Some("email")
    );
    assert_eq!(
        db.member_identity_taken("new@example.com", "alice").unwrap(),
        Some("username")
    );
    assert_eq!(db.member_identity_taken("new@example.com", "bob").unwrap(), None);
}

#[test]
fn duplicate_email_is_constraint_violation() {
    let db = open_test_db();
    let m = seed_member(&db, "alice");
    let mut dup = member("alice2", Role::Member);
    dup.email = m.email.clone();
    let err = db.insert_member(&dup, "hash").unwrap_err();
    assert!(matches!(
        crate::error::ForumError::from(err),
        crate::error::ForumError::Conflict(_)
    ));
}

#[test]
fn erased_member_is_hidden() {
    let db = open_test_db();
    let m = seed_member(&db, "alice");
    assert!(db.erase_member(m.id, now()).unwrap());
    assert!(!db.erase_member(m.id, now()).unwrap());
    assert_eq!(db.get_member(m.id).unwrap(), None);
    assert!(db.member_credentials(&m.email).unwrap().is_none());
    let (records, _) = db
        .query_members(&DbMemberFilter::default(), &window(1, 10))
        .unwrap();
    assert_eq!(records, 0);
}

#[test]
fn query_members_by_role_and_search() {
    let db = open_test_db();
    seed_member(&db, "alice");
    seed_member(&db, "bob");
    let moderator = member("carol", Role::Moderator);
    db.insert_member(&moderator, "hash").unwrap();

    let filter = DbMemberFilter {
        role: Some(Role::Moderator),
        ..DbMemberFilter::default()
    };
    let (records, rows) = db.query_members(&filter, &window(1, 10)).unwrap();
    assert_eq!(records, 1);
    assert_eq!(rows[0].username, "carol");

    let filter = DbMemberFilter {
        search: Some("bo".to_string()),
        ..DbMemberFilter::default()
    };
    let (records, rows) = db.query_members(&filter, &window(1, 10)).unwrap();
    assert_eq!(records, 1);
    assert_eq!(rows[0].username, "bob");
}

// -- Categories --

#[test]
fn category_name_unique_among_active() {
    let db = open_test_db();
    let general = seed_category(&db, "General");
    assert!(db.category_name_taken("general", None).unwrap());
    assert!(!db.category_name_taken("general", Some(general.id)).unwrap());

    db.erase_category(general.id, now()).unwrap();
    assert!(!db.category_name_taken("general", None).unwrap());
    seed_category(&db, "General");
    assert_eq!(db.count_active_categories().unwrap(), 1);
}

// -- Posts --

#[test]
fn post_round_trip_keeps_tag_order() {
    let mut db = open_test_db();
    let author = seed_member(&db, "alice");
    let category = seed_category(&db, "General");
    let post = seed_post(&mut db, &category, &author, "hello", &["zeta", "alpha", "mid"]);

    let fetched = db.get_post(post.id).unwrap().unwrap();
    assert_eq!(fetched, post);
    assert_eq!(fetched.tags, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn set_post_tags_replaces() {
    let mut db = open_test_db();
    let author = seed_member(&db, "alice");
    let category = seed_category(&db, "General");
    let post = seed_post(&mut db, &category, &author, "hello", &["a", "b"]);

    let tags = vec!["c".to_string()];
    assert!(db.set_post_tags(post.id, &tags, now()).unwrap());
    assert_eq!(db.get_post(post.id).unwrap().unwrap().tags, vec!["c"]);

    db.erase_post(post.id, now()).unwrap();
    assert!(!db.set_post_tags(post.id, &tags, now()).unwrap());
}

#[test]
fn query_posts_pages_and_filters() {
    let mut db = open_test_db();
    let alice = seed_member(&db, "alice");
    let bob = seed_member(&db, "bob");
    let general = seed_category(&db, "General");
    let help = seed_category(&db, "Help");
    for i in 0..5 {
        seed_post(&mut db, &general, &alice, &format!("general {}", i), &["rust"]);
    }
    seed_post(&mut db, &help, &bob, "need help", &["question"]);

    let all = DbPostFilter {
        sort_by: PostSortBy::Title,
        ..DbPostFilter::default()
    };
    let (records, page) = db.query_posts(&all, &window(2, 4)).unwrap();
    assert_eq!(records, 6);
    assert_eq!(page.len(), 2);

    let (records, page) = db.query_posts(&all, &window(3, 4)).unwrap();
    assert_eq!(records, 6);
    assert!(page.is_empty());

    let by_category = DbPostFilter {
        category_id: Some(help.id),
        ..DbPostFilter::default()
    };
    let (records, page) = db.query_posts(&by_category, &window(1, 10)).unwrap();
    assert_eq!(records, 1);
    assert_eq!(page[0].author_id, bob.id);
    assert_eq!(page[0].tags, vec!["question"]);

    let by_tag = DbPostFilter {
        tag: Some("rust".to_string()),
        ..DbPostFilter::default()
    };
    assert_eq!(db.query_posts(&by_tag, &window(1, 10)).unwrap().0, 5);

    let nothing = DbPostFilter {
        search: Some("no such words".to_string()),
        ..DbPostFilter::default()
    };
    let (records, page) = db.query_posts(&nothing, &window(1, 10)).unwrap();
    assert_eq!(records, 0);
    assert!(page.is_empty());
}

#[test]
fn search_wildcards_match_literally() {
    let mut db = open_test_db();
    let alice = seed_member(&db, "alice");
    let general = seed_category(&db, "General");
    seed_post(&mut db, &general, &alice, "Hello world", &[]);
    let discount = seed_post(&mut db, &general, &alice, "50% off_sale", &[]);

    let search = |term: &str| DbPostFilter {
        search: Some(term.to_string()),
        ..DbPostFilter::default()
    };
    for term in ["%", "_", "\\"] {
        let (records, _) = db.query_posts(&search(term), &window(1, 10)).unwrap();
        let expected = if term == "\\" { 0 } else { 1 };
        assert_eq!(records, expected, "search {:?}", term);
    }

    let (records, page) = db.query_posts(&search("0% o"), &window(1, 10)).unwrap();
    assert_eq!(records, 1);
    assert_eq!(page[0].id, discount.id);

    assert_eq!(db.query_posts(&search("o_w"), &window(1, 10)).unwrap().0, 0);
}

#[test]
fn like_escapes_wildcards() {
    assert_eq!(like("plain"), "%plain%");
    assert_eq!(like("50%_\\"), "%50\\%\\_\\\\%");
}

#[test]
fn post_summary_counts_live_comments() {
    let mut db = open_test_db();
    let alice = seed_member(&db, "alice");
    let general = seed_category(&db, "General");
    let post = seed_post(&mut db, &general, &alice, "hello", &[]);
    let first = seed_comment(&db, &post, &alice);
    seed_comment(&db, &post, &alice);
    db.erase_comment(first.id, now()).unwrap();

    let (_, page) = db
        .query_posts(&DbPostFilter::default(), &window(1, 10))
        .unwrap();
    assert_eq!(page[0].comment_count, 1);
    assert_eq!(db.count_category_posts(general.id).unwrap(), 1);
}

// -- Reports --

#[test]
fn pending_report_detection() {
    let mut db = open_test_db();
    let alice = seed_member(&db, "alice");
    let general = seed_category(&db, "General");
    let post = seed_post(&mut db, &general, &alice, "hello", &[]);
    let at = now();
    let mut report = Report {
        id: Uuid::new_v4(),
        reporter_id: alice.id,
        post_id: Some(post.id),
        comment_id: None,
        reason: "spam".to_string(),
        status: ReportStatus::Pending,
        resolution_note: None,
        resolved_by: None,
        created_at: at,
        updated_at: at,
        resolved_at: None,
    };
    db.insert_report(&report).unwrap();
    assert!(db.has_pending_report(alice.id, Some(post.id), None).unwrap());

    report.status = ReportStatus::Dismissed;
    report.resolved_at = Some(now());
    assert!(db.update_report(&report).unwrap());
    assert!(!db.update_report(&report).unwrap());
    assert!(!db.has_pending_report(alice.id, Some(post.id), None).unwrap());
    assert_eq!(db.get_report(report.id).unwrap().unwrap().status, ReportStatus::Dismissed);
}

#[test]
fn report_needs_exactly_one_target() {
    let db = open_test_db();
    let alice = seed_member(&db, "alice");
    let at = now();
    let report = Report {
        id: Uuid::new_v4(),
        reporter_id: alice.id,
        post_id: None,
        comment_id: None,
        reason: "spam".to_string(),
        status: ReportStatus::Pending,
        resolution_note: None,
        resolved_by: None,
        created_at: at,
        updated_at: at,
        resolved_at: None,
    };
    assert!(db.insert_report(&report).is_err());
}

// -- Moderation and notifications --

#[test]
fn moderation_actions_filter_by_member() {
    let db = open_test_db();
    let moderator = member("mod", Role::Moderator);
    db.insert_member(&moderator, "hash").unwrap();
    let alice = seed_member(&db, "alice");
    let action = ModerationAction {
        id: Uuid::new_v4(),
        moderator_id: moderator.id,
        action_type: ModerationActionType::WarnMember,
        member_id: Some(alice.id),
        post_id: None,
        comment_id: None,
        report_id: None,
        reason: "be nice".to_string(),
        created_at: now(),
    };
    db.insert_moderation_action(&action).unwrap();
    assert_eq!(db.get_moderation_action(action.id).unwrap(), Some(action.clone()));

    let filter = DbModerationFilter {
        member_id: Some(alice.id),
        ..DbModerationFilter::default()
    };
    assert_eq!(db.query_moderation_actions(&filter, &window(1, 10)).unwrap().0, 1);
    let filter = DbModerationFilter {
        action_type: Some(ModerationActionType::SuspendMember),
        ..DbModerationFilter::default()
    };
    assert_eq!(db.query_moderation_actions(&filter, &window(1, 10)).unwrap().0, 0);
}

#[test]
fn notifications_unread_filter_and_read_once() {
    let db = open_test_db();
    let alice = seed_member(&db, "alice");
    let notification = Notification {
        id: Uuid::new_v4(),
        member_id: alice.id,
        kind: NotificationKind::Moderation,
        message: "warned".to_string(),
        post_id: None,
        comment_id: None,
        read_at: None,
        created_at: now(),
        deleted_at: None,
    };
    db.insert_notification(&notification).unwrap();

    let unread = DbNotificationFilter {
        member_id: alice.id,
        unread_only: true,
    };
    assert_eq!(db.query_notifications(&unread, &window(1, 10)).unwrap().0, 1);

    assert!(db.mark_notification_read(notification.id, now()).unwrap());
    let first_read = db.get_notification(notification.id).unwrap().unwrap().read_at;
    assert!(!db.mark_notification_read(notification.id, now()).unwrap());
    assert_eq!(
        db.get_notification(notification.id).unwrap().unwrap().read_at,
        first_read
    );
    assert_eq!(db.query_notifications(&unread, &window(1, 10)).unwrap().0, 0);

    assert!(db.erase_notification(notification.id, now()).unwrap());
    assert!(db.get_notification(notification.id).unwrap().is_none());
}

// -- Polls --

#[test]
fn poll_votes_are_counted_and_unique() {
    let mut db = open_test_db();
    let alice = seed_member(&db, "alice");
    let bob = seed_member(&db, "bob");
    let general = seed_category(&db, "General");
    let post = seed_post(&mut db, &general, &alice, "vote", &[]);
    let poll_id = Uuid::new_v4();
    let poll = Poll {
        id: poll_id,
        post_id: post.id,
        question: "Tabs or spaces?".to_string(),
        options: ["Tabs", "Spaces"]
            .iter()
            .enumerate()
            .map(|(i, label)| PollOption {
                id: Uuid::new_v4(),
                label: label.to_string(),
                position: i as i64,
                votes: 0,
            })
            .collect(),
        total_votes: 0,
        closes_at: None,
        created_at: now(),
        deleted_at: None,
    };
    db.insert_poll(&poll).unwrap();
    assert_eq!(db.get_post_poll(post.id).unwrap(), Some(poll.clone()));

    let vote = |member: &Member| PollVote {
        id: Uuid::new_v4(),
        poll_id,
        option_id: poll.options[1].id,
        member_id: member.id,
        created_at: now(),
    };
    db.insert_vote(&vote(&alice)).unwrap();
    db.insert_vote(&vote(&bob)).unwrap();
    assert!(db.insert_vote(&vote(&alice)).is_err());

    let counted = db.get_poll(poll_id).unwrap().unwrap();
    assert_eq!(counted.total_votes, 2);
    assert_eq!(counted.options[0].votes, 0);
    assert_eq!(counted.options[1].votes, 2);

    let mut second = poll.clone();
    second.id = Uuid::new_v4();
    for option in &mut second.options {
        option.id = Uuid::new_v4();
    }
    assert!(db.insert_poll(&second).is_err());

    db.erase_poll(poll_id, now()).unwrap();
    assert!(db.get_post_poll(post.id).unwrap().is_none());
    db.insert_poll(&second).unwrap();
}
