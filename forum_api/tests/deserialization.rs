use forum_api::types::{
    Authorized, MemberSummary, Page, Poll, Post, PostSummary, ReportStatus, ReportSummary, Role,
};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_posts_page() {
    let json = load_fixture("posts.json");
    let resp: Page<PostSummary> = serde_json::from_str(&json).unwrap();
    assert_eq!(resp.data.len(), 2);
    assert_eq!(resp.pagination.current, 1);
    assert_eq!(resp.pagination.limit, 2);
    assert_eq!(resp.pagination.records, 3);
    assert_eq!(resp.pagination.pages, 2);

    let first = &resp.data[0];
    assert_eq!(first.title, "Welcome to the board");
    assert_eq!(first.tags, vec!["announcements", "meta"]);
    assert_eq!(first.comment_count, 4);
    assert!(resp.data[1].tags.is_empty());
}

#[test]
fn deserialize_posts_empty() {
    let json = load_fixture("posts_empty.json");
    let resp: Page<PostSummary> = serde_json::from_str(&json).unwrap();
    assert!(resp.data.is_empty());
    assert_eq!(resp.pagination.records, 0);
    assert_eq!(resp.pagination.pages, 0);
}

#[test]
fn deserialize_post_detail() {
    let json = load_fixture("post.json");
    let post: Post = serde_json::from_str(&json).unwrap();
    assert_eq!(post.body, "Introduce yourself here.");
    assert!(post.deleted_at.is_none());
    assert_eq!(
        post.author_id.to_string(),
        "3d2e1f0a-9b8c-4d7e-a6f5-e4d3c2b1a098"
    );
}

#[test]
fn deserialize_members_page() {
    let json = load_fixture("members.json");
    let resp: Page<MemberSummary> = serde_json::from_str(&json).unwrap();
    assert_eq!(resp.data[0].role, Role::Administrator);
    assert_eq!(resp.data[0].display_name.as_deref(), Some("Board Admin"));
    assert_eq!(resp.data[1].role, Role::Member);
    assert!(resp.data[1].suspended);
    assert!(resp.data[1].display_name.is_none());
}

#[test]
fn deserialize_authorized() {
    let json = load_fixture("authorized.json");
    let auth: Authorized = serde_json::from_str(&json).unwrap();
    assert_eq!(auth.member.email, "lurker@example.com");
    assert_eq!(auth.token.len(), 48);
    assert!(auth.expires_at > auth.member.created_at);
}

#[test]
fn deserialize_poll_with_tallies() {
    let json = load_fixture("poll.json");
    let poll: Poll = serde_json::from_str(&json).unwrap();
    assert_eq!(poll.options.len(), 2);
    assert_eq!(poll.options[0].label, "Saturday");
    assert_eq!(
        poll.total_votes,
        poll.options.iter().map(|o| o.votes).sum::<i64>()
    );
}

#[test]
fn deserialize_reports_page() {
    let json = load_fixture("reports.json");
    let resp: Page<ReportSummary> = serde_json::from_str(&json).unwrap();
    let report = &resp.data[0];
    assert_eq!(report.status, ReportStatus::Pending);
    assert!(report.post_id.is_none());
    assert!(report.comment_id.is_some());
}

#[test]
fn serialize_post_keeps_snake_case_fields() {
    let json = load_fixture("post.json");
    let post: Post = serde_json::from_str(&json).unwrap();
    let value = serde_json::to_value(&post).unwrap();
    for field in ["category_id", "author_id", "created_at", "updated_at", "deleted_at"] {
        assert!(value.get(field).is_some(), "missing field {}", field);
    }
}
