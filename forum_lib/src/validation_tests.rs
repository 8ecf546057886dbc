use super::*;

// -- Text sanitization --

#[test]
fn sanitize_strips_control_characters() {
    assert_eq!(sanitize_text("  hel\x07lo\x00 ", 50).unwrap(), "hello");
}

#[test]
fn sanitize_rejects_empty_after_strip() {
    assert!(sanitize_text(" \x01\x02 ", 50).is_err());
}

#[test]
fn sanitize_enforces_byte_limit() {
    assert!(sanitize_text(&"a".repeat(11), 10).is_err());
    assert!(sanitize_text(&"a".repeat(10), 10).is_ok());
}

#[test]
fn multiline_keeps_newlines() {
    assert_eq!(
        sanitize_multiline("line one\r\nline two\n", 100).unwrap(),
        "line one\nline two"
    );
}

#[test]
fn search_too_long() {
    assert!(validate_search(&"x".repeat(MAX_SEARCH_LENGTH + 1)).is_err());
}

// -- Identifiers --

#[test]
fn uuid_valid() {
    let id = Uuid::new_v4();
    assert_eq!(validate_uuid(&id.to_string(), "post_id").unwrap(), id);
}

#[test]
fn uuid_malformed_names_field() {
    let err = validate_uuid("not-a-uuid", "post_id").unwrap_err();
    assert!(err.to_string().contains("post_id"));
}

#[test]
fn optional_uuid_none_passes() {
    assert_eq!(validate_optional_uuid(None, "author_id").unwrap(), None);
    assert!(validate_optional_uuid(Some("zzz"), "author_id").is_err());
}

// -- Accounts --

#[test]
fn email_is_lowercased() {
    assert_eq!(
        validate_email(" Alice@Example.COM ").unwrap(),
        "alice@example.com"
    );
}

#[test]
fn email_invalid_shapes() {
    assert!(validate_email("alice").is_err());
    assert!(validate_email("alice@example").is_err());
    assert!(validate_email("a b@example.com").is_err());
    assert!(validate_email("@example.com").is_err());
}

#[test]
fn username_rules() {
    assert_eq!(validate_username("Alice_01").unwrap(), "alice_01");
    assert!(validate_username("ab").is_err());
    assert!(validate_username("has space").is_err());
    assert!(validate_username(&"a".repeat(33)).is_err());
}

#[test]
fn password_length_bounds() {
    assert!(validate_password("short").is_err());
    assert!(validate_password("eight888").is_ok());
    assert!(validate_password(&"p".repeat(MAX_PASSWORD_LENGTH + 1)).is_err());
}

// -- Tags --

#[test]
fn tags_are_normalized_and_deduplicated() {
    let tags = vec![
        "Rust".to_string(),
        " rust ".to_string(),
        "async-io".to_string(),
    ];
    assert_eq!(validate_tags(&tags).unwrap(), vec!["rust", "async-io"]);
}

#[test]
fn five_tags_allowed() {
    let tags: Vec<String> = (0..5).map(|i| format!("tag{}", i)).collect();
    assert_eq!(validate_tags(&tags).unwrap().len(), 5);
}

#[test]
fn six_tags_rejected() {
    let tags: Vec<String> = (0..6).map(|i| format!("tag{}", i)).collect();
    let err = validate_tags(&tags).unwrap_err();
    assert!(matches!(err, ForumError::InvalidInput(_)));
}

#[test]
fn duplicates_do_not_count_towards_tag_limit() {
    let mut tags: Vec<String> = (0..5).map(|i| format!("tag{}", i)).collect();
    tags.push("TAG0".to_string());
    assert_eq!(validate_tags(&tags).unwrap().len(), 5);
}

#[test]
fn tag_characters() {
    assert!(validate_tag("c++").is_err());
    assert!(validate_tag("").is_err());
    assert!(validate_tag(&"a".repeat(MAX_TAG_LENGTH + 1)).is_err());
    assert_eq!(validate_tag("Web-Dev").unwrap(), "web-dev");
}

// -- Polls --

#[test]
fn poll_options_bounds() {
    assert!(validate_poll_options(&["only".to_string()]).is_err());
    let eleven: Vec<String> = (0..11).map(|i| format!("option {}", i)).collect();
    assert!(validate_poll_options(&eleven).is_err());
    let two = vec!["Yes".to_string(), "No".to_string()];
    assert_eq!(validate_poll_options(&two).unwrap(), two);
}

#[test]
fn poll_options_must_be_distinct() {
    let opts = vec!["Yes".to_string(), "yes".to_string()];
    assert!(validate_poll_options(&opts).is_err());
}

// -- Pagination --

#[test]
fn page_valid() {
    assert_eq!(validate_page(1).unwrap(), 1);
    assert_eq!(validate_page(100).unwrap(), 100);
}

#[test]
fn page_zero_or_negative() {
    assert!(validate_page(0).is_err());
    assert!(validate_page(-1).is_err());
}

#[test]
fn page_past_offset_range() {
    assert_eq!(validate_page(MAX_PAGE).unwrap(), MAX_PAGE);
    assert!(validate_page(MAX_PAGE + 1).is_err());
    assert!(validate_page(i64::MAX).is_err());
}

#[test]
fn limit_bounds() {
    assert!(validate_limit(0).is_err());
    assert_eq!(validate_limit(1).unwrap(), 1);
    assert_eq!(validate_limit(1000).unwrap(), 1000);
    assert!(validate_limit(1001).is_err());
}
