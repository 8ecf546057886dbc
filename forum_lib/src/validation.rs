use forum_api::types::{MAX_POLL_OPTIONS, MAX_POST_TAGS, MIN_POLL_OPTIONS};
use forum_api::MAX_LIMIT;
use regex::Regex;
use uuid::Uuid;

use crate::error::ForumError;

pub const MAX_SEARCH_LENGTH: usize = 100;
pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_BODY_LENGTH: usize = 20_000;
pub const MAX_COMMENT_LENGTH: usize = 5_000;
pub const MAX_REASON_LENGTH: usize = 1_000;
pub const MAX_DISPLAY_NAME_LENGTH: usize = 64;
pub const MAX_BIO_LENGTH: usize = 1_000;
pub const MAX_CATEGORY_NAME_LENGTH: usize = 64;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;
pub const MAX_EMAIL_LENGTH: usize = 254;
pub const MAX_TAG_LENGTH: usize = 32;
pub const MAX_QUESTION_LENGTH: usize = 300;
pub const MAX_OPTION_LENGTH: usize = 100;
/// Highest page number whose row offset still fits in an `i64` at [`MAX_LIMIT`].
pub const MAX_PAGE: i64 = i64::MAX / MAX_LIMIT;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;

const USERNAME_PATTERN: &str = r"^[a-z0-9_]{3,32}$";
const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
const TAG_PATTERN: &str = r"^[a-z0-9-]+$";

fn compile(pattern: &str) -> Result<Regex, ForumError> {
    Regex::new(pattern).map_err(|e| ForumError::Internal(format!("bad pattern {}: {}", pattern, e)))
}

fn check_length(input: &str, max_len: usize) -> Result<(), ForumError> {
    if input.len() > max_len {
        return Err(ForumError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    Ok(())
}

fn non_empty(sanitized: String, field: &str) -> Result<String, ForumError> {
    if sanitized.is_empty() {
        return Err(ForumError::InvalidInput(format!(
            "{} is empty after sanitization",
            field
        )));
    }
    Ok(sanitized)
}

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, ForumError> {
    check_length(input, max_len)?;
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    non_empty(sanitized, "input")
}

/// Like [`sanitize_text`] but keeps line breaks and tabs, for post and comment bodies.
/// Carriage returns are dropped so `\r\n` collapses to `\n`.
pub fn sanitize_multiline(input: &str, max_len: usize) -> Result<String, ForumError> {
    check_length(input, max_len)?;
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || matches!(c, ' ' | '\n' | '\t'))
        .collect::<String>()
        .trim()
        .to_string();
    non_empty(sanitized, "input")
}

/// Validate a search string: enforce length, strip control chars, trim.
pub fn validate_search(input: &str) -> Result<String, ForumError> {
    sanitize_text(input, MAX_SEARCH_LENGTH)
}

/// Parse a UUID, naming the offending field on failure.
pub fn validate_uuid(input: &str, field: &str) -> Result<Uuid, ForumError> {
    Uuid::parse_str(input.trim()).map_err(|_| {
        ForumError::InvalidInput(format!("{} '{}' is not a valid UUID", field, input))
    })
}

/// Parse an optional UUID filter.
pub fn validate_optional_uuid(input: Option<&str>, field: &str) -> Result<Option<Uuid>, ForumError> {
    input.map(|s| validate_uuid(s, field)).transpose()
}

/// Validate an email address: rough `local@domain.tld` shape, lowercased.
pub fn validate_email(input: &str) -> Result<String, ForumError> {
    check_length(input, MAX_EMAIL_LENGTH)?;
    let lower = input.trim().to_lowercase();
    if compile(EMAIL_PATTERN)?.is_match(&lower) {
        Ok(lower)
    } else {
        Err(ForumError::InvalidInput(format!(
            "'{}' is not a valid email address",
            input
        )))
    }
}

/// Validate a username: 3-32 characters of `[a-z0-9_]`, case-folded.
pub fn validate_username(input: &str) -> Result<String, ForumError> {
    let lower = input.trim().to_lowercase();
    if compile(USERNAME_PATTERN)?.is_match(&lower) {
        Ok(lower)
    } else {
        Err(ForumError::InvalidInput(format!(
            "username '{}' must be 3-32 characters of a-z, 0-9 or _",
            input
        )))
    }
}

/// Validate a password length. The password itself is never altered.
pub fn validate_password(input: &str) -> Result<(), ForumError> {
    let len = input.chars().count();
    if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&len) {
        return Err(ForumError::InvalidInput(format!(
            "password must be between {} and {} characters",
            MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

pub fn validate_display_name(input: &str) -> Result<String, ForumError> {
    sanitize_text(input, MAX_DISPLAY_NAME_LENGTH)
}

pub fn validate_bio(input: &str) -> Result<String, ForumError> {
    sanitize_multiline(input, MAX_BIO_LENGTH)
}

pub fn validate_category_name(input: &str) -> Result<String, ForumError> {
    sanitize_text(input, MAX_CATEGORY_NAME_LENGTH)
}

pub fn validate_description(input: &str) -> Result<String, ForumError> {
    sanitize_multiline(input, MAX_DESCRIPTION_LENGTH)
}

pub fn validate_title(input: &str) -> Result<String, ForumError> {
    sanitize_text(input, MAX_TITLE_LENGTH)
}

pub fn validate_body(input: &str) -> Result<String, ForumError> {
    sanitize_multiline(input, MAX_BODY_LENGTH)
}

pub fn validate_comment_body(input: &str) -> Result<String, ForumError> {
    sanitize_multiline(input, MAX_COMMENT_LENGTH)
}

pub fn validate_reason(input: &str) -> Result<String, ForumError> {
    sanitize_multiline(input, MAX_REASON_LENGTH)
}

/// Normalize and validate a single tag: trimmed, lowercase, `[a-z0-9-]`.
pub fn validate_tag(input: &str) -> Result<String, ForumError> {
    let lower = input.trim().to_lowercase();
    if lower.is_empty() || lower.len() > MAX_TAG_LENGTH || !compile(TAG_PATTERN)?.is_match(&lower)
    {
        return Err(ForumError::InvalidInput(format!(
            "tag '{}' must be 1-{} characters of a-z, 0-9 or -",
            input, MAX_TAG_LENGTH
        )));
    }
    Ok(lower)
}

/// Normalize a tag set: each tag validated, duplicates dropped (first occurrence
/// wins), at most [`MAX_POST_TAGS`] distinct tags.
pub fn validate_tags(input: &[String]) -> Result<Vec<String>, ForumError> {
    let mut tags: Vec<String> = Vec::with_capacity(input.len());
    for raw in input {
        let tag = validate_tag(raw)?;
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    if tags.len() > MAX_POST_TAGS {
        return Err(ForumError::InvalidInput(format!(
            "a post can carry at most {} tags, got {}",
            MAX_POST_TAGS,
            tags.len()
        )));
    }
    Ok(tags)
}

pub fn validate_poll_question(input: &str) -> Result<String, ForumError> {
    sanitize_text(input, MAX_QUESTION_LENGTH)
}

/// Validate poll options: each sanitized, distinct (case-insensitive), and
/// between [`MIN_POLL_OPTIONS`] and [`MAX_POLL_OPTIONS`] of them.
pub fn validate_poll_options(input: &[String]) -> Result<Vec<String>, ForumError> {
    if !(MIN_POLL_OPTIONS..=MAX_POLL_OPTIONS).contains(&input.len()) {
        return Err(ForumError::InvalidInput(format!(
            "a poll needs between {} and {} options, got {}",
            MIN_POLL_OPTIONS,
            MAX_POLL_OPTIONS,
            input.len()
        )));
    }
    let mut options: Vec<String> = Vec::with_capacity(input.len());
    for raw in input {
        let option = sanitize_text(raw, MAX_OPTION_LENGTH)?;
        if options
            .iter()
            .any(|o| o.to_lowercase() == option.to_lowercase())
        {
            return Err(ForumError::InvalidInput(format!(
                "duplicate poll option '{}'",
                option
            )));
        }
        options.push(option);
    }
    Ok(options)
}

/// Validate page number (must be between 1 and [`MAX_PAGE`]).
pub fn validate_page(page: i64) -> Result<i64, ForumError> {
    if !(1..=MAX_PAGE).contains(&page) {
        return Err(ForumError::InvalidInput(format!(
            "page must be between 1 and {}",
            MAX_PAGE
        )));
    }
    Ok(page)
}

/// Validate page size (must be 1..=1000).
pub fn validate_limit(limit: i64) -> Result<i64, ForumError> {
    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(ForumError::InvalidInput(format!(
            "limit must be between 1 and {}",
            MAX_LIMIT
        )));
    }
    Ok(limit)
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
