use serde_json::Value;
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("CLI crate should be inside workspace")
        .to_path_buf()
}

fn load_fixture(name: &str) -> Value {
    let path = workspace_root()
        .join("forum_api/tests/fixtures")
        .join(name);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read fixture {}: {}", path.display(), e));
    serde_json::from_str(&text).expect("fixture is valid JSON")
}

fn load_schema(name: &str) -> Value {
    let path = workspace_root().join("schema").join(name);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read schema {}: {}", path.display(), e));
    serde_json::from_str(&text).expect("schema is valid JSON")
}

fn validator(schema: &str) -> jsonschema::Validator {
    jsonschema::draft202012::new(&load_schema(schema))
        .unwrap_or_else(|e| panic!("{} compiles: {}", schema, e))
}

// ---------------------------------------------------------------------------
// Positive validation: fixtures conform to their schemas
// ---------------------------------------------------------------------------

#[test]
fn test_list_fixtures_conform_to_page_schema() {
    let page = validator("page.schema.json");
    for name in ["posts.json", "posts_empty.json", "members.json", "reports.json"] {
        let fixture = load_fixture(name);
        if let Err(e) = page.validate(&fixture) {
            panic!("{} failed envelope validation: {e}", name);
        }
    }
}

#[test]
fn test_posts_fixture_conforms_to_schema() {
    let data = load_fixture("posts.json")["data"].clone();
    if let Err(e) = validator("post_summary.schema.json").validate(&data) {
        panic!("posts fixture failed validation: {e}");
    }
}

#[test]
fn test_members_fixture_conforms_to_schema() {
    let data = load_fixture("members.json")["data"].clone();
    if let Err(e) = validator("member_summary.schema.json").validate(&data) {
        panic!("members fixture failed validation: {e}");
    }
}

#[test]
fn test_reports_fixture_conforms_to_schema() {
    let data = load_fixture("reports.json")["data"].clone();
    if let Err(e) = validator("report_summary.schema.json").validate(&data) {
        panic!("reports fixture failed validation: {e}");
    }
}

// ---------------------------------------------------------------------------
// Negative validation: schemas reject invalid data
// ---------------------------------------------------------------------------

#[test]
fn test_page_schema_rejects_zero_limit() {
    let mut fixture = load_fixture("posts.json");
    fixture["pagination"]["limit"] = Value::from(0);
    assert!(!validator("page.schema.json").is_valid(&fixture));
}

#[test]
fn test_page_schema_rejects_missing_pagination() {
    let mut fixture = load_fixture("posts.json");
    fixture.as_object_mut().unwrap().remove("pagination");
    assert!(!validator("page.schema.json").is_valid(&fixture));
}

#[test]
fn test_post_schema_rejects_six_tags() {
    let mut data = load_fixture("posts.json")["data"].clone();
    data[0]["tags"] = serde_json::json!(["a", "b", "c", "d", "e", "f"]);
    assert!(!validator("post_summary.schema.json").is_valid(&data));
}

#[test]
fn test_post_schema_rejects_missing_required_field() {
    let mut data = load_fixture("posts.json")["data"].clone();
    data[0].as_object_mut().unwrap().remove("comment_count");
    assert!(!validator("post_summary.schema.json").is_valid(&data));
}

#[test]
fn test_member_schema_rejects_leaked_email() {
    let mut data = load_fixture("members.json")["data"].clone();
    data[0]["email"] = Value::from("admin@example.com");
    assert!(!validator("member_summary.schema.json").is_valid(&data));
}

#[test]
fn test_member_schema_rejects_unknown_role() {
    let mut data = load_fixture("members.json")["data"].clone();
    data[1]["role"] = Value::from("root");
    assert!(!validator("member_summary.schema.json").is_valid(&data));
}

#[test]
fn test_report_schema_rejects_two_targets() {
    let mut data = load_fixture("reports.json")["data"].clone();
    data[0]["post_id"] = Value::from("6f1c2a0e-8d3b-4b8e-9a52-0c3e7f1d2b41");
    assert!(!validator("report_summary.schema.json").is_valid(&data));
}
