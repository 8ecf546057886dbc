use anyhow::Result;
use chrono::{DateTime, Utc};
use forum_api::types::{CategorySummary, MemberSummary, PostSummary};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    #[value(alias = "md")]
    Markdown,
}

const MAX_TITLE_WIDTH: usize = 60;

#[derive(Tabled, Serialize)]
struct PostRow {
    #[tabled(rename = "Created")]
    #[serde(rename = "Created")]
    created: String,
    #[tabled(rename = "Title")]
    #[serde(rename = "Title")]
    title: String,
    #[tabled(rename = "Tags")]
    #[serde(rename = "Tags")]
    tags: String,
    #[tabled(rename = "Comments")]
    #[serde(rename = "Comments")]
    comments: i64,
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
}

#[derive(Tabled, Serialize)]
struct MemberRow {
    #[tabled(rename = "Username")]
    #[serde(rename = "Username")]
    username: String,
    #[tabled(rename = "Display Name")]
    #[serde(rename = "Display Name")]
    display_name: String,
    #[tabled(rename = "Role")]
    #[serde(rename = "Role")]
    role: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Joined")]
    #[serde(rename = "Joined")]
    joined: String,
}

#[derive(Tabled, Serialize)]
struct CategoryRow {
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    #[serde(rename = "Description")]
    description: String,
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
}

// -- Row builders --

fn build_post_rows(posts: &[PostSummary]) -> Vec<PostRow> {
    posts
        .iter()
        .map(|p| PostRow {
            created: format_timestamp(&p.created_at),
            title: truncate(&p.title, MAX_TITLE_WIDTH),
            tags: p.tags.join(", "),
            comments: p.comment_count,
            id: p.id.to_string(),
        })
        .collect()
}

fn build_member_rows(members: &[MemberSummary]) -> Vec<MemberRow> {
    members
        .iter()
        .map(|m| MemberRow {
            username: m.username.clone(),
            display_name: m.display_name.clone().unwrap_or_default(),
            role: m.role.to_string(),
            status: if m.suspended { "suspended" } else { "active" }.to_string(),
            joined: format_timestamp(&m.created_at),
        })
        .collect()
}

fn build_category_rows(categories: &[CategorySummary]) -> Vec<CategoryRow> {
    categories
        .iter()
        .map(|c| CategoryRow {
            name: c.name.clone(),
            description: c.description.clone().unwrap_or_default(),
            id: c.id.to_string(),
        })
        .collect()
}

// -- Table output --

pub fn print_posts_table(posts: &[PostSummary]) {
    println!("{}", Table::new(build_post_rows(posts)));
}

pub fn print_members_table(members: &[MemberSummary]) {
    println!("{}", Table::new(build_member_rows(members)));
}

pub fn print_categories_table(categories: &[CategorySummary]) {
    println!("{}", Table::new(build_category_rows(categories)));
}

// -- Markdown output --

pub fn print_posts_markdown(posts: &[PostSummary]) {
    let mut table = Table::new(build_post_rows(posts));
    table.with(Style::markdown());
    println!("{}", table);
}

pub fn print_members_markdown(members: &[MemberSummary]) {
    let mut table = Table::new(build_member_rows(members));
    table.with(Style::markdown());
    println!("{}", table);
}

pub fn print_categories_markdown(categories: &[CategorySummary]) {
    let mut table = Table::new(build_category_rows(categories));
    table.with(Style::markdown());
    println!("{}", table);
}

// -- CSV output --

fn write_csv<R: Serialize>(rows: Vec<R>) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_posts_csv(posts: &[PostSummary]) -> Result<()> {
    write_csv(build_post_rows(posts))
}

pub fn print_members_csv(members: &[MemberSummary]) -> Result<()> {
    write_csv(build_member_rows(members))
}

pub fn print_categories_csv(categories: &[CategorySummary]) -> Result<()> {
    write_csv(build_category_rows(categories))
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
