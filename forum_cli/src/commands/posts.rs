use anyhow::Result;
use clap::Args;
use forum_api::types::CategoryID;
use forum_api::{Client, PostQuery, PostSortBy, Query, SortDirection};

use crate::output::{
    print_json, print_posts_csv, print_posts_markdown, print_posts_table, OutputFormat,
};

#[derive(Args)]
pub struct PostsArgs {
    /// Filter by category id
    #[arg(long)]
    pub category: Option<CategoryID>,

    /// Filter by author id
    #[arg(long)]
    pub author: Option<String>,

    /// Search titles and bodies
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by tag
    #[arg(long)]
    pub tag: Option<String>,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: i64,

    /// Results per page
    #[arg(long, default_value = "20")]
    pub limit: i64,

    /// Sort field: created, updated, title
    #[arg(long, default_value = "created")]
    pub sort_by: String,

    /// Sort ascending instead of descending
    #[arg(long)]
    pub asc: bool,
}

pub async fn run(args: &PostsArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let mut query = PostQuery::default()
        .with_page(args.page)
        .with_limit(args.limit);

    if let Some(category) = args.category {
        query = query.with_category_id(category);
    }
    // Sent as-is so the server reports malformed ids.
    query.author_id = args.author.clone();
    if let Some(ref search) = args.search {
        query = query.with_search(search);
    }
    if let Some(ref tag) = args.tag {
        query = query.with_tag(tag);
    }

    let sort_by = match args.sort_by.as_str() {
        "updated" => PostSortBy::UpdatedAt,
        "title" => PostSortBy::Title,
        _ => PostSortBy::CreatedAt,
    };
    query = query.with_sort_by(sort_by);

    if args.asc {
        query = query.with_sort_direction(SortDirection::Asc);
    }

    let resp = client.get_posts(&query).await?;

    eprintln!(
        "Page {}/{} ({} total posts)",
        resp.pagination.current, resp.pagination.pages, resp.pagination.records
    );

    match format {
        OutputFormat::Table => print_posts_table(&resp.data),
        OutputFormat::Json => print_json(&resp.data),
        OutputFormat::Csv => print_posts_csv(&resp.data)?,
        OutputFormat::Markdown => print_posts_markdown(&resp.data),
    }

    Ok(())
}
