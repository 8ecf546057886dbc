use anyhow::Result;
use clap::Args;
use forum_api::{CategoryQuery, CategorySortBy, Client, Query, SortDirection};

use crate::output::{
    print_categories_csv, print_categories_markdown, print_categories_table, print_json,
    OutputFormat,
};

#[derive(Args)]
pub struct CategoriesArgs {
    /// Search category names
    #[arg(long)]
    pub search: Option<String>,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: i64,

    /// Results per page
    #[arg(long, default_value = "100")]
    pub limit: i64,

    /// Sort by creation time instead of name
    #[arg(long)]
    pub newest: bool,
}

pub async fn run(args: &CategoriesArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let mut query = CategoryQuery::default()
        .with_page(args.page)
        .with_limit(args.limit);

    if let Some(ref search) = args.search {
        query = query.with_search(search);
    }
    if args.newest {
        query = query.with_sort_by(CategorySortBy::CreatedAt);
    } else {
        query = query
            .with_sort_by(CategorySortBy::Name)
            .with_sort_direction(SortDirection::Asc);
    }

    let resp = client.get_categories(&query).await?;

    match format {
        OutputFormat::Table => print_categories_table(&resp.data),
        OutputFormat::Json => print_json(&resp.data),
        OutputFormat::Csv => print_categories_csv(&resp.data)?,
        OutputFormat::Markdown => print_categories_markdown(&resp.data),
    }

    Ok(())
}
