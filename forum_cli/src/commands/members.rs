use anyhow::{bail, Result};
use clap::Args;
use forum_api::types::Role;
use forum_api::{Client, MemberQuery, MemberSortBy, Query, SortDirection};

use crate::output::{
    print_json, print_members_csv, print_members_markdown, print_members_table, OutputFormat,
};

#[derive(Args)]
pub struct MembersArgs {
    /// Search usernames and emails
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by role: member, moderator, administrator
    #[arg(long)]
    pub role: Option<String>,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: i64,

    /// Results per page
    #[arg(long, default_value = "20")]
    pub limit: i64,

    /// Sort field: joined, username
    #[arg(long, default_value = "joined")]
    pub sort_by: String,

    /// Sort ascending instead of descending
    #[arg(long)]
    pub asc: bool,
}

pub async fn run(args: &MembersArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let mut query = MemberQuery::default()
        .with_page(args.page)
        .with_limit(args.limit);

    if let Some(ref search) = args.search {
        query = query.with_search(search);
    }
    if let Some(ref role) = args.role {
        let Ok(role) = role.parse::<Role>() else {
            bail!("unknown role '{}'", role);
        };
        query = query.with_role(role);
    }

    let sort_by = match args.sort_by.as_str() {
        "username" => MemberSortBy::Username,
        _ => MemberSortBy::CreatedAt,
    };
    query = query.with_sort_by(sort_by);

    if args.asc {
        query = query.with_sort_direction(SortDirection::Asc);
    }

    let resp = client.get_members(&query).await?;

    eprintln!(
        "Page {}/{} ({} total members)",
        resp.pagination.current, resp.pagination.pages, resp.pagination.records
    );

    match format {
        OutputFormat::Table => print_members_table(&resp.data),
        OutputFormat::Json => print_json(&resp.data),
        OutputFormat::Csv => print_members_csv(&resp.data)?,
        OutputFormat::Markdown => print_members_markdown(&resp.data),
    }

    Ok(())
}
