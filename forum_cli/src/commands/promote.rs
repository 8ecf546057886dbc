use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use forum_api::types::{MemberSummary, Role};
use forum_lib::{Forum, ServerConfig};

use crate::output::{
    print_json, print_members_csv, print_members_markdown, print_members_table, OutputFormat,
};

#[derive(Args)]
pub struct PromoteArgs {
    /// Username of the member to change
    pub username: String,

    /// New role: member, moderator, administrator
    #[arg(long, default_value = "administrator")]
    pub role: String,

    /// YAML config file naming the database
    #[arg(long, env = "FORUM_CONFIG")]
    pub config: Option<PathBuf>,
}

pub fn run(args: &PromoteArgs, format: &OutputFormat) -> Result<()> {
    let Ok(role) = args.role.parse::<Role>() else {
        bail!(
            "unknown role '{}': expected member, moderator or administrator",
            args.role
        );
    };

    let config = ServerConfig::load(args.config.as_deref())?;
    let forum = Forum::open(&config)?;
    let member = forum.promote(&args.username, role)?;
    eprintln!("{} is now {}", member.username, member.role);

    let rows: Vec<MemberSummary> = vec![member.into()];
    match format {
        OutputFormat::Table => print_members_table(&rows),
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Csv => print_members_csv(&rows)?,
        OutputFormat::Markdown => print_members_markdown(&rows),
    }
    Ok(())
}
