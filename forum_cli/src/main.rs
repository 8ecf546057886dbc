mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use forum_api::Client;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "forum")]
#[command(about = "Run and query a discussion board server")]
struct Cli {
    /// Output format: table, json, csv or markdown
    #[arg(long, value_enum, default_value = "table", global = true)]
    output: OutputFormat,

    /// Base URL of the forum server
    #[arg(
        long,
        env = "FORUM_URL",
        default_value = "http://127.0.0.1:37001",
        global = true
    )]
    server: String,

    /// Bearer token used for signed-in requests
    #[arg(long, env = "FORUM_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::serve::ServeArgs),
    /// Change a member's role directly in the database
    Promote(commands::promote::PromoteArgs),
    /// List posts
    Posts(commands::posts::PostsArgs),
    /// List members
    Members(commands::members::MembersArgs),
    /// List categories
    Categories(commands::categories::CategoriesArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("forum=info".parse()?)
                .add_directive("forum_lib=info".parse()?),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = cli.output;

    let mut client = Client::with_base_url(&cli.server);
    client.set_token(cli.token.clone());

    match &cli.command {
        Commands::Serve(args) => commands::serve::run(args).await?,
        Commands::Promote(args) => commands::promote::run(args, &format)?,
        Commands::Posts(args) => commands::posts::run(args, &client, &format).await?,
        Commands::Members(args) => commands::members::run(args, &client, &format).await?,
        Commands::Categories(args) => commands::categories::run(args, &client, &format).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_defaults_to_table() {
        let cli = Cli::try_parse_from(["forum", "categories"]).unwrap();
        assert_eq!(cli.output, OutputFormat::Table);
    }

    #[test]
    fn output_accepts_known_formats() {
        for (raw, expected) in [
            ("json", OutputFormat::Json),
            ("csv", OutputFormat::Csv),
            ("markdown", OutputFormat::Markdown),
            ("md", OutputFormat::Markdown),
        ] {
            let cli = Cli::try_parse_from(["forum", "--output", raw, "categories"]).unwrap();
            assert_eq!(cli.output, expected, "{}", raw);
        }
    }

    #[test]
    fn unknown_output_is_rejected() {
        assert!(Cli::try_parse_from(["forum", "--output", "yaml", "categories"]).is_err());
        assert!(Cli::try_parse_from(["forum", "categories", "--output", "xml"]).is_err());
    }
}
