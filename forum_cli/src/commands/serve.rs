use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use forum_lib::{Forum, ServerConfig};

#[derive(Args)]
pub struct ServeArgs {
    /// YAML config file; FORUM_* environment variables override it
    #[arg(long, env = "FORUM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to listen on, overriding the config
    #[arg(long)]
    pub bind: Option<SocketAddr>,

    /// SQLite database path, overriding the config
    #[arg(long)]
    pub database: Option<PathBuf>,
}

fn resolve_config(args: &ServeArgs) -> Result<ServerConfig> {
    let mut config = ServerConfig::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.bind = bind;
    }
    if let Some(ref database) = args.database {
        config.database = database.clone();
    }
    Ok(config)
}

pub async fn run(args: &ServeArgs) -> Result<()> {
    let config = resolve_config(args)?;
    let forum = Forum::open(&config)
        .with_context(|| format!("opening database {}", config.database.display()))?;
    tracing::info!(
        "Database {} ready, sessions last {}s",
        config.database.display(),
        config.session_ttl_secs
    );
    forum_lib::server::serve(forum, &config)
        .await
        .with_context(|| format!("serving on {}", config.bind))?;
    Ok(())
}
