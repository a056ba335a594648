//! API server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use stride_ai::AiClient;
use stride_cache::{Cache, CacheStatus};
use stride_db::migrations::run_migrations;
use stride_db::DbPool;
use stride_web::state::AppState;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value = "4000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// SQLite database path
    #[arg(long, env = "DATABASE_URL", default_value = "stride.db")]
    pub database_url: String,

    /// Redis URL. Unset disables the cache layer entirely.
    #[arg(long, env = "REDIS_URL")]
    pub redis_url: Option<String>,

    /// Also log to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (with --log; defaults to stride.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

pub async fn execute(args: ServeArgs) -> Result<()> {
    let pool = DbPool::open(&args.database_url)?;
    run_migrations(&pool)?;

    // Best-effort: a missing or unreachable Redis never blocks startup
    let cache = Cache::connect(args.redis_url.as_deref()).await;
    let ai = AiClient::from_env();

    let cache_label = match cache.status().await {
        CacheStatus::Connected => "connected".green(),
        _ => "disabled".dimmed(),
    };

    println!();
    println!("  {} {}", "Stride".cyan().bold(), "API Server".bold());
    println!();
    println!("  {}    http://{}:{}", "API".green(), args.host, args.port);
    println!("  {}     {}", "Store".green(), args.database_url);
    println!("  {}     {}", "Cache".green(), cache_label);
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    let state = AppState::new(pool, cache, ai);
    stride_web::run_server(state, &args.host, args.port).await?;

    Ok(())
}
