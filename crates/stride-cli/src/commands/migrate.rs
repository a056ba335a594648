//! Migration command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use stride_db::migrations::run_migrations;
use stride_db::DbPool;

#[derive(Args)]
pub struct MigrateArgs {
    /// SQLite database path
    #[arg(long, env = "DATABASE_URL", default_value = "stride.db")]
    pub database_url: String,
}

pub async fn execute(args: MigrateArgs) -> Result<()> {
    let pool = DbPool::open(&args.database_url)?;
    run_migrations(&pool)?;

    println!("{} migrations applied to {}", "✓".green(), args.database_url);
    Ok(())
}
