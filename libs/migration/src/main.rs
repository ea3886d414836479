use migration::{Migrator, StatsMigrator};
use sea_orm_migration::cli;

/// `MIGRATOR=stats` selects the stats schema; anything else migrates the main schema.
#[tokio::main]
async fn main() {
    match std::env::var("MIGRATOR").as_deref() {
        Ok("stats") => cli::run_cli(StatsMigrator).await,
        _ => cli::run_cli(Migrator).await,
    }
}
