//! Imports a `stars|name|...` map catalog as untouched records.
//!
//! Runs against the database named by `DATABASE_URL`.

use clap::Parser;
use ddnet_progress::{records::catalog, Config, PostgresStore};
use sqlx::postgres::PgPoolOptions;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "import_maps")]
#[command(about = "Import a map catalog as untouched records")]
struct Args {
    /// Catalog file with one `stars|name|...` line per map
    path: PathBuf,

    /// Difficulty the imported maps belong to
    #[arg(default_value = "INSANE")]
    difficulty: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ddnet_progress=info,import_maps=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let database_url = config
        .database_url
        .as_deref()
        .ok_or("DATABASE_URL must be set to import maps")?;

    let text = tokio::fs::read_to_string(&args.path).await?;
    let entries = catalog::parse_catalog(&text);
    info!(
        path = %args.path.display(),
        entries = entries.len(),
        difficulty = %args.difficulty,
        "Catalog parsed"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(database_url)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let store = Arc::new(PostgresStore::new(pool));
    let report = catalog::import_catalog(store, &args.difficulty, &entries).await?;
    info!(
        parsed = report.parsed,
        inserted = report.inserted,
        "Import finished"
    );

    Ok(())
}
