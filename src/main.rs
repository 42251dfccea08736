use ddnet_progress::{
    build_router, AppState, Config, InMemoryStore, PostgresStore, RecordService, TrackerStore,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ddnet_progress=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting DDNet progress tracker");

    let config = Config::from_env()?;

    let store: Arc<dyn TrackerStore> = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(database_url)
                .await?;
            sqlx::migrate!("./migrations").run(&pool).await?;
            info!("Database connected and migrated");
            Arc::new(PostgresStore::new(pool))
        }
        None => {
            warn!(
                "DATABASE_URL not set, using the in-memory store; data will not survive a restart"
            );
            Arc::new(InMemoryStore::new())
        }
    };

    let settings = config.tracker_settings();

    // Make sure the summary row exists and matches the stored records
    let summary = RecordService::new(Arc::clone(&store), settings.clone())
        .reconcile_summary()
        .await?;
    info!(
        current_score = summary.current_score,
        completed_maps = summary.completed_maps,
        "Summary reconciled at startup"
    );

    let app = build_router(AppState::new(store, settings), &config.cors_allowed_origins);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!(addr = %config.bind_addr(), "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
