//! Ledgerly API Server
//!
//! Main entry point for the Ledgerly petty cash service.

use std::{net::SocketAddr, time::Duration};

use sea_orm_migration::MigratorTrait;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ledgerly_api::{AppState, create_router, middleware::spawn_sweeper};
use ledgerly_db::{connect_with, migration::Migrator};
use ledgerly_shared::{AppConfig, JwtConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ledgerly=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Connect to database and bring the schema up to date
    let db = connect_with(&config.database).await?;
    info!("Connected to database");
    Migrator::up(&db, None).await?;
    info!("Migrations applied");

    let jwt_service = JwtService::new(JwtConfig::from(&config.jwt));

    if config.ledger.serialize_debits {
        info!("Debits are serialized");
    }

    // Create application state
    let state = AppState::new(db, jwt_service, &config.rate_limit, &config.ledger);

    let _sweeper = spawn_sweeper(
        state.rate_limit.limiter.clone(),
        Duration::from_secs(config.rate_limit.sweep_interval_secs),
    );
    info!(
        per_second = config.rate_limit.per_second,
        burst = config.rate_limit.burst,
        trust_forwarded_for = config.rate_limit.trust_forwarded_for,
        "Rate limiter configured"
    );

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
