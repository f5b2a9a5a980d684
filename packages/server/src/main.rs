use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use registrar_core::Registrar;
use tokio_util::sync::CancellationToken;
use tracing::{Level, info};

use registrar_server::config::AppConfig;
use registrar_server::repository::SeaOrmRepository;
use registrar_server::state::AppState;
use registrar_server::{build_router, database, schema};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = database::init_db(&config.database)
        .await
        .context("Failed to initialize database")?;
    schema::ensure_indexes(&db)
        .await
        .context("Failed to create indexes")?;

    let repo = Arc::new(SeaOrmRepository::new(db));
    let registrar = Arc::new(Registrar::new(repo, config.registrar.clone()));
    let shutdown = CancellationToken::new();

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server.host / server.port")?;

    let state = AppState {
        registrar,
        config,
        shutdown: shutdown.clone(),
    };
    let app = build_router(state);

    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {e}");
                std::future::pending::<()>().await;
            }
            info!("Shutting down");
            shutdown.cancel();
        })
        .await?;

    Ok(())
}
