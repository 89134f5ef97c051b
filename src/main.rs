//! SkillFlow server binary.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use skillflow::adapters::http::{api_router, LearningPathAppState};
use skillflow::adapters::postgres::{self, PostgresHealthCheck};
use skillflow::adapters::{
    InMemoryLearningPathStore, PostgresLearningPathReader, PostgresLearningPathRepository,
};
use skillflow::config::{AppConfig, LogFormat, ServerConfig};
use skillflow::ports::HealthCheck;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let (state, health) = build_state(&config).await?;
    let app = api_router(state, health, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "skillflow listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("skillflow stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&server.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    match server.effective_log_format() {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(fmt::layer()).init(),
    }
}

async fn build_state(
    config: &AppConfig,
) -> Result<(LearningPathAppState, Arc<dyn HealthCheck>), Box<dyn std::error::Error>> {
    if !config.uses_database() {
        tracing::warn!("no database URL configured, using in-memory store");
        let store = Arc::new(InMemoryLearningPathStore::new());
        let state = LearningPathAppState::new(store.clone(), store.clone());
        let health: Arc<dyn HealthCheck> = store;
        return Ok((state, health));
    }

    let pool = postgres::connect(&config.database).await?;
    if config.database.run_migrations {
        postgres::run_migrations(&pool).await?;
        tracing::info!("database migrations applied");
    }

    let state = LearningPathAppState::new(
        Arc::new(PostgresLearningPathRepository::new(pool.clone())),
        Arc::new(PostgresLearningPathReader::new(pool.clone())),
    );
    let health: Arc<dyn HealthCheck> = Arc::new(PostgresHealthCheck::new(pool));
    Ok((state, health))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
