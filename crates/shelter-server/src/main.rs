use anyhow::{Context, Result};
use shelter_db::{
    create_pool, run_migrations, CredentialStore, MemoryCredentialStore, PgCredentialStore,
};
use shelter_server::config::load_config;
use shelter_server::state::AppState;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting Shelter auth server");

    // Load configuration
    let config_path =
        std::env::var("SHELTER_CONFIG").unwrap_or_else(|_| "server-config.yaml".to_string());

    tracing::info!("Loading config from: {}", config_path);
    let config = load_config(&config_path)?;
    tracing::info!(
        token_ttl_secs = config.auth.token_ttl_secs,
        "Config loaded successfully"
    );

    let store: Arc<dyn CredentialStore> = if config.db.is_memory() {
        tracing::warn!("Using in-memory credential store; users are lost on restart");
        Arc::new(MemoryCredentialStore::new())
    } else {
        tracing::info!("Connecting to database...");
        let pool = create_pool(&config.db.url)
            .await
            .context("Failed to create database pool")?;

        tracing::info!("Running database migrations...");
        run_migrations(&pool)
            .await
            .context("Failed to run migrations")?;

        Arc::new(PgCredentialStore::new(pool))
    };

    let listen = config.listen.clone();
    let state = AppState::new(store, config);
    let app = shelter_server::web::build_router(state);

    let listener = tokio::net::TcpListener::bind(&listen)
        .await
        .with_context(|| format!("Failed to bind to {}", listen))?;

    tracing::info!("Server listening on {}", listen);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, stopping...");
}
