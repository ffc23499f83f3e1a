mod api;
mod middleware;

use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState},
    middleware::{BearerAuth, RateLimiter},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = procure_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::info!(config = ?config, "starting procure-server");

    let auth = BearerAuth::for_environment(&config.server, config.env)?;
    let rate_limit = RateLimiter::per_minute(config.server.rate_limit_per_minute);

    let pool = procure_db::connect_pool(&config.database).await?;
    let pending = procure_db::run_migrations(&pool).await?;
    tracing::info!(pending, "migrations up to date");

    let app = build_app(AppState { pool }, auth, rate_limit);
    let listener = tokio::net::TcpListener::bind(config.server.bind_addr).await?;
    tracing::info!(addr = %config.server.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Resolves on ctrl-c, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "ctrl-c handler failed");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM handler failed");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutting down; draining in-flight requests");
}
