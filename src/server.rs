//! HTTP server start-up and graceful shutdown

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{error, info};

use crate::cli::ServeArgs;
use crate::config::{DatabaseConfig, EnvironmentConfig};
use crate::database::DatabaseConnection;
use crate::routes::create_router;
use crate::state::AppState;

pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = EnvironmentConfig::from_env()?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    let database = DatabaseConfig::from_env()?;
    let connection = DatabaseConnection::connect(&database)
        .await
        .context("could not connect to the database")?;

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("invalid listen address {}", config.server_url()))?;

    info!(environment = %config.environment, "permit tracker starting");
    let app = create_router(AppState::new(connection.into_pool(), config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("server error: {}", e);
            e
        })?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Ctrl+C received, shutting down"),
        _ = terminate => info!("SIGTERM received, shutting down"),
    }
}
