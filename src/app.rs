//! Server lifecycle: binds the listener and serves the router.

use crate::api::{self, AppState};
use crate::models::Config;
use crate::Result;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

pub struct App {
    listener: TcpListener,
    state: AppState,
}

impl App {
    /// Build clients from `config` and bind `host:port` (port 0 picks a free one).
    pub async fn new(config: &Config) -> Result<Self> {
        let state = AppState::from_config(config)?;
        Self::with_state(state, &config.host, config.port).await
    }

    /// Bind with pre-built state, used by tests to inject mocks.
    pub async fn with_state(state: AppState, host: &str, port: u16) -> Result<Self> {
        let listener = TcpListener::bind((host, port)).await.map_err(|e| {
            tracing::error!("Failed to bind {}:{}: {}", host, port, e);
            e
        })?;

        Ok(Self { listener, state })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until the process receives Ctrl-C.
    pub async fn run(self) -> Result<()> {
        info!("Listening on http://{}", self.local_addr()?);

        axum::serve(self.listener, api::router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
