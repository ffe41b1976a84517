//! Proxy module
//!
//! Server-side route handlers that relay scrape-control requests to the
//! backend, plus the wire types shared with the session client.

pub mod fallback;
mod routes;
mod types;

pub use routes::{create_router, ApiError, ProxyState};
pub use types::{ApiEnvelope, MaxQuotes, StartRequest};

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::backend::BackendClient;
use crate::config::Config;
use crate::RelayError;

/// HTTP server exposing the proxy routes
pub struct ProxyServer {
    addr: SocketAddr,
    state: Arc<ProxyState>,
}

impl ProxyServer {
    /// Creates a server from a validated configuration
    ///
    /// # Returns
    ///
    /// * `Ok(ProxyServer)` - Server ready to run
    /// * `Err(RelayError)` - The backend client or the listen address is invalid
    pub fn new(config: &Config) -> Result<Self, RelayError> {
        let backend = BackendClient::new(&config.backend)?;
        let ip: IpAddr = config.server.bind_address.parse().map_err(|_| {
            crate::ConfigError::Validation(format!(
                "bind_address must be an IP address, got '{}'",
                config.server.bind_address
            ))
        })?;

        Ok(Self {
            addr: SocketAddr::new(ip, config.server.port),
            state: Arc::new(ProxyState::new(backend, config.mode)),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Runs the server until Ctrl-C is received
    pub async fn run(self) -> Result<(), RelayError> {
        let app = create_router(self.state.clone());
        let listener = TcpListener::bind(self.addr).await?;

        tracing::info!(
            addr = %self.addr,
            mode = %self.state.mode(),
            backend = %self.state.backend_url(),
            "Proxy server listening"
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Proxy server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
