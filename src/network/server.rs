//! HTTP Server
//!
//! Binds the listener and serves the API router.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::api;
use crate::error::Result;
use crate::store::DocumentStore;

/// HTTP server for chirpdb
pub struct Server {
    /// Bound listener
    listener: TcpListener,

    /// Shared store, handed to every request
    store: Arc<DocumentStore>,
}

impl Server {
    /// Bind to the listen address in the store's config
    pub async fn bind(store: Arc<DocumentStore>) -> Result<Self> {
        let addr = store.config().listen_addr.clone();
        let listener = TcpListener::bind(&addr).await?;

        Ok(Self { listener, store })
    }

    /// Address actually bound (useful with port 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until Ctrl+C
    pub async fn run(self) -> Result<()> {
        self.run_until(shutdown_signal()).await
    }

    /// Serve until `shutdown` resolves, then drain in-flight requests
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.local_addr()?;
        tracing::info!("Listening on http://{}", addr);

        let router = api::router(self.store);
        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Server on {} stopped", addr);
        Ok(())
    }
}

/// Resolves on Ctrl+C
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received Ctrl+C, initiating shutdown..."),
        Err(e) => {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
