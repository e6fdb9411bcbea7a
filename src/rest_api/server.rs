//! # HTTP Server
//!
//! Binds the product routes to a socket and serves them, with CORS and
//! request tracing applied at the top level.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServiceConfig;
use crate::store::ProductStore;

use super::routes::{routes, AppState};

/// HTTP server for the Product service
pub struct HttpServer {
    config: ServiceConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server from a config and a connected store.
    pub fn with_config(config: ServiceConfig, store: ProductStore) -> Self {
        let router = Self::build_router(store);
        Self { config, router }
    }

    /// Build the router with its middleware stack
    fn build_router(store: ProductStore) -> Router {
        let state = Arc::new(AppState::new(store));

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        routes(state)
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid socket address: {e}"),
            )
        })?;

        info!("Starting product service on {}", addr);
        info!("Health check: http://{}/healthcheck", addr);
        info!("Product resource: http://{}/products", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}
