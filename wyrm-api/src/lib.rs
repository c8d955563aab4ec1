//! # Wyrm API Server
//!
//! REST surface over the Wyrm name service engine, consumed by browser
//! and wallet clients.
//!
//! ## Endpoints
//!
//! - `POST /api/v1/names` - Register a name
//! - `GET  /api/v1/names` - Enumerate all registrations
//! - `GET  /api/v1/names/:name` - Fetch the full entry
//! - `GET  /api/v1/names/:name/owner` - Resolve the owner
//! - `GET  /api/v1/names/:name/record` - Resolve the record
//! - `PUT  /api/v1/names/:name/record` - Replace the record (owner only)
//! - `GET  /api/v1/names/:name/quote` - Price a candidate name
//!
//! ## Example
//!
//! ```rust,ignore
//! use wyrm_api::{ApiServer, ApiConfig};
//!
//! let server = ApiServer::new(ApiConfig::default());
//! server.run(([0, 0, 0, 0], 3001)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod dto;
mod error;
mod handlers;
mod routes;
mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::{ApiConfig, AppState};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// API server for the Wyrm name service.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a server with an in-memory store.
    pub fn new(config: ApiConfig) -> Self {
        Self {
            state: Arc::new(AppState::new(config)),
        }
    }

    /// Creates a server over a pre-built state (e.g. a file-backed store).
    pub fn with_state(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Creates the router with all routes and middleware configured.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!("Wyrm API server listening on {}", addr);

        axum::serve(listener, self.router()).await
    }
}
