//! HTTP/WebSocket API for the game server.
//!
//! # Endpoints Overview
//!
//! - `GET /ws` - Establish a WebSocket connection and play
//! - `GET /health` - Server health status
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use dc_server::{api::{AppState, create_router}, config::ServerConfig};
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let state = AppState::new(&ServerConfig::default())?;
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8081").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # CORS
//!
//! CORS is configured permissively for development. In production, configure
//! appropriate origins, methods, and headers.

pub mod websocket;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
};
use decrypto::{SessionError, SessionRegistry};
use serde_json::json;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use tower_http::cors::CorsLayer;

use crate::config::ServerConfig;

/// Application state shared across all HTTP handlers and WebSocket connections.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<SessionRegistry>,
    /// Outbound queue size for each websocket connection
    pub channel_capacity: usize,
    /// Currently open websocket connections
    pub connections: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Result<Self, SessionError> {
        Ok(Self {
            registry: Arc::new(SessionRegistry::new(config.session_config())?),
            channel_capacity: config.channel_capacity,
            connections: Arc::new(AtomicU64::new(0)),
        })
    }
}

/// Create the API router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ws", get(websocket::websocket_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint for monitoring and load balancers.
///
/// # Example
///
/// ```bash
/// curl http://localhost:8081/health
/// # {"status":"healthy","version":"0.1.0","sessions":{"active_count":2},"connections":5,"timestamp":"2026-01-01T10:30:00Z"}
/// ```
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let session_count = state.registry.session_count().await;

    let response = json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "sessions": {
            "active_count": session_count
        },
        "connections": state.connections.load(Ordering::Relaxed),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(response))
}
