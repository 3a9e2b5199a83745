//! Prometheus metrics for monitoring game server health.
//!
//! Metrics go through the `metrics` facade. When no exporter is installed
//! the calls are no-ops, so handlers record unconditionally.
//!
//! # Metrics Categories
//!
//! - **WebSocket Metrics**: Active connections, messages sent/received
//! - **Game Metrics**: Actions by outcome, active sessions, finished games
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use dc_server::metrics;
//! use std::net::SocketAddr;
//!
//! let addr: SocketAddr = "127.0.0.1:9090".parse().unwrap();
//! metrics::init_metrics(addr).unwrap();
//!
//! metrics::websocket_connections_total();
//! metrics::game_actions_total("joinGame", true);
//! ```

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Initialize Prometheus metrics exporter.
///
/// Metrics will be available at `http://<addr>/metrics`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {}", e))
}

// ============================================================================
// WebSocket Metrics
// ============================================================================

/// Set current active WebSocket connections count.
pub fn websocket_connections_active(count: u64) {
    metrics::gauge!("websocket_connections_active").set(count as f64);
}

/// Increment total WebSocket connections counter.
pub fn websocket_connections_total() {
    metrics::counter!("websocket_connections_total").increment(1);
}

/// Increment WebSocket messages sent counter.
pub fn websocket_messages_sent() {
    metrics::counter!("websocket_messages_sent").increment(1);
}

/// Increment WebSocket messages received counter.
pub fn websocket_messages_received() {
    metrics::counter!("websocket_messages_received").increment(1);
}

/// Increment the counter of messages that failed parsing or validation.
pub fn rejected_messages_total(reason: &'static str) {
    metrics::counter!("rejected_messages_total", "reason" => reason).increment(1);
}

// ============================================================================
// Game Metrics
// ============================================================================

/// Record a game action by type and outcome.
pub fn game_actions_total(action: &'static str, success: bool) {
    metrics::counter!("game_actions_total",
        "action" => action,
        "success" => success.to_string()
    )
    .increment(1);
}

/// Set current active game sessions count.
pub fn active_sessions(count: usize) {
    metrics::gauge!("active_sessions").set(count as f64);
}

/// Increment finished games counter.
pub fn games_finished_total() {
    metrics::counter!("games_finished_total").increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_exporter() {
        // No recorder installed; these must be no-ops.
        websocket_connections_total();
        websocket_connections_active(3);
        game_actions_total("joinTeam", false);
        rejected_messages_total("missing_field");
        active_sessions(1);
        games_finished_total();
    }
}
