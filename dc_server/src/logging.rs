//! Structured logging configuration.
//!
//! The game library logs through the `log` facade; the subscriber installed
//! here also captures those records so library and server output share one
//! format and one filter.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured logging
///
/// Log levels come from `RUST_LOG`, defaulting to `info`.
///
/// # Example
///
/// ```no_run
/// use dc_server::logging;
///
/// #[tokio::main]
/// async fn main() {
///     logging::init();
///     tracing::info!("Server starting");
/// }
/// ```
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hyper=warn,tungstenite=warn"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!("Structured logging initialized");
}

/// Log a websocket connection lifecycle event
///
/// # Arguments
///
/// * `connection_id` - Per-connection id assigned on upgrade
/// * `event` - What happened (`connected`, `disconnected`, ...)
pub fn log_connection_event(connection_id: &str, event: &str) {
    tracing::info!(connection_id = connection_id, event = event, "WebSocket {event}");
}

/// Log an inbound message that couldn't be turned into a game action
///
/// Malformed payloads are dropped silently on the wire, so they log at
/// warn; validation failures are answered and only log at debug.
pub fn log_rejected_message(connection_id: &str, reason: &str, replied: bool) {
    if replied {
        tracing::debug!(
            connection_id = connection_id,
            reason = reason,
            "Rejected message"
        );
    } else {
        tracing::warn!(
            connection_id = connection_id,
            reason = reason,
            "Dropped malformed message"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_connection_event() {
        // Just ensure it doesn't panic
        log_connection_event("conn-1", "connected");
    }

    #[test]
    fn test_log_rejected_message() {
        log_rejected_message("conn-1", "Messages require a 'type'.", true);
        log_rejected_message("conn-1", "expected a JSON object", false);
    }
}
