//! Client configuration.

use std::time::Duration;

/// Tunables for the connection manager.
///
/// The retry bound and delay are deliberately small and fixed: a dropped
/// game socket either comes back within seconds or the player re-logs.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// WebSocket endpoint, e.g. `ws://play.example.com/ws`. The bearer
    /// token is appended as a `token` query parameter at dial time.
    pub endpoint: String,

    /// How many reconnect attempts follow a failed or dropped connection
    /// before the manager gives up for good.
    pub max_reconnect_attempts: u32,

    /// Fixed delay between reconnect attempts.
    pub reconnect_delay: Duration,

    /// Capacity of the broadcast event bus. A subscriber that falls this
    /// many frames behind skips the overrun instead of stalling the bus.
    pub event_buffer: usize,
}

impl ClientConfig {
    /// Config for the given endpoint with default retry behavior.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "ws://127.0.0.1:3000/ws".to_string(),
            max_reconnect_attempts: 5,
            reconnect_delay: Duration::from_millis(2000),
            event_buffer: 256,
        }
    }
}
