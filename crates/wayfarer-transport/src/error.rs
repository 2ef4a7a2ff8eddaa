//! Error types for the transport layer.

/// Errors that can occur on a connection.
///
/// Variants carry the source's display form rather than a concrete error
/// type: the websocket and memory transports fail with unrelated types,
/// and the retry loop above only ever matches on the variant.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Opening the connection failed (DNS, TCP, handshake, refused dial).
    #[error("connect failed: {0}")]
    ConnectFailed(String),

    /// Sending a frame failed.
    #[error("send failed: {0}")]
    SendFailed(String),

    /// Receiving a frame failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(String),

    /// The connection is closed.
    #[error("connection closed")]
    Closed,
}
