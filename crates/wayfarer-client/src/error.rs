//! Error types for the client layer.
//!
//! The socket side of this crate is deliberately infallible at its public
//! surface: sends are fire-and-forget and connection failures surface
//! through [`ConnectionStatus`](crate::ConnectionStatus), not as `Err`s.
//! What remains fallible is the HTTP auth boundary.

/// Errors from the auth boundary.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (connect, timeout, bad body).
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("authentication rejected ({status}): {message}")]
    AuthRejected { status: u16, message: String },
}
