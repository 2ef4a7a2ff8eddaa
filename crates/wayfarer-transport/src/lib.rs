//! Transport abstraction layer for Wayfarer.
//!
//! The client owns exactly one outbound channel per session. This crate
//! provides the [`Dialer`] and [`Connection`] traits that abstract over how
//! that channel is opened and driven, so the connection manager's
//! reconnect/dispatch logic never touches a socket API directly.
//!
//! Two implementations ship here:
//!
//! - [`WebSocketDialer`] (feature `websocket`, default) — the real thing,
//!   via `tokio-tungstenite`.
//! - [`MemoryDialer`] — an in-process pair of channels, used by the client
//!   and session test suites to script connection failures and feed frames
//!   without a network.

#![allow(async_fn_in_trait)]

mod error;
mod memory;
#[cfg(feature = "websocket")]
mod websocket;

pub use error::TransportError;
pub use memory::{MemoryConnection, MemoryDialer, memory_pair};
#[cfg(feature = "websocket")]
pub use websocket::{WebSocketConnection, WebSocketDialer};

/// Opens connections to a remote endpoint.
///
/// A dialer is the client-side mirror of a listener: the connection
/// manager calls [`dial`](Self::dial) once per connection attempt, passing
/// the full URL (credential query parameter included).
pub trait Dialer: Send + Sync + 'static {
    /// The connection type produced by this dialer.
    type Conn: Connection;

    /// Attempts to open a connection to `url`.
    fn dial(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = Result<Self::Conn, TransportError>> + Send;
}

/// A single open channel carrying text frames.
pub trait Connection: Send + Sync + 'static {
    /// Sends one text frame to the remote peer.
    fn send(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<(), TransportError>> + Send;

    /// Receives the next text frame from the remote peer.
    ///
    /// Returns `Ok(None)` when the connection is cleanly closed.
    fn recv(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<String>, TransportError>> + Send;

    /// Closes the connection.
    fn close(&self) -> impl std::future::Future<Output = Result<(), TransportError>> + Send;
}
