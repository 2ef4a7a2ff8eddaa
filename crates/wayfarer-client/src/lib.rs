//! Connection management for Wayfarer.
//!
//! This crate owns the client's only socket:
//!
//! 1. **Connection manager** ([`ConnectionManager`]) — dials the endpoint
//!    with the bearer token, pumps frames, retries within a bounded budget,
//!    and turns a server `error` frame into a forced logout.
//! 2. **Event bus** ([`EventStream`]) — each inbound frame is decoded once
//!    and fanned out typed to every subscriber, in order, uncoalesced.
//! 3. **Auth boundary** ([`AuthClient`], [`CredentialStore`]) — obtains and
//!    holds the bearer token the socket dials with.
//!
//! # How it fits in the stack
//!
//! ```text
//! Projections (above)  ← subscribe to the bus, send through a handle
//!     ↕
//! Client layer (this crate)  ← one socket, reconnects, decodes once
//!     ↕
//! Transport layer (below)  ← Dialer/Connection traits
//! ```

mod auth;
mod bus;
mod config;
mod credentials;
mod error;
mod manager;

pub use auth::{AuthClient, AuthPayload};
pub use bus::EventStream;
pub use config::ClientConfig;
pub use credentials::CredentialStore;
pub use error::ClientError;
pub use manager::{ConnectionHandle, ConnectionManager, ConnectionStatus};
