//! Wire protocol for Wayfarer.
//!
//! This crate defines the language the game server speaks to its clients:
//!
//! - **Envelopes and events** ([`Envelope`], [`GameEvent`], [`Command`]) —
//!   the tagged frames that travel on the socket.
//! - **Payload types** ([`types`]) — one typed shape per event tag.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how frames are converted
//!   to and from wire text.
//! - **Errors** ([`ProtocolError`]) — what can go wrong doing so.
//!
//! The protocol layer knows nothing about sockets, reconnection, or state —
//! it only describes frames.
//!
//! ```text
//! Transport (text frames) → Protocol (Envelope) → Projections (typed state)
//! ```

mod codec;
mod error;
mod events;
pub mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use events::{Command, Envelope, GameEvent};
