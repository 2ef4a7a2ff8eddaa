//! Codec trait and implementations for serializing/deserializing frames.
//!
//! The socket carries text frames, so a codec here converts between Rust
//! types and `String`s. The trait exists so the connection manager never
//! names a concrete format — [`JsonCodec`] is what the current server
//! speaks, and a binary codec could slot in without touching the manager
//! or the projections.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Converts values to wire text and back.
///
/// `Send + Sync + 'static` because the codec is held by the connection
/// driver task and shared with every handle that encodes outbound
/// commands.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into a text frame.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Encode`] if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ProtocolError>;

    /// Deserializes a text frame back into a value.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Decode`] if the frame is malformed, carries
    /// an unknown event tag, or its payload doesn't match the tag's shape.
    fn decode<T: DeserializeOwned>(&self, text: &str) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] speaking the server's JSON dialect.
///
/// ## Example
///
/// ```rust
/// use wayfarer_protocol::{Codec, Command, Envelope, JsonCodec};
///
/// let codec = JsonCodec;
///
/// let frame = codec.encode(&Command::ToggleAttack).unwrap();
/// assert_eq!(frame, r#"{"event":"toggle_attack"}"#);
///
/// let inbound = r#"{"id":"t-1","event":"gained_cin","data":5}"#;
/// let envelope: Envelope = codec.decode(inbound).unwrap();
/// assert_eq!(envelope.id, "t-1");
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ProtocolError> {
        serde_json::to_string(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, text: &str) -> Result<T, ProtocolError> {
        serde_json::from_str(text).map_err(ProtocolError::Decode)
    }
}
