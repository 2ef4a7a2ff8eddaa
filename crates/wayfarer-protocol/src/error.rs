//! Error types for the protocol layer.

/// Errors that can occur while encoding or decoding frames.
///
/// Decode failures are per-frame and recoverable: the connection manager
/// drops the offending frame, logs it, and keeps reading the stream.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed. With the types in this crate that is close to
    /// unreachable, but the codec surface stays honest about it.
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed: malformed JSON, an event tag outside the
    /// vocabulary, or a payload that doesn't match its tag's shape.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),
}
