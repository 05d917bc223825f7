//! Error types for the protocol layer.

/// Errors that can occur while parsing chat input or (de)serializing
/// bridge frames.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serializing a frame failed.
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// The bytes on the wire were not a valid frame.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// A button payload that does not map to any known [`Action`].
    ///
    /// [`Action`]: crate::Action
    #[error("unknown action payload: {0:?}")]
    InvalidAction(String),

    /// A language code that is empty or not ASCII alphanumeric.
    #[error("invalid language code: {0:?}")]
    InvalidLanguage(String),

    /// A frame that decodes fine but breaks bridge protocol rules,
    /// e.g. an `Update` before the `Hello` handshake.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
