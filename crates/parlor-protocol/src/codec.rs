//! Codec trait and implementations for bridge frames.
//!
//! Bridges speak text frames, so a codec turns values into `String`s and
//! back. [`JsonCodec`] is the only implementation for now; it keeps the
//! traffic readable when you tail a bridge log.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Encodes values to text frames and decodes them back.
///
/// `Send + Sync + 'static` because the gateway shares one codec across
/// every link task.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into a text frame.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if the value cannot be represented.
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ProtocolError>;

    /// Parses a text frame back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` for malformed or mistyped input.
    fn decode<T: DeserializeOwned>(
        &self,
        data: &str,
    ) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] backed by `serde_json`.
///
/// ```rust
/// use parlor_protocol::{Codec, Frame, JsonCodec, PROTOCOL_VERSION};
///
/// let codec = JsonCodec;
/// let hello = Frame::Hello {
///     version: PROTOCOL_VERSION,
///     token: "secret".into(),
/// };
///
/// let text = codec.encode(&hello).unwrap();
/// let back: Frame = codec.decode(&text).unwrap();
/// assert_eq!(hello, back);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ProtocolError> {
        serde_json::to_string(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(
        &self,
        data: &str,
    ) -> Result<T, ProtocolError> {
        serde_json::from_str(data).map_err(ProtocolError::Decode)
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use crate::{Caller, Frame, Update, UpdateKind, UserId};

    #[test]
    fn test_decode_garbage_returns_decode_error() {
        let result: Result<Frame, _> = JsonCodec.decode("{not json");
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_decode_unknown_frame_type_returns_decode_error() {
        let result: Result<Frame, _> =
            JsonCodec.decode(r#"{"type":"Teleport"}"#);
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_decode_update_frame_from_bridge_json() {
        // The shape a bridge actually sends.
        let json = r#"{
            "type": "Update",
            "update": {
                "id": 7,
                "from": { "id": 42, "username": "alice", "first_name": "Alice" },
                "kind": { "Callback": "menu_create" }
            }
        }"#;

        let frame: Frame = JsonCodec.decode(json).expect("should decode");

        assert_eq!(
            frame,
            Frame::Update {
                update: Update {
                    id: 7,
                    from: Caller {
                        id: UserId(42),
                        username: Some("alice".into()),
                        first_name: Some("Alice".into()),
                    },
                    kind: UpdateKind::Callback("menu_create".into()),
                },
            }
        );
    }
}
