//! Error types for the engine and the unified framework error.

use parlor_protocol::{ProtocolError, RoomId};
use parlor_room::RoomError;
use parlor_session::SessionError;
use parlor_transport::TransportError;

use crate::config::ConfigError;

/// Why a lobby operation was refused.
///
/// None of these are failures of the server. Each one is rendered as a
/// message to the user and leaves state exactly as it was.
#[derive(Debug, thiserror::Error)]
pub enum LobbyError {
    /// Free text that is not a plain decimal room number.
    #[error("not a room id: {0:?}")]
    InvalidInput(String),

    /// The user already owns a room; no new one is allocated.
    #[error("user already owns room {0}")]
    AlreadyHasRoom(RoomId),

    /// Free text arrived while the user was not asked for a room ID.
    #[error("not waiting for a room id")]
    NotAwaitingRoomId,

    /// A lobby or start action from a user who has not joined a room.
    #[error("not in a room")]
    NotInRoom,

    /// Rejected by the room registry (not found, full, not owner, ...).
    #[error(transparent)]
    Room(#[from] RoomError),
}

/// Top-level error that wraps every crate-specific error.
///
/// `#[from]` on each variant lets `?` convert sub-crate errors.
#[derive(Debug, thiserror::Error)]
pub enum ParlorError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Room(#[from] RoomError),

    #[error(transparent)]
    Lobby(#[from] LobbyError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
