//! Error types for the room layer.

use parlor_protocol::{Handle, RoomId, UserId};

/// Errors that can occur during room operations.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// The room does not exist.
    #[error("room {0} not found")]
    NotFound(RoomId),

    /// Every room number is taken.
    #[error("no rooms available (limit {max})")]
    CapacityExceeded { max: usize },

    /// The allocator handed out a number that is already registered.
    /// The registry refuses rather than overwrite the existing room.
    #[error("room id {0} is already in use")]
    IdInUse(RoomId),

    /// Someone other than the owner tried an owner-only operation.
    #[error("{1} is not the owner of room {0}")]
    NotOwner(RoomId, UserId),

    /// The game in this room has already been started.
    #[error("room {0} has already started")]
    AlreadyStarted(RoomId),

    /// The handle is not in the room's member list.
    #[error("{1} is not a member of room {0}")]
    NotMember(RoomId, Handle),
}
