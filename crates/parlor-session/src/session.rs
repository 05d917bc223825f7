//! Session types: what the server remembers about one chat user.

use parlor_protocol::{LanguageTag, RoomId, UserId};

// ---------------------------------------------------------------------------
// InputMode
// ---------------------------------------------------------------------------

/// How the user's next free-text message is interpreted.
///
/// ```text
///   Idle ──(menu_join)──→ AwaitingRoomId ──(successful join)──→ Idle
/// ```
///
/// A failed join (bad number, unknown room, already a member) leaves the
/// user in `AwaitingRoomId` so they can simply try again. There is no
/// timeout: the mode holds until a join succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Free text is ignored.
    #[default]
    Idle,
    /// Free text is a room ID to join.
    AwaitingRoomId,
}

// ---------------------------------------------------------------------------
// Membership
// ---------------------------------------------------------------------------

/// The user's part in the room they are in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Created the room. Only the owner can start its game.
    Owner,
    Participant,
}

/// "In a room": which one, and as what. The two travel together so a
/// session can never claim a role without a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Membership {
    pub room_id: RoomId,
    pub role: Role,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One user's session.
///
/// `owned_room` and `membership` are independent: an owner has an owned
/// room from the moment it is created but only a membership once they
/// join it, and an owner may be sitting in somebody else's room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,

    /// First language picked on the welcome keyboard. Advisory.
    pub language: Option<LanguageTag>,

    pub input: InputMode,

    /// The room this user created. Only written by the room-creation
    /// path, so it always names a room whose owner is `user_id`.
    pub owned_room: Option<RoomId>,

    /// The room this user joined most recently.
    pub membership: Option<Membership>,
}

impl Session {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            language: None,
            input: InputMode::Idle,
            owned_room: None,
            membership: None,
        }
    }

    /// The room the user is currently in, if any.
    pub fn current_room(&self) -> Option<RoomId> {
        self.membership.map(|m| m.room_id)
    }

    pub fn is_awaiting_room_id(&self) -> bool {
        self.input == InputMode::AwaitingRoomId
    }
}
