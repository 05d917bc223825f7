//! A single room's state.

use parlor_protocol::{Handle, RoomId, UserId};

use crate::RoomPhase;

/// One room: who owns it, who is in it, and whether it has started.
///
/// Rooms are only mutated through [`RoomRegistry`](crate::RoomRegistry),
/// which keeps `members` free of duplicates and in join order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub(crate) id: RoomId,
    pub(crate) owner: UserId,
    pub(crate) members: Vec<Handle>,
    pub(crate) phase: RoomPhase,
}

impl Room {
    pub(crate) fn new(id: RoomId, owner: UserId) -> Self {
        Self {
            id,
            owner,
            members: Vec::new(),
            phase: RoomPhase::Lobby,
        }
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    /// The user who created the room. Never changes.
    pub fn owner(&self) -> UserId {
        self.owner
    }

    pub fn is_owner(&self, user: UserId) -> bool {
        self.owner == user
    }

    /// Member handles in join order.
    pub fn members(&self) -> &[Handle] {
        &self.members
    }

    pub fn contains(&self, handle: &Handle) -> bool {
        self.members.contains(handle)
    }

    pub fn phase(&self) -> RoomPhase {
        self.phase
    }

    /// Members as shown to users: `"@alice, Bob"`.
    pub fn member_list(&self) -> String {
        self.members
            .iter()
            .map(Handle::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_room_is_empty_lobby() {
        let room = Room::new(RoomId(1000), UserId(1));
        assert!(room.members().is_empty());
        assert_eq!(room.phase(), RoomPhase::Lobby);
        assert!(room.is_owner(UserId(1)));
        assert!(!room.is_owner(UserId(2)));
    }

    #[test]
    fn test_member_list_joins_in_order() {
        let mut room = Room::new(RoomId(1000), UserId(1));
        room.members.push(Handle::from("@alice"));
        room.members.push(Handle::from("Bob"));
        assert_eq!(room.member_list(), "@alice, Bob");
    }
}
