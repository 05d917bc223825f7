//! The room registry: the authoritative room table.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use parlor_protocol::{Handle, RoomId, UserId};

use crate::{Room, RoomConfig, RoomError, RoomIdAllocator, RoomPhase};

/// Result of [`RoomRegistry::add_member`].
///
/// Re-adding an existing member is not an error, but callers need to
/// tell it apart from a fresh join to word their reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberAdded {
    /// The handle was appended to the member list.
    Joined,
    /// The handle was already there; nothing changed.
    AlreadyMember,
}

/// Maps room IDs to rooms.
///
/// Not thread-safe by itself. Every method takes `&mut self` or `&self`,
/// so wrapping the registry in one lock makes "allocate + insert" and
/// "check membership + append" atomic for free.
#[derive(Debug)]
pub struct RoomRegistry {
    /// `BTreeMap` so `room_ids()` comes back in creation order.
    rooms: BTreeMap<RoomId, Room>,
    allocator: RoomIdAllocator,
}

impl RoomRegistry {
    pub fn new(config: RoomConfig) -> Self {
        Self {
            rooms: BTreeMap::new(),
            allocator: RoomIdAllocator::new(&config),
        }
    }

    /// Creates an empty room owned by `owner`.
    ///
    /// # Errors
    /// - [`RoomError::CapacityExceeded`]: no room numbers left
    /// - [`RoomError::IdInUse`]: the allocated number is taken (the
    ///   existing room is left untouched)
    pub fn create_room(&mut self, owner: UserId) -> Result<&Room, RoomError> {
        let room_id = self.allocator.allocate(self.rooms.len())?;

        match self.rooms.entry(room_id) {
            Entry::Occupied(_) => Err(RoomError::IdInUse(room_id)),
            Entry::Vacant(slot) => {
                tracing::info!(%room_id, %owner, "room created");
                Ok(slot.insert(Room::new(room_id, owner)))
            }
        }
    }

    pub fn get(&self, room_id: RoomId) -> Option<&Room> {
        self.rooms.get(&room_id)
    }

    /// Like [`get`](Self::get), but a missing room is an error.
    pub fn lookup(&self, room_id: RoomId) -> Result<&Room, RoomError> {
        self.get(room_id).ok_or(RoomError::NotFound(room_id))
    }

    fn lookup_mut(&mut self, room_id: RoomId) -> Result<&mut Room, RoomError> {
        self.rooms
            .get_mut(&room_id)
            .ok_or(RoomError::NotFound(room_id))
    }

    /// Appends `handle` to the room's members unless it is already there.
    ///
    /// # Errors
    /// [`RoomError::NotFound`] if the room does not exist.
    pub fn add_member(
        &mut self,
        room_id: RoomId,
        handle: Handle,
    ) -> Result<MemberAdded, RoomError> {
        let room = self.lookup_mut(room_id)?;
        if room.contains(&handle) {
            tracing::debug!(%room_id, %handle, "already a member");
            return Ok(MemberAdded::AlreadyMember);
        }

        tracing::info!(
            %room_id,
            %handle,
            members = room.members.len() + 1,
            "member joined"
        );
        room.members.push(handle);
        Ok(MemberAdded::Joined)
    }

    /// Removes `handle` from the room, keeping the others in order.
    ///
    /// # Errors
    /// [`RoomError::NotFound`] or [`RoomError::NotMember`].
    pub fn remove_member(
        &mut self,
        room_id: RoomId,
        handle: &Handle,
    ) -> Result<(), RoomError> {
        let room = self.lookup_mut(room_id)?;
        let before = room.members.len();
        room.members.retain(|m| m != handle);
        if room.members.len() == before {
            return Err(RoomError::NotMember(room_id, handle.clone()));
        }

        tracing::info!(
            %room_id,
            %handle,
            members = room.members.len(),
            "member left"
        );
        Ok(())
    }

    /// Member handles of a room, in join order.
    pub fn members(&self, room_id: RoomId) -> Result<&[Handle], RoomError> {
        self.lookup(room_id).map(Room::members)
    }

    /// Moves a room from `Lobby` to `Started` on behalf of `by`.
    ///
    /// # Errors
    /// - [`RoomError::NotFound`]
    /// - [`RoomError::NotOwner`]: `by` is not the room's owner; the room
    ///   is left as it was
    /// - [`RoomError::AlreadyStarted`]
    pub fn start(&mut self, room_id: RoomId, by: UserId) -> Result<&Room, RoomError> {
        let room = self.lookup_mut(room_id)?;
        if !room.is_owner(by) {
            tracing::debug!(%room_id, user = %by, "non-owner tried to start");
            return Err(RoomError::NotOwner(room_id, by));
        }
        if !room.phase.can_transition_to(RoomPhase::Started) {
            return Err(RoomError::AlreadyStarted(room_id));
        }

        room.phase = RoomPhase::Started;
        tracing::info!(
            %room_id,
            players = room.members.len(),
            "game started"
        );
        Ok(room)
    }

    /// Number of rooms.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// All room IDs, lowest first.
    pub fn room_ids(&self) -> Vec<RoomId> {
        self.rooms.keys().copied().collect()
    }

    pub fn max_rooms(&self) -> usize {
        self.allocator.max_rooms()
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new(RoomConfig::default())
    }
}
