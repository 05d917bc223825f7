//! Deterministic room numbering.

use parlor_protocol::RoomId;

use crate::{RoomConfig, RoomError};

/// Hands out room numbers from the current room count.
///
/// The `n`-th room (counting from zero) gets `first_room_id + n`. Rooms
/// are never deleted, so the count only grows and a number is never
/// handed out twice. The registry still double-checks on insert.
#[derive(Debug, Clone)]
pub struct RoomIdAllocator {
    first_room_id: u64,
    max_rooms: usize,
}

impl RoomIdAllocator {
    pub fn new(config: &RoomConfig) -> Self {
        Self {
            first_room_id: config.first_room_id,
            max_rooms: config.max_rooms,
        }
    }

    /// Returns the number for the next room, given how many exist now.
    ///
    /// # Errors
    /// [`RoomError::CapacityExceeded`] once `current_count` reaches the
    /// configured maximum (or the number would overflow `u64`).
    pub fn allocate(&self, current_count: usize) -> Result<RoomId, RoomError> {
        let exceeded = RoomError::CapacityExceeded {
            max: self.max_rooms,
        };
        if current_count >= self.max_rooms {
            return Err(exceeded);
        }
        self.first_room_id
            .checked_add(current_count as u64)
            .map(RoomId)
            .ok_or(exceeded)
    }

    pub fn max_rooms(&self) -> usize {
        self.max_rooms
    }
}
