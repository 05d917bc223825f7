//! Hook for what happens after the owner starts a game.
//!
//! Dealing roles is game-specific and lives outside the lobby. The engine
//! calls [`RoleAssigner::assign_roles`] exactly once per room, right after
//! the room moves to `Started`, with the locks already released.

use parlor_room::Room;

/// Receives a room the moment its game starts.
pub trait RoleAssigner: Send + Sync + 'static {
    fn assign_roles(&self, room: &Room);
}

/// Assigns nothing. The start confirmation still tells players to check
/// their private messages, which is where a real assigner would write.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeferredRoles;

impl RoleAssigner for DeferredRoles {
    fn assign_roles(&self, room: &Room) {
        tracing::info!(
            room_id = %room.id(),
            players = room.members().len(),
            "role assignment deferred"
        );
    }
}
