//! Room configuration and lobby phase.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// RoomConfig
// ---------------------------------------------------------------------------

/// Numbering and capacity policy for rooms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomConfig {
    /// Number given to the first room. Later rooms count up from here.
    pub first_room_id: u64,

    /// Maximum number of rooms that may exist at once. Creation fails
    /// with `CapacityExceeded` beyond this.
    pub max_rooms: usize,
}

impl Default for RoomConfig {
    /// Four-digit room numbers: 1000 through 9999.
    fn default() -> Self {
        Self {
            first_room_id: 1000,
            max_rooms: 9000,
        }
    }
}

// ---------------------------------------------------------------------------
// RoomPhase
// ---------------------------------------------------------------------------

/// Where a room is in its lifecycle.
///
/// ```text
/// Lobby ──(owner starts)──→ Started
/// ```
///
/// - **Lobby**: accepting members; the owner may start the game.
/// - **Started**: the owner has started the game. Terminal: there is no
///   reset or end transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomPhase {
    Lobby,
    Started,
}

impl RoomPhase {
    /// The phase after this one, or `None` if this one is terminal.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Lobby => Some(Self::Started),
            Self::Started => None,
        }
    }

    pub fn can_transition_to(self, target: Self) -> bool {
        self.next() == Some(target)
    }

    pub fn is_started(self) -> bool {
        matches!(self, Self::Started)
    }
}

impl std::fmt::Display for RoomPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lobby => write!(f, "Lobby"),
            Self::Started => write!(f, "Started"),
        }
    }
}
