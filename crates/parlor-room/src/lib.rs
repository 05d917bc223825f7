//! Room registry for Parlor.
//!
//! Rooms are numbered groups a user creates and others join by ID. This
//! crate owns the authoritative room table and nothing else: it knows
//! owners, member handles, and lobby phase, but not who is typing what.
//!
//! # Key types
//!
//! - [`RoomRegistry`]: creates rooms, adds/removes members, starts games
//! - [`RoomIdAllocator`]: deterministic, capacity-limited room numbering
//! - [`Room`]: one room's owner, members, and [`RoomPhase`]
//! - [`RoomConfig`]: first room number and maximum room count
//!
//! The registry is a plain single-owner struct. Callers that share it
//! between tasks wrap it in a lock; see the `parlor` crate.

mod allocator;
mod config;
mod error;
mod registry;
mod room;

pub use allocator::RoomIdAllocator;
pub use config::{RoomConfig, RoomPhase};
pub use error::RoomError;
pub use registry::{MemberAdded, RoomRegistry};
pub use room::Room;
