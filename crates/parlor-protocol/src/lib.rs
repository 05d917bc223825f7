//! Chat-facing protocol for Parlor.
//!
//! This crate defines everything that crosses the boundary between the
//! chat platform and the lobby engine:
//!
//! - **Identity** ([`UserId`], [`RoomId`], [`Handle`], [`Caller`]): who
//!   is talking and which room they mean.
//! - **Inbound** ([`Update`], [`UpdateKind`], [`Command`], [`Action`]):
//!   what the user did. Button payloads are parsed exactly once, here,
//!   into a closed [`Action`] enum.
//! - **Outbound** ([`Reply`], [`Button`], [`Markup`], [`Delivery`]): the
//!   rendering instruction the engine hands back. The engine never talks
//!   to the platform itself.
//! - **Bridge wire format** ([`Frame`], [`Codec`], [`JsonCodec`]): how
//!   updates and replies travel between a platform bridge and the gateway.
//!
//! ```text
//! Chat platform → bridge → Frame::Update → Lobby engine → Frame::Reply → bridge
//! ```

mod action;
mod codec;
mod error;
mod types;

pub use action::{Action, Command, GameChoice, MenuChoice};
pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    Button, Caller, Delivery, Frame, Handle, LanguageTag, Markup, Reply,
    RoomId, Update, UpdateKind, UserId,
};

/// Version of the bridge protocol. Bridges must send it in
/// [`Frame::Hello`] or the gateway refuses them.
pub const PROTOCOL_VERSION: u32 = 1;
