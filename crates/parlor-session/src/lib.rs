//! Per-user session state for Parlor.
//!
//! A session is what the server remembers about one chat user between
//! updates:
//!
//! 1. **Input mode**: what the next free-text message means
//!    ([`InputMode`])
//! 2. **Room associations**: the room they own and the room they are in
//!    ([`Membership`])
//! 3. **Language**: the first choice from the welcome keyboard
//!
//! Sessions are created lazily on first contact and live as long as the
//! process. The crate also holds the [`Authenticator`] hook the gateway
//! uses to vet platform bridges.
//!
//! # How it fits in the stack
//!
//! ```text
//! Lobby engine (above)  ← reads/writes sessions under its lock
//!     ↕
//! Session Layer (this crate)
//!     ↕
//! Protocol Layer (below)  ← provides UserId, RoomId, LanguageTag
//! ```

mod auth;
mod error;
mod session;
mod store;

pub use auth::{Authenticator, StaticToken};
pub use error::SessionError;
pub use session::{InputMode, Membership, Role, Session};
pub use store::SessionStore;
