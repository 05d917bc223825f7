//! # Parlor
//!
//! Chat-driven room lobby for multiplayer party games.
//!
//! Users talk to a bot. Through commands and inline buttons they pick a
//! language, create a numbered room, share its number, join by typing
//! the number or pressing a button, and watch the lobby fill until the
//! owner starts the game.
//!
//! The [`Lobby`] engine holds all state and is transport-agnostic: feed
//! it an [`Update`](parlor_protocol::Update), get back an optional
//! [`Reply`](parlor_protocol::Reply). [`ParlorServer`] puts it behind a
//! WebSocket gateway that chat-platform bridges connect to.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use parlor::prelude::*;
//!
//! # async fn run() -> Result<(), parlor::ParlorError> {
//! let config = GatewayConfig::from_env()?;
//! let server = ParlorServerBuilder::new()
//!     .bind(&config.bind_addr)
//!     .room_config(config.rooms)
//!     .build(StaticToken::new(config.bot_token))
//!     .await?;
//! server.run().await
//! # }
//! ```
//!
//! Or drive the engine directly:
//!
//! ```rust
//! use parlor::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let lobby = Lobby::default();
//! let alice = Caller::new(1).with_username("alice");
//!
//! let room_id = lobby.create_room(&alice).await.unwrap();
//! assert_eq!(room_id, RoomId(1000));
//! # }
//! ```

mod config;
mod error;
mod handler;
mod lobby;
mod render;
mod roles;
mod server;

pub use config::{ConfigError, GatewayConfig};
pub use error::{LobbyError, ParlorError};
pub use lobby::{JoinOutcome, Lobby, LobbyView};
pub use roles::{DeferredRoles, RoleAssigner};
pub use server::{ParlorServer, ParlorServerBuilder};

/// Everything needed to run or embed the lobby.
pub mod prelude {
    pub use crate::{
        ConfigError, DeferredRoles, GatewayConfig, JoinOutcome, Lobby,
        LobbyError, LobbyView, ParlorError, ParlorServer, ParlorServerBuilder,
        RoleAssigner,
    };
    pub use parlor_protocol::{
        Action, Button, Caller, Codec, Delivery, Frame, Handle, JsonCodec,
        LanguageTag, Markup, PROTOCOL_VERSION, Reply, RoomId, Update,
        UpdateKind, UserId,
    };
    pub use parlor_room::{Room, RoomConfig, RoomError, RoomPhase};
    pub use parlor_session::{
        Authenticator, InputMode, Role, Session, SessionError, StaticToken,
    };
}
