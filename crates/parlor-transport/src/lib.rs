//! Bridge transport for Parlor.
//!
//! A *bridge* is the process that actually talks to the chat platform.
//! It connects to the gateway over a [`Link`] and exchanges text frames:
//! updates in, replies out. The [`Gateway`] trait accepts links.
//!
//! # Feature Flags
//!
//! - `websocket` (default): WebSocket links via `tokio-tungstenite`

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "websocket")]
mod websocket;

pub use error::TransportError;
#[cfg(feature = "websocket")]
pub use websocket::{WebSocketGateway, WebSocketLink};

use std::fmt;

/// Identifies one bridge link for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkId(u64);

impl LinkId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "link-{}", self.0)
    }
}

/// Accepts incoming bridge links.
pub trait Gateway: Send + Sync + 'static {
    type Link: Link;

    /// Waits for the next bridge to connect.
    async fn accept(&mut self) -> Result<Self::Link, TransportError>;

    /// The address bridges should connect to.
    fn local_addr(&self) -> std::io::Result<std::net::SocketAddr>;
}

/// One connected bridge: a bidirectional stream of text frames.
///
/// Sending and receiving may happen concurrently from different tasks.
pub trait Link: Send + Sync + 'static {
    /// Sends one text frame.
    async fn send_text(&self, frame: &str) -> Result<(), TransportError>;

    /// Waits for the next text frame.
    ///
    /// Returns `Ok(None)` once the bridge has closed the link.
    async fn recv_text(&self) -> Result<Option<String>, TransportError>;

    /// Closes the link.
    async fn close(&self) -> Result<(), TransportError>;

    fn id(&self) -> LinkId;
}
