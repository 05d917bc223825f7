//! `ParlorServer` builder and gateway accept loop.
//!
//! Ties the layers together: bridge link → frames → lobby engine.

use std::sync::Arc;

use parlor_protocol::JsonCodec;
use parlor_room::RoomConfig;
use parlor_session::Authenticator;
use parlor_transport::{Gateway, WebSocketGateway};

use crate::handler::handle_link;
use crate::roles::{DeferredRoles, RoleAssigner};
use crate::{Lobby, ParlorError};

/// Shared state handed to every link task.
pub(crate) struct ServerState<A: Authenticator, R: RoleAssigner> {
    pub(crate) lobby: Arc<Lobby<R>>,
    pub(crate) auth: A,
    pub(crate) codec: JsonCodec,
}

/// Builder for configuring and starting the gateway.
///
/// ```rust,ignore
/// let server = ParlorServerBuilder::new()
///     .bind("0.0.0.0:8080")
///     .room_config(RoomConfig::default())
///     .build(StaticToken::new(token))
///     .await?;
/// server.run().await
/// ```
pub struct ParlorServerBuilder {
    bind_addr: String,
    room_config: RoomConfig,
}

impl ParlorServerBuilder {
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            room_config: RoomConfig::default(),
        }
    }

    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    pub fn room_config(mut self, config: RoomConfig) -> Self {
        self.room_config = config;
        self
    }

    /// Binds the gateway. Game starts do not assign roles.
    pub async fn build<A: Authenticator>(
        self,
        auth: A,
    ) -> Result<ParlorServer<A, DeferredRoles>, ParlorError> {
        self.build_with_roles(auth, DeferredRoles).await
    }

    /// Binds the gateway with a custom [`RoleAssigner`].
    pub async fn build_with_roles<A: Authenticator, R: RoleAssigner>(
        self,
        auth: A,
        roles: R,
    ) -> Result<ParlorServer<A, R>, ParlorError> {
        let gateway = WebSocketGateway::bind(&self.bind_addr).await?;

        let state = Arc::new(ServerState {
            lobby: Arc::new(Lobby::with_roles(self.room_config, roles)),
            auth,
            codec: JsonCodec,
        });

        Ok(ParlorServer { gateway, state })
    }
}

impl Default for ParlorServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound gateway. Call [`run()`](Self::run) to start accepting bridges.
pub struct ParlorServer<A: Authenticator, R: RoleAssigner> {
    gateway: WebSocketGateway,
    state: Arc<ServerState<A, R>>,
}

impl<A: Authenticator, R: RoleAssigner> ParlorServer<A, R> {
    pub fn builder() -> ParlorServerBuilder {
        ParlorServerBuilder::new()
    }

    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.gateway.local_addr()
    }

    /// The engine behind this server, for inspection or embedding.
    pub fn lobby(&self) -> Arc<Lobby<R>> {
        Arc::clone(&self.state.lobby)
    }

    /// Accepts bridges forever, one task per link.
    pub async fn run(mut self) -> Result<(), ParlorError> {
        tracing::info!("parlor gateway running");

        loop {
            match self.gateway.accept().await {
                Ok(link) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) = handle_link(link, state).await {
                            tracing::debug!(error = %e, "link ended with error");
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
