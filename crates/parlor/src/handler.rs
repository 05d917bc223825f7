//! Per-link handler: handshake, auth, and update routing.
//!
//! Each accepted bridge gets its own Tokio task running this handler.
//! The flow is:
//!   1. Receive Hello → validate version
//!   2. Authenticate the bot token
//!   3. Send Welcome → bridge is connected
//!   4. Loop: receive Update frames → run the lobby → send Reply frames

use std::sync::Arc;
use std::time::Duration;

use parlor_protocol::{Codec, Frame, JsonCodec, PROTOCOL_VERSION, ProtocolError};
use parlor_session::Authenticator;
use parlor_transport::{Link, WebSocketLink};

use crate::ParlorError;
use crate::roles::RoleAssigner;
use crate::server::ServerState;

const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);

/// Handles a single bridge link from accept to close.
pub(crate) async fn handle_link<A, R>(
    link: WebSocketLink,
    state: Arc<ServerState<A, R>>,
) -> Result<(), ParlorError>
where
    A: Authenticator,
    R: RoleAssigner,
{
    let link_id = link.id();
    tracing::debug!(%link_id, "handling new bridge link");

    // --- Step 1: Handshake ---
    perform_handshake(&link, &state).await?;
    tracing::info!(%link_id, "bridge authenticated");

    // --- Step 2: Update loop ---
    loop {
        let data = match link.recv_text().await {
            Ok(Some(data)) => data,
            Ok(None) => {
                tracing::info!(%link_id, "bridge closed link");
                break;
            }
            Err(e) => {
                tracing::debug!(%link_id, error = %e, "recv error");
                break;
            }
        };

        let update = match state.codec.decode::<Frame>(&data) {
            Ok(Frame::Update { update }) => update,
            Ok(_) => {
                send_error(&link, &state.codec, 400, "expected Update").await?;
                continue;
            }
            Err(e) => {
                tracing::debug!(%link_id, error = %e, "failed to decode frame");
                send_error(&link, &state.codec, 400, &format!("invalid frame: {e}"))
                    .await?;
                continue;
            }
        };

        let update_id = update.id;
        let reply = state.lobby.handle(update).await;

        let frame = state.codec.encode(&Frame::Reply { update_id, reply })?;
        link.send_text(&frame).await?;
    }

    Ok(())
}

/// Receives Hello, checks the version and token, sends Welcome.
async fn perform_handshake<A, R>(
    link: &WebSocketLink,
    state: &ServerState<A, R>,
) -> Result<(), ParlorError>
where
    A: Authenticator,
    R: RoleAssigner,
{
    let data = match tokio::time::timeout(HANDSHAKE_TIMEOUT, link.recv_text()).await {
        Ok(Ok(Some(data))) => data,
        Ok(Ok(None)) => {
            return Err(invalid("link closed before handshake"));
        }
        Ok(Err(e)) => return Err(ParlorError::Transport(e)),
        Err(_) => return Err(invalid("handshake timed out")),
    };

    let (version, token) = match state.codec.decode::<Frame>(&data) {
        Ok(Frame::Hello { version, token }) => (version, token),
        Ok(_) => {
            send_error(link, &state.codec, 400, "expected Hello").await?;
            return Err(invalid("first frame must be Hello"));
        }
        Err(e) => {
            send_error(link, &state.codec, 400, "expected Hello").await?;
            return Err(ParlorError::Protocol(e));
        }
    };

    if version != PROTOCOL_VERSION {
        send_error(
            link,
            &state.codec,
            400,
            &format!("version mismatch: expected {PROTOCOL_VERSION}, got {version}"),
        )
        .await?;
        return Err(invalid("protocol version mismatch"));
    }

    if let Err(e) = state.auth.authenticate(&token).await {
        send_error(link, &state.codec, 401, "unauthorized").await?;
        return Err(ParlorError::Session(e));
    }

    let welcome = state.codec.encode(&Frame::Welcome {
        version: PROTOCOL_VERSION,
    })?;
    link.send_text(&welcome).await?;
    Ok(())
}

/// Sends a `Frame::Error` to the bridge.
async fn send_error(
    link: &WebSocketLink,
    codec: &JsonCodec,
    code: u16,
    message: &str,
) -> Result<(), ParlorError> {
    let frame = codec.encode(&Frame::Error {
        code,
        message: message.to_string(),
    })?;
    link.send_text(&frame).await?;
    Ok(())
}

fn invalid(reason: &str) -> ParlorError {
    ParlorError::Protocol(ProtocolError::InvalidMessage(reason.into()))
}
