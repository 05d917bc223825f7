//! WebSocket gateway built on `tokio-tungstenite`.
//!
//! The socket is split into a sink and a stream, each behind its own
//! lock, so a task waiting in `recv_text` never blocks a `send_text`.

use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::Message;

use crate::{Gateway, Link, LinkId, TransportError};

static NEXT_LINK_ID: AtomicU64 = AtomicU64::new(1);

type WsStream = WebSocketStream<TcpStream>;

fn io_error(
    kind: std::io::ErrorKind,
    e: tokio_tungstenite::tungstenite::Error,
) -> std::io::Error {
    std::io::Error::new(kind, e)
}

/// Listens for bridges on a TCP port and upgrades them to WebSocket.
pub struct WebSocketGateway {
    listener: TcpListener,
}

impl WebSocketGateway {
    /// Binds to `addr`. Use port 0 to let the OS pick one, then read it
    /// back with [`Gateway::local_addr`].
    pub async fn bind(addr: &str) -> Result<Self, TransportError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(TransportError::BindFailed)?;
        tracing::info!(addr, "bridge gateway listening");
        Ok(Self { listener })
    }
}

impl Gateway for WebSocketGateway {
    type Link = WebSocketLink;

    async fn accept(&mut self) -> Result<Self::Link, TransportError> {
        let (stream, peer) = self
            .listener
            .accept()
            .await
            .map_err(TransportError::AcceptFailed)?;

        let ws = tokio_tungstenite::accept_async(stream).await.map_err(|e| {
            TransportError::AcceptFailed(io_error(
                std::io::ErrorKind::ConnectionRefused,
                e,
            ))
        })?;

        let id = LinkId::new(NEXT_LINK_ID.fetch_add(1, Ordering::Relaxed));
        tracing::debug!(%id, %peer, "bridge link accepted");

        let (sink, stream) = ws.split();
        Ok(WebSocketLink {
            id,
            sink: Mutex::new(sink),
            stream: Mutex::new(stream),
        })
    }

    fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }
}

/// A bridge connected over WebSocket.
pub struct WebSocketLink {
    id: LinkId,
    sink: Mutex<SplitSink<WsStream, Message>>,
    stream: Mutex<SplitStream<WsStream>>,
}

impl Link for WebSocketLink {
    async fn send_text(&self, frame: &str) -> Result<(), TransportError> {
        self.sink
            .lock()
            .await
            .send(Message::Text(frame.into()))
            .await
            .map_err(|e| {
                TransportError::SendFailed(io_error(
                    std::io::ErrorKind::BrokenPipe,
                    e,
                ))
            })
    }

    async fn recv_text(&self) -> Result<Option<String>, TransportError> {
        let mut stream = self.stream.lock().await;
        loop {
            match stream.next().await {
                Some(Ok(Message::Text(text))) => {
                    return Ok(Some(text.as_str().to_string()));
                }
                // Some bridges send JSON as binary frames.
                Some(Ok(Message::Binary(data))) => {
                    return String::from_utf8(data.to_vec())
                        .map(Some)
                        .map_err(|_| TransportError::NotText);
                }
                Some(Ok(Message::Close(_))) | None => return Ok(None),
                Some(Ok(_)) => continue, // ping/pong/raw frame
                Some(Err(e)) => {
                    return Err(TransportError::ReceiveFailed(io_error(
                        std::io::ErrorKind::ConnectionReset,
                        e,
                    )));
                }
            }
        }
    }

    async fn close(&self) -> Result<(), TransportError> {
        self.sink.lock().await.close().await.map_err(|e| {
            TransportError::SendFailed(io_error(
                std::io::ErrorKind::BrokenPipe,
                e,
            ))
        })
    }

    fn id(&self) -> LinkId {
        self.id
    }
}
