//! Integration tests for the bridge gateway: handshake, auth, and the
//! update → reply round trip over a real WebSocket.

use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use parlor::prelude::*;
use tokio_tungstenite::tungstenite::Message;

const TOKEN: &str = "bridge-secret";

// =========================================================================
// Helpers
// =========================================================================

type BridgeWs = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

/// Starts a gateway on a random port. Returns its address and engine.
async fn start_server() -> (String, Arc<Lobby>) {
    let server = ParlorServerBuilder::new()
        .bind("127.0.0.1:0")
        .build(StaticToken::new(TOKEN))
        .await
        .expect("server should build");

    let addr = server
        .local_addr()
        .expect("should have local addr")
        .to_string();
    let lobby = server.lobby();

    tokio::spawn(async move {
        let _ = server.run().await;
    });

    tokio::time::sleep(Duration::from_millis(10)).await;
    (addr, lobby)
}

async fn connect(addr: &str) -> BridgeWs {
    let (ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}"))
        .await
        .expect("should connect");
    ws
}

async fn send_frame(ws: &mut BridgeWs, frame: &Frame) {
    let text = serde_json::to_string(frame).expect("encode");
    ws.send(Message::text(text)).await.expect("send");
}

async fn recv_frame(ws: &mut BridgeWs) -> Frame {
    let msg = tokio::time::timeout(Duration::from_secs(2), ws.next())
        .await
        .expect("frame within timeout")
        .expect("stream open")
        .expect("recv");
    serde_json::from_str(msg.to_text().expect("text frame")).expect("decode")
}

async fn hello(ws: &mut BridgeWs, token: &str) -> Frame {
    send_frame(
        ws,
        &Frame::Hello {
            version: PROTOCOL_VERSION,
            token: token.into(),
        },
    )
    .await;
    recv_frame(ws).await
}

async fn update(ws: &mut BridgeWs, id: u64, from: Caller, kind: UpdateKind) -> Frame {
    send_frame(
        ws,
        &Frame::Update {
            update: Update { id, from, kind },
        },
    )
    .await;
    recv_frame(ws).await
}

fn expect_reply(frame: Frame, expected_id: u64) -> Option<Reply> {
    match frame {
        Frame::Reply { update_id, reply } => {
            assert_eq!(update_id, expected_id);
            reply
        }
        other => panic!("expected Reply, got {other:?}"),
    }
}

// =========================================================================
// Handshake
// =========================================================================

#[tokio::test]
async fn test_handshake_success() {
    let (addr, _) = start_server().await;
    let mut ws = connect(&addr).await;

    match hello(&mut ws, TOKEN).await {
        Frame::Welcome { version } => assert_eq!(version, PROTOCOL_VERSION),
        other => panic!("expected Welcome, got {other:?}"),
    }
}

#[tokio::test]
async fn test_handshake_bad_token_is_401() {
    let (addr, _) = start_server().await;
    let mut ws = connect(&addr).await;

    match hello(&mut ws, "wrong").await {
        Frame::Error { code, .. } => assert_eq!(code, 401),
        other => panic!("expected Error 401, got {other:?}"),
    }
}

#[tokio::test]
async fn test_handshake_version_mismatch_is_400() {
    let (addr, _) = start_server().await;
    let mut ws = connect(&addr).await;

    send_frame(
        &mut ws,
        &Frame::Hello {
            version: 999,
            token: TOKEN.into(),
        },
    )
    .await;

    match recv_frame(&mut ws).await {
        Frame::Error { code, message } => {
            assert_eq!(code, 400);
            assert!(message.contains("version mismatch"));
        }
        other => panic!("expected Error 400, got {other:?}"),
    }
}

#[tokio::test]
async fn test_handshake_update_before_hello_is_400() {
    let (addr, _) = start_server().await;
    let mut ws = connect(&addr).await;

    send_frame(
        &mut ws,
        &Frame::Update {
            update: Update {
                id: 1,
                from: Caller::new(1),
                kind: UpdateKind::Command("start".into()),
            },
        },
    )
    .await;

    match recv_frame(&mut ws).await {
        Frame::Error { code, .. } => assert_eq!(code, 400),
        other => panic!("expected Error 400, got {other:?}"),
    }
}

// =========================================================================
// Update routing
// =========================================================================

#[tokio::test]
async fn test_start_command_gets_welcome_reply() {
    let (addr, _) = start_server().await;
    let mut ws = connect(&addr).await;
    hello(&mut ws, TOKEN).await;

    let frame = update(&mut ws, 7, Caller::new(1), UpdateKind::Command("start".into())).await;
    let reply = expect_reply(frame, 7).expect("welcome reply");

    assert_eq!(reply.delivery, Delivery::Send);
    let payloads: Vec<&str> = reply.buttons().map(|b| b.payload.as_str()).collect();
    assert_eq!(payloads, ["lang_en", "lang_es"]);
}

#[tokio::test]
async fn test_create_over_gateway_registers_room() {
    let (addr, lobby) = start_server().await;
    let mut ws = connect(&addr).await;
    hello(&mut ws, TOKEN).await;

    let alice = Caller::new(1).with_username("alice");
    let frame = update(&mut ws, 1, alice, UpdateKind::Callback("menu_create".into())).await;
    let reply = expect_reply(frame, 1).expect("created reply");

    assert!(reply.text.contains("`1000`"));
    let room = lobby.room(RoomId(1000)).await.expect("room exists");
    assert_eq!(room.owner(), UserId(1));
    assert!(room.members().is_empty());
}

#[tokio::test]
async fn test_idle_text_gets_empty_reply() {
    let (addr, _) = start_server().await;
    let mut ws = connect(&addr).await;
    hello(&mut ws, TOKEN).await;

    let frame = update(&mut ws, 3, Caller::new(1), UpdateKind::Text("hello".into())).await;
    assert_eq!(expect_reply(frame, 3), None);
}

#[tokio::test]
async fn test_garbage_frame_is_400_and_link_survives() {
    let (addr, _) = start_server().await;
    let mut ws = connect(&addr).await;
    hello(&mut ws, TOKEN).await;

    ws.send(Message::text("not json")).await.expect("send");
    match recv_frame(&mut ws).await {
        Frame::Error { code, .. } => assert_eq!(code, 400),
        other => panic!("expected Error 400, got {other:?}"),
    }

    let frame = update(&mut ws, 2, Caller::new(1), UpdateKind::Command("help".into())).await;
    assert!(expect_reply(frame, 2).is_some());
}

#[tokio::test]
async fn test_two_bridges_share_one_lobby() {
    let (addr, lobby) = start_server().await;

    let mut first = connect(&addr).await;
    let mut second = connect(&addr).await;
    hello(&mut first, TOKEN).await;
    hello(&mut second, TOKEN).await;

    let alice = Caller::new(1).with_username("alice");
    let bob = Caller::new(2).with_username("bob");

    update(&mut first, 1, alice, UpdateKind::Command("create".into())).await;
    update(&mut second, 2, bob.clone(), UpdateKind::Command("join".into())).await;
    let frame = update(&mut second, 3, bob, UpdateKind::Text("1000".into())).await;

    let reply = expect_reply(frame, 3).expect("join reply");
    assert!(reply.text.contains("@bob"));
    let room = lobby.room(RoomId(1000)).await.expect("room exists");
    assert_eq!(room.members(), [Handle::from("@bob")]);
}
