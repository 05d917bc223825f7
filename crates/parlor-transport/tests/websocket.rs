//! Integration tests for the WebSocket gateway.
//!
//! These spin up a real listener on an OS-assigned port and drive it
//! with a `tokio-tungstenite` client.

#[cfg(feature = "websocket")]
mod websocket {
    use futures_util::{SinkExt, StreamExt};
    use parlor_transport::{Gateway, Link, WebSocketGateway};
    use tokio_tungstenite::tungstenite::Message;

    type ClientWs = tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    >;

    async fn connect_client(addr: &str) -> ClientWs {
        let (ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}"))
            .await
            .expect("client should connect");
        ws
    }

    /// Binds on port 0, connects one client, returns both ends.
    async fn linked_pair() -> (parlor_transport::WebSocketLink, ClientWs) {
        let mut gateway = WebSocketGateway::bind("127.0.0.1:0")
            .await
            .expect("should bind");
        let addr = gateway.local_addr().unwrap().to_string();

        let server = tokio::spawn(async move {
            gateway.accept().await.expect("should accept")
        });
        let client = connect_client(&addr).await;
        let link = server.await.expect("accept task should finish");
        (link, client)
    }

    #[tokio::test]
    async fn test_text_frames_flow_both_ways() {
        let (link, mut client) = linked_pair().await;
        assert!(link.id().into_inner() > 0);

        link.send_text("{\"type\":\"Welcome\",\"version\":1}")
            .await
            .expect("send should succeed");
        let msg = client.next().await.unwrap().unwrap();
        assert_eq!(
            msg.into_text().unwrap().as_str(),
            "{\"type\":\"Welcome\",\"version\":1}"
        );

        client
            .send(Message::Text("hello gateway".into()))
            .await
            .unwrap();
        let received = link.recv_text().await.unwrap();
        assert_eq!(received.as_deref(), Some("hello gateway"));

        link.close().await.expect("close should succeed");
    }

    #[tokio::test]
    async fn test_binary_utf8_frame_is_read_as_text() {
        let (link, mut client) = linked_pair().await;

        client
            .send(Message::Binary(b"{\"type\":\"Hello\"}".to_vec().into()))
            .await
            .unwrap();

        let received = link.recv_text().await.unwrap();
        assert_eq!(received.as_deref(), Some("{\"type\":\"Hello\"}"));
    }

    #[tokio::test]
    async fn test_binary_non_utf8_frame_is_rejected() {
        let (link, mut client) = linked_pair().await;

        client
            .send(Message::Binary(vec![0xff, 0xfe, 0x00].into()))
            .await
            .unwrap();

        assert!(matches!(
            link.recv_text().await,
            Err(parlor_transport::TransportError::NotText)
        ));
    }

    #[tokio::test]
    async fn test_recv_returns_none_on_client_close() {
        let (link, mut client) = linked_pair().await;

        client.send(Message::Close(None)).await.unwrap();

        let result = link.recv_text().await.expect("recv should not error");
        assert!(result.is_none(), "should return None on client close");
    }
}
