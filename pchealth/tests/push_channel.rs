//! Socket.IO push channel against a scripted local server.
use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    response::IntoResponse,
    routing::get,
    Router,
};
use pchealth::config::{Endpoints, SOCKET_PATH};
use pchealth::ws::{connect, next_snapshot};
use serde_json::json;
use tokio::sync::mpsc;

const OPEN: &str = r#"0{"sid":"t1","upgrades":[],"pingInterval":25000,"pingTimeout":20000}"#;

/// Plays `frames` to every connection and reports what the client sent back.
async fn serve(frames: Vec<String>) -> (Endpoints, mpsc::UnboundedReceiver<String>) {
    let (seen_tx, seen_rx) = mpsc::unbounded_channel();
    let app = Router::new().route(
        SOCKET_PATH,
        get(move |ws: WebSocketUpgrade| {
            let frames = frames.clone();
            let seen = seen_tx.clone();
            async move {
                ws.on_upgrade(move |socket| session(socket, frames, seen))
                    .into_response()
            }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    let endpoints = Endpoints::from_base(&format!("http://{addr}")).unwrap();
    (endpoints, seen_rx)
}

// Handshake first, then each frame once the client has answered the previous one.
async fn session(mut socket: WebSocket, frames: Vec<String>, seen: mpsc::UnboundedSender<String>) {
    if socket.send(Message::Text(OPEN.into())).await.is_err() {
        return;
    }
    if let Some(Ok(Message::Text(t))) = socket.recv().await {
        let _ = seen.send(t);
    }
    for f in frames {
        let expects_reply = f == "2";
        if socket.send(Message::Text(f)).await.is_err() {
            return;
        }
        if expects_reply {
            if let Some(Ok(Message::Text(t))) = socket.recv().await {
                let _ = seen.send(t);
            }
        }
    }
    // hold the socket until the client goes away
    while let Some(Ok(_)) = socket.recv().await {}
}

fn metrics_frame(cpu: f64) -> String {
    let payload = json!({
        "cpu": {"percent": cpu, "cores": {"count": 8, "frequency": "3200", "per_core": []}},
        "memory": {"percent": 10.0, "used": 1.0, "free": 9.0, "total": 10.0},
        "disk": {"percent": 20.0, "used": 2.0, "free": 8.0, "total": 10.0},
        "network": {"bytes_sent": 1, "bytes_recv": 2},
        "uptime": {"days": 0, "hours": 1, "minutes": 2, "seconds": 3}
    });
    format!("42{}", json!(["system_metrics", payload]))
}

#[tokio::test]
async fn handshake_ping_and_snapshot() {
    let frames = vec![
        r#"40{"sid":"ns1"}"#.to_string(),
        "2".to_string(),
        r#"42["log_line","ignored"]"#.to_string(),
        metrics_frame(12.5),
        "41".to_string(),
    ];
    let (endpoints, mut seen) = serve(frames).await;
    let mut ws = connect(endpoints.socket.as_str()).await.unwrap();

    let snap = next_snapshot(&mut ws).await.unwrap().expect("snapshot");
    assert_eq!(snap.cpu.percent, 12.5);
    assert_eq!(snap.cpu.cores.count, 8);
    assert_eq!(snap.cpu.cores.frequency, "3200");

    assert!(next_snapshot(&mut ws).await.unwrap().is_none(), "41 ends the channel");
    assert_eq!(seen.recv().await.as_deref(), Some("40"));
    assert_eq!(seen.recv().await.as_deref(), Some("3"));
}

#[tokio::test]
async fn malformed_snapshot_is_skipped() {
    let frames = vec![
        r#"40{"sid":"ns1"}"#.to_string(),
        r#"42["system_metrics",{"cpu":"nope"}]"#.to_string(),
        metrics_frame(55.0),
    ];
    let (endpoints, _seen) = serve(frames).await;
    let mut ws = connect(endpoints.socket.as_str()).await.unwrap();
    let snap = next_snapshot(&mut ws).await.unwrap().expect("snapshot");
    assert_eq!(snap.cpu.percent, 55.0);
}

#[tokio::test]
async fn connect_error_is_reported() {
    let frames = vec![r#"44{"message":"Not authorized"}"#.to_string()];
    let (endpoints, _seen) = serve(frames).await;
    let mut ws = connect(endpoints.socket.as_str()).await.unwrap();
    let err = next_snapshot(&mut ws).await.unwrap_err();
    assert!(err.to_string().contains("Not authorized"), "{err}");
}
