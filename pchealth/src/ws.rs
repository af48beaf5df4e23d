//! WebSocket push channel: Socket.IO handshake, keepalive and snapshot extraction.

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

use crate::types::Snapshot;
use crate::wire::{self, Frame};

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

// Connect to the server's socket endpoint and return the WS stream
pub async fn connect(url: &str) -> anyhow::Result<WsStream> {
    let (ws, _) = connect_async(url).await?;
    info!("connected to {url}");
    Ok(ws)
}

/// Waits for the next `system_metrics` event, answering handshakes and pings on the way.
/// `Ok(None)` means the server closed the channel. Payloads that fail to parse are logged
/// and skipped.
pub async fn next_snapshot(ws: &mut WsStream) -> anyhow::Result<Option<Snapshot>> {
    while let Some(msg) = ws.next().await {
        let text = match msg? {
            Message::Text(t) => t,
            Message::Close(_) => return Ok(None),
            _ => continue,
        };
        let frame = match wire::decode(&text) {
            Ok(f) => f,
            Err(e) => {
                warn!("ignoring undecodable frame: {e}");
                continue;
            }
        };
        match frame {
            Frame::Open(hs) => {
                debug!(
                    "engine.io open sid={} ping={}ms timeout={}ms",
                    hs.sid, hs.ping_interval, hs.ping_timeout
                );
                ws.send(Message::Text(wire::CONNECT.into())).await?;
            }
            Frame::Ping => ws.send(Message::Text(wire::PONG.into())).await?,
            Frame::Connect => debug!("socket.io namespace connected"),
            Frame::Close | Frame::Disconnect => return Ok(None),
            Frame::ConnectError(msg) => anyhow::bail!("server refused connection: {msg}"),
            Frame::Event { name, payload } if name == wire::METRICS_EVENT => {
                match serde_json::from_value::<Snapshot>(payload) {
                    Ok(s) => return Ok(Some(s)),
                    Err(e) => warn!("skipping malformed snapshot: {e}"),
                }
            }
            Frame::Event { name, .. } => debug!("ignoring event {name}"),
            Frame::Pong | Frame::Noop => {}
        }
    }
    Ok(None)
}
