use async_trait::async_trait;
use axum::extract::ws::{CloseFrame, Message, Utf8Bytes};
use bytes::Bytes;
use tokio::sync::mpsc;
use tracing::{error, warn};

use beacon_core::{CloseStatus, WireMessage};

/// Narrow seam between the relay core and one peer's transport connection.
///
/// Delivery is best-effort, at-most-once: a handle whose socket is gone
/// drops the message.
#[async_trait]
pub trait PeerHandle: Send + Sync {
    /// Deliver one wire message.
    async fn send(&self, message: &WireMessage);

    /// Issue a keepalive probe.
    async fn ping(&self);

    /// Close the connection with `status`.
    async fn close(&self, status: CloseStatus);
}

/// Production handle: feeds the WebSocket write half through an unbounded
/// channel.
pub struct WsPeerHandle {
    outbound: mpsc::UnboundedSender<Message>,
}

impl WsPeerHandle {
    pub fn new(outbound: mpsc::UnboundedSender<Message>) -> Self {
        Self { outbound }
    }
}

#[async_trait]
impl PeerHandle for WsPeerHandle {
    async fn send(&self, message: &WireMessage) {
        match serde_json::to_string(message) {
            Ok(json) => {
                if self.outbound.send(Message::Text(json.into())).is_err() {
                    warn!("dropping message for a closed connection");
                }
            }
            Err(e) => error!("failed to serialize outbound message: {e}"),
        }
    }

    async fn ping(&self) {
        let _ = self.outbound.send(Message::Ping(Bytes::new()));
    }

    async fn close(&self, status: CloseStatus) {
        let frame = CloseFrame {
            code: status.code(),
            reason: Utf8Bytes::from_static(status.reason()),
        };
        if self.outbound.send(Message::Close(Some(frame))).is_err() {
            warn!("connection already gone before close ({status:?})");
        }
    }
}
