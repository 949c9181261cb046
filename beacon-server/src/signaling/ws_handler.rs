use std::sync::Arc;
use std::time::Instant;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};

use beacon_core::CloseStatus;

use crate::relay::RelayCommand;
use crate::signaling::SignalingService;
use crate::transport::{PeerHandle, RateLimiter, SlidingWindow, WsPeerHandle};

/// WebSocket entry point. The lobby code, when present, is the first path
/// segment; connecting to `/` creates a fresh lobby.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    code: Option<Path<String>>,
    State(service): State<SignalingService>,
) -> impl IntoResponse {
    let requested_code = code.map(|Path(c)| c).filter(|c| !c.is_empty());
    ws.on_upgrade(move |socket| handle_socket(socket, requested_code, service))
}

async fn handle_socket(
    socket: WebSocket,
    requested_code: Option<String>,
    service: SignalingService,
) {
    let (mut sender, mut receiver) = socket.split();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<Message>();

    // Outbound pump; a close frame is the last thing a connection sends.
    let send_task = tokio::spawn(async move {
        while let Some(msg) = outbound_rx.recv().await {
            let closing = matches!(msg, Message::Close(_));
            if sender.send(msg).await.is_err() || closing {
                break;
            }
        }
    });

    let handle = Arc::new(WsPeerHandle::new(outbound_tx));
    let (reply_tx, reply_rx) = oneshot::channel();
    let connect = RelayCommand::Connect {
        requested_code,
        handle: Arc::clone(&handle) as Arc<dyn PeerHandle>,
        reply: reply_tx,
    };

    if service.relay_tx().send(connect).await.is_err() {
        warn!("relay is gone, refusing connection");
        return;
    }

    let peer_id = match reply_rx.await {
        Ok(Ok((peer_id, _lobby))) => peer_id,
        // rejected: the relay already pushed the close frame
        _ => {
            drop(handle);
            let _ = send_task.await;
            return;
        }
    };

    let config = service.config();
    let mut limiter = SlidingWindow::new(config.rate_window(), config.rate_max_messages);

    while let Some(Ok(msg)) = receiver.next().await {
        match msg {
            Message::Text(text) => {
                if !limiter.observe(Instant::now()) {
                    warn!(%peer_id, "rate limit exceeded, closing connection");
                    handle.close(CloseStatus::RateLimited).await;
                    break;
                }
                let inbound = RelayCommand::Inbound {
                    peer_id,
                    text: text.to_string(),
                };
                if service.relay_tx().send(inbound).await.is_err() {
                    break;
                }
            }
            Message::Close(_) => break,
            // binary frames are not part of the protocol; ping/pong
            // bookkeeping stays inside the websocket layer
            _ => {}
        }
    }

    let _ = service
        .relay_tx()
        .send(RelayCommand::Disconnect { peer_id })
        .await;

    // once the relay drops its handle the pump drains and exits
    drop(handle);
    let _ = send_task.await;
    info!(%peer_id, "socket closed");
}
