use std::sync::Arc;

use beacon_core::{CloseStatus, LobbyCode, MessageKind, PeerId, WireMessage};
use serde_json::{Map, Value, json};
use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::lobby::LobbyRegistry;
use crate::peer::PeerRegistry;
use crate::protocol::{ClientMessage, RelayError, validate};
use crate::relay::command::RelayCommand;
use crate::relay::router;
use crate::transport::PeerHandle;

/// The single serializing worker owning all peer and lobby state.
///
/// Every external event — accepted connection, inbound frame, socket
/// close, shutdown — arrives as one [`RelayCommand`] and is processed to
/// completion before the next is taken.
pub struct Relay {
    peers: PeerRegistry,
    lobbies: LobbyRegistry,
    command_rx: mpsc::Receiver<RelayCommand>,
    config: Arc<ServerConfig>,
}

impl Relay {
    pub fn new(config: Arc<ServerConfig>, command_rx: mpsc::Receiver<RelayCommand>) -> Self {
        Self {
            peers: PeerRegistry::new(),
            lobbies: LobbyRegistry::new(config.max_lobby_peers),
            command_rx,
            config,
        }
    }

    pub async fn run(mut self) {
        info!("relay event loop started");

        let mut keepalive = tokio::time::interval(self.config.keepalive_interval());
        keepalive.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(cmd) => {
                            if !self.handle_command(cmd).await {
                                break;
                            }
                        }
                        None => {
                            info!("command channel closed, relay stopping");
                            break;
                        }
                    }
                }

                _ = keepalive.tick() => self.send_keepalives().await,
            }
        }

        info!("relay event loop finished");
    }

    /// Returns false when the loop should stop.
    async fn handle_command(&mut self, cmd: RelayCommand) -> bool {
        match cmd {
            RelayCommand::Connect {
                requested_code,
                handle,
                reply,
            } => self.handle_connect(requested_code, handle, reply).await,
            RelayCommand::Inbound { peer_id, text } => self.handle_inbound(peer_id, &text).await,
            RelayCommand::Disconnect { peer_id } => self.drop_peer(&peer_id, None).await,
            RelayCommand::Shutdown => {
                self.shutdown().await;
                return false;
            }
        }
        true
    }

    async fn handle_connect(
        &mut self,
        requested_code: Option<String>,
        handle: Arc<dyn PeerHandle>,
        reply: oneshot::Sender<Result<(PeerId, LobbyCode), CloseStatus>>,
    ) {
        if self.peers.len() >= self.config.max_peers {
            warn!("peer ceiling reached, turning connection away");
            handle.close(CloseStatus::TryAgainLater).await;
            let _ = reply.send(Err(CloseStatus::TryAgainLater));
            return;
        }

        let peer_id = self.peers.register(handle);

        let code = match self.join_lobby(peer_id, requested_code.as_deref()) {
            Ok(code) => code,
            Err(e) => {
                let status = e.close_status();
                warn!(%peer_id, error = %e, "join rejected");
                if let Some(peer) = self.peers.remove(&peer_id) {
                    peer.handle.close(status).await;
                }
                let _ = reply.send(Err(status));
                return;
            }
        };

        info!(%peer_id, lobby = %code, "peer connected");

        if let Some(peer) = self.peers.get(&peer_id) {
            let set_id = WireMessage::new(
                MessageKind::SetId,
                peer_id.to_string(),
                json!({ "lobby_id": code.as_str() }),
            );
            peer.handle.send(&set_id).await;
        }

        let _ = reply.send(Ok((peer_id, code)));
    }

    /// Join per the requested code, or create a fresh lobby (and take the
    /// host flag) when none was supplied.
    fn join_lobby(
        &mut self,
        peer_id: PeerId,
        requested_code: Option<&str>,
    ) -> Result<LobbyCode, RelayError> {
        let (code, is_host) = match requested_code {
            None => (self.lobbies.create(), true),
            Some(raw) => {
                let code =
                    LobbyCode::parse(raw).map_err(|_| RelayError::InvalidLobbyReference)?;
                (code, false)
            }
        };

        self.lobbies.join(&code, peer_id)?;

        if let Some(peer) = self.peers.get_mut(&peer_id) {
            peer.lobby = Some(code.clone());
            peer.is_host = is_host;
        }
        Ok(code)
    }

    async fn handle_inbound(&mut self, peer_id: PeerId, text: &str) {
        // the frame may have raced a close that already removed the peer
        if self.peers.get(&peer_id).is_none() {
            return;
        }

        match validate(text) {
            Ok(ClientMessage::Announce { name, data }) => {
                self.handle_announce(peer_id, name, data).await;
            }
            Ok(ClientMessage::Relay { kind, to, data }) => {
                if let Err(e) = router::route(&self.peers, peer_id, &to, kind, data).await {
                    warn!(%peer_id, error = %e, "relay rejected");
                    self.drop_peer(&peer_id, Some(e.close_status())).await;
                }
            }
            Err(e) => {
                warn!(%peer_id, error = %e, "rejecting malformed message");
                self.drop_peer(&peer_id, Some(e.close_status())).await;
            }
        }
    }

    /// PEER_CONNECT: resolve the announced name against the lobby, then
    /// introduce the announcer and every existing member to each other.
    async fn handle_announce(
        &mut self,
        peer_id: PeerId,
        name: String,
        mut data: Map<String, Value>,
    ) {
        let Some(code) = self.peers.get(&peer_id).and_then(|p| p.lobby.clone()) else {
            return;
        };

        let others: Vec<PeerId> = self
            .lobbies
            .members(&code)
            .iter()
            .copied()
            .filter(|id| *id != peer_id)
            .collect();

        let resolved = self.resolve_name(&others, &name);
        let is_host = match self.peers.get_mut(&peer_id) {
            Some(peer) => {
                peer.name = resolved.clone();
                peer.is_host
            }
            None => return,
        };

        info!(%peer_id, name = %resolved, lobby = %code, "peer announced");

        data.insert("name".to_owned(), Value::String(resolved));
        data.insert("is_host".to_owned(), Value::Bool(is_host));
        data.insert("preexisting".to_owned(), Value::Bool(true));
        let announcement = WireMessage::new(
            MessageKind::PeerConnect,
            peer_id.to_string(),
            Value::Object(data),
        );

        for other_id in others {
            let (Some(announcer), Some(other)) =
                (self.peers.get(&peer_id), self.peers.get(&other_id))
            else {
                continue;
            };

            let introduction = WireMessage::new(
                MessageKind::PeerConnect,
                other_id.to_string(),
                json!({
                    "name": other.name,
                    "is_host": other.is_host,
                    "preexisting": true,
                }),
            );
            announcer.handle.send(&introduction).await;
            other.handle.send(&announcement).await;
        }
    }

    /// Append `" (n)"` from n=1 upward until the candidate collides with
    /// no other member's name.
    fn resolve_name(&self, others: &[PeerId], wanted: &str) -> String {
        let taken: Vec<&str> = others
            .iter()
            .filter_map(|id| self.peers.get(id))
            .map(|p| p.name.as_str())
            .collect();

        if !taken.contains(&wanted) {
            return wanted.to_owned();
        }
        let mut n = 1;
        loop {
            let candidate = format!("{wanted} ({n})");
            if !taken.iter().any(|t| *t == candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Remove a peer and run the departure sequence. Idempotent. A set
    /// `status` means the server is closing the connection itself.
    async fn drop_peer(&mut self, peer_id: &PeerId, status: Option<CloseStatus>) {
        let Some(peer) = self.peers.remove(peer_id) else {
            return;
        };

        if let Some(status) = status {
            peer.handle.close(status).await;
        }

        let Some(code) = peer.lobby else {
            return;
        };

        let emptied = self.lobbies.leave(&code, peer_id);
        info!(%peer_id, lobby = %code, emptied, "peer departed");
        if emptied {
            return;
        }

        let notice = WireMessage::new(
            MessageKind::PeerDisconnect,
            peer_id.to_string(),
            Value::Null,
        );
        for member in self.lobbies.members(&code) {
            if let Some(remaining) = self.peers.get(member) {
                remaining.handle.send(&notice).await;
            }
        }
    }

    /// Close every connection with GOING_AWAY and drop all state.
    async fn shutdown(&mut self) {
        info!(peers = self.peers.len(), "relay shutting down");
        let ids: Vec<PeerId> = self.peers.ids().collect();
        for id in ids {
            if let Some(peer) = self.peers.remove(&id) {
                peer.handle.close(CloseStatus::GoingAway).await;
            }
        }
    }

    async fn send_keepalives(&self) {
        for peer in self.peers.iter() {
            peer.handle.ping().await;
        }
    }
}
