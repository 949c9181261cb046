use std::collections::HashMap;
use std::sync::Arc;

use beacon_core::PeerId;

use crate::peer::Peer;
use crate::transport::PeerHandle;

/// Keyed store of connected peers. No validation logic lives here; the
/// relay enforces ceilings before registering.
#[derive(Default)]
pub struct PeerRegistry {
    peers: HashMap<PeerId, Peer>,
}

impl PeerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh identifier and insert default peer state for
    /// `handle`.
    pub fn register(&mut self, handle: Arc<dyn PeerHandle>) -> PeerId {
        let id = PeerId::new();
        self.peers.insert(id, Peer::new(id, handle));
        id
    }

    pub fn get(&self, id: &PeerId) -> Option<&Peer> {
        self.peers.get(id)
    }

    pub fn get_mut(&mut self, id: &PeerId) -> Option<&mut Peer> {
        self.peers.get_mut(id)
    }

    /// Remove a peer. Idempotent: an unknown id is a no-op.
    pub fn remove(&mut self, id: &PeerId) -> Option<Peer> {
        self.peers.remove(id)
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Peer> {
        self.peers.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = PeerId> + '_ {
        self.peers.keys().copied()
    }
}
