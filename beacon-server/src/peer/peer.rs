use std::sync::Arc;

use beacon_core::{LobbyCode, PeerId};

use crate::transport::PeerHandle;

/// Display name a peer carries until it announces one.
pub const PLACEHOLDER_NAME: &str = "anonymous";

/// One connected participant. Owned by [`crate::peer::PeerRegistry`]; the
/// lobby it joins holds only the id.
pub struct Peer {
    pub id: PeerId,
    pub name: String,
    pub is_host: bool,
    pub lobby: Option<LobbyCode>,
    pub handle: Arc<dyn PeerHandle>,
}

impl Peer {
    pub(crate) fn new(id: PeerId, handle: Arc<dyn PeerHandle>) -> Self {
        Self {
            id,
            name: PLACEHOLDER_NAME.to_owned(),
            is_host: false,
            lobby: None,
            handle,
        }
    }
}
