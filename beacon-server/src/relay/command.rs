use std::sync::Arc;

use beacon_core::{CloseStatus, LobbyCode, PeerId};
use tokio::sync::oneshot;

use crate::transport::PeerHandle;

/// Events feeding the relay's single serializing loop. One command is
/// processed to completion before the next is taken, so registry
/// mutations for different events never interleave.
pub enum RelayCommand {
    /// A freshly accepted connection asking to join `requested_code`, or
    /// to create a lobby when no code was supplied. On rejection the
    /// relay closes the handle itself; the reply tells the transport task
    /// its assigned identity.
    Connect {
        requested_code: Option<String>,
        handle: Arc<dyn PeerHandle>,
        reply: oneshot::Sender<Result<(PeerId, LobbyCode), CloseStatus>>,
    },

    /// A raw text frame from a connected peer.
    Inbound { peer_id: PeerId, text: String },

    /// The peer's socket ended. Idempotent.
    Disconnect { peer_id: PeerId },

    /// Close every connection and stop the loop.
    Shutdown,
}
