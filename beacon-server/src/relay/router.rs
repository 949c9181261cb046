use std::str::FromStr;

use beacon_core::{MessageKind, PeerId, WireMessage};
use serde_json::Value;

use crate::peer::PeerRegistry;
use crate::protocol::RelayError;

/// Relay one validated OFFER/ANSWER/CANDIDATE from `from` to the peer
/// named by `to`.
///
/// The destination must exist and share the sender's lobby; cross-lobby
/// relay is never permitted. On success the payload is delivered
/// untouched, with `peer_index` overwritten by the sender's identifier.
pub async fn route(
    peers: &PeerRegistry,
    from: PeerId,
    to: &str,
    kind: MessageKind,
    data: Value,
) -> Result<(), RelayError> {
    let dest_id = PeerId::from_str(to).map_err(|_| RelayError::UnauthorizedRouting)?;
    let sender = peers.get(&from).ok_or(RelayError::UnauthorizedRouting)?;
    let dest = peers.get(&dest_id).ok_or(RelayError::UnauthorizedRouting)?;

    if sender.lobby.is_none() || sender.lobby != dest.lobby {
        return Err(RelayError::UnauthorizedRouting);
    }

    dest.handle
        .send(&WireMessage::new(kind, from.to_string(), data))
        .await;
    Ok(())
}
