use beacon_core::{MessageKind, WireMessage};
use serde_json::{Map, Value};

use crate::protocol::RelayError;

/// A fully validated inbound message, one case per client-legal kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientMessage {
    /// PEER_CONNECT: the peer announces its display name. `data` is the
    /// submitted object, kept whole so it can be forwarded to existing
    /// members after name resolution.
    Announce {
        name: String,
        data: Map<String, Value>,
    },

    /// OFFER / ANSWER / CANDIDATE addressed to `to`, relayed opaquely.
    Relay {
        kind: MessageKind,
        to: String,
        data: Value,
    },
}

/// Strict decode of a raw text payload.
///
/// Fails closed: any deviation from the schema is a single rejection the
/// caller must treat as fatal to the originating connection.
pub fn validate(raw: &str) -> Result<ClientMessage, RelayError> {
    let message: WireMessage =
        serde_json::from_str(raw).map_err(|_| RelayError::Malformed("undecodable payload"))?;

    match message.kind {
        MessageKind::PeerConnect => {
            let Value::Object(data) = message.data else {
                return Err(RelayError::Malformed("PEER_CONNECT data must be an object"));
            };
            let Some(Value::String(name)) = data.get("name") else {
                return Err(RelayError::Malformed(
                    "PEER_CONNECT data must carry a string name",
                ));
            };
            Ok(ClientMessage::Announce {
                name: name.clone(),
                data,
            })
        }
        kind if kind.is_relay() => Ok(ClientMessage::Relay {
            kind,
            to: message.peer_index,
            data: message.data,
        }),
        // SET_ID and PEER_DISCONNECT are minted by the server only.
        _ => Err(RelayError::Malformed("server-originated message type")),
    }
}
