use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wire-level message kinds. The numeric values are the protocol contract
/// shared with clients and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MessageKind {
    SetId = 0,
    PeerConnect = 1,
    PeerDisconnect = 2,
    Offer = 3,
    Answer = 4,
    Candidate = 5,
}

impl MessageKind {
    /// True for the negotiation payloads the server relays opaquely.
    pub fn is_relay(self) -> bool {
        matches!(self, Self::Offer | Self::Answer | Self::Candidate)
    }
}

impl TryFrom<u8> for MessageKind {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::SetId),
            1 => Ok(Self::PeerConnect),
            2 => Ok(Self::PeerDisconnect),
            3 => Ok(Self::Offer),
            4 => Ok(Self::Answer),
            5 => Ok(Self::Candidate),
            other => Err(format!("unknown message type {other}")),
        }
    }
}

impl From<MessageKind> for u8 {
    fn from(kind: MessageKind) -> u8 {
        kind as u8
    }
}

/// The envelope every message travels in, both directions.
///
/// `peer_index` is the destination on client→server relay requests and the
/// source on server→client delivery; the server overwrites it with the
/// sender's identifier before relaying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireMessage {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub peer_index: String,
    pub data: Value,
}

impl WireMessage {
    pub fn new(kind: MessageKind, peer_index: impl Into<String>, data: Value) -> Self {
        Self {
            kind,
            peer_index: peer_index.into(),
            data,
        }
    }
}
