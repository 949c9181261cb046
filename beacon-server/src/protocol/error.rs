use beacon_core::CloseStatus;
use thiserror::Error;

/// Peer-local failure taxonomy. Every case is fail-fast: the offending
/// connection closes with the mapped status, nothing is retried, and no
/// other peer or lobby is touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RelayError {
    #[error("malformed message: {0}")]
    Malformed(&'static str),

    #[error("invalid lobby reference")]
    InvalidLobbyReference,

    #[error("lobby is at capacity")]
    LobbyFull,

    #[error("global peer ceiling reached")]
    CapacityExceeded,

    #[error("relay destination missing or outside the sender's lobby")]
    UnauthorizedRouting,
}

impl RelayError {
    /// Close status the offending connection is terminated with.
    pub fn close_status(&self) -> CloseStatus {
        match self {
            Self::Malformed(_) | Self::InvalidLobbyReference => CloseStatus::InvalidPayload,
            Self::LobbyFull => CloseStatus::Forbidden,
            Self::CapacityExceeded => CloseStatus::TryAgainLater,
            Self::UnauthorizedRouting => CloseStatus::Unauthorized,
        }
    }
}
