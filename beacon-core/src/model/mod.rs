mod close;
mod lobby;
mod message;
mod peer;

pub use close::CloseStatus;
pub use lobby::{CODE_ALPHABET, CODE_LENGTH, InvalidCode, LobbyCode};
pub use message::{MessageKind, WireMessage};
pub use peer::PeerId;
