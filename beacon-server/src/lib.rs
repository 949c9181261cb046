pub mod config;
pub mod lobby;
pub mod peer;
pub mod protocol;
pub mod relay;
pub mod signaling;
pub mod transport;

pub use config::ServerConfig;
pub use lobby::{Lobby, LobbyRegistry};
pub use peer::{PLACEHOLDER_NAME, Peer, PeerRegistry};
pub use protocol::{ClientMessage, RelayError, validate};
pub use relay::{Relay, RelayCommand};
pub use signaling::{SignalingService, ws_handler};
pub use transport::{PeerHandle, RateLimiter, SlidingWindow, WsPeerHandle};
