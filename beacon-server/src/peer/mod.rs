mod peer;
mod registry;

pub use peer::{PLACEHOLDER_NAME, Peer};
pub use registry::PeerRegistry;
