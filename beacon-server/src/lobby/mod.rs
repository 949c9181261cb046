mod lobby;
mod registry;

pub use lobby::Lobby;
pub use registry::LobbyRegistry;
