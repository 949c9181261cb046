use clap::Parser;
use std::time::Duration;

/// Runtime configuration for the relay.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "beacon-server",
    about = "WebRTC signaling relay with code-addressed lobbies"
)]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(long, default_value_t = 3000)]
    pub port: u16,

    /// Global ceiling on simultaneously connected peers.
    #[arg(long, default_value_t = 512)]
    pub max_peers: usize,

    /// Membership ceiling per lobby.
    #[arg(long, default_value_t = 8)]
    pub max_lobby_peers: usize,

    /// Seconds between keepalive pings.
    #[arg(long, default_value_t = 10)]
    pub keepalive_secs: u64,

    /// Width of the rate-limit window in milliseconds.
    #[arg(long, default_value_t = 2000)]
    pub rate_window_ms: u64,

    /// Messages a connection may send within one window.
    #[arg(long, default_value_t = 50)]
    pub rate_max_messages: usize,
}

impl ServerConfig {
    pub fn keepalive_interval(&self) -> Duration {
        Duration::from_secs(self.keepalive_secs)
    }

    pub fn rate_window(&self) -> Duration {
        Duration::from_millis(self.rate_window_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            max_peers: 512,
            max_lobby_peers: 8,
            keepalive_secs: 10,
            rate_window_ms: 2000,
            rate_max_messages: 50,
        }
    }
}
