use std::time::{Duration, Instant};

use beacon_server::ServerConfig;

use crate::integration::init_tracing;
use crate::utils::{connect_ok, spawn_relay, test_config};

#[tokio::test]
async fn test_keepalive_pings_every_live_connection() {
    init_tracing();

    let relay_tx = spawn_relay(ServerConfig {
        keepalive_secs: 1,
        ..test_config()
    });

    let (_, lobby, first) = connect_ok(&relay_tx, None).await;
    let (_, _, second) = connect_ok(&relay_tx, Some(lobby.as_str())).await;

    let start = Instant::now();
    while first.ping_count().await == 0 || second.ping_count().await == 0 {
        assert!(
            start.elapsed() < Duration::from_secs(5),
            "no keepalive probe within 5s"
        );
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}
