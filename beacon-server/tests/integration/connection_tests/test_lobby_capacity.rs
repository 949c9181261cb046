use beacon_core::CloseStatus;

use crate::integration::init_tracing;
use crate::utils::{connect, connect_ok, spawn_relay, test_config};

#[tokio::test]
async fn test_lobby_at_capacity_rejects_joins() {
    init_tracing();

    // test_config caps lobbies at 4 members
    let relay_tx = spawn_relay(test_config());
    let (_, lobby, host_handle) = connect_ok(&relay_tx, None).await;
    for _ in 0..3 {
        connect_ok(&relay_tx, Some(lobby.as_str())).await;
    }

    let (outcome, handle) = connect(&relay_tx, Some(lobby.as_str())).await;
    assert_eq!(outcome, Err(CloseStatus::Forbidden));
    assert_eq!(handle.close_status().await, Some(CloseStatus::Forbidden));

    // members already inside are untouched
    assert!(host_handle.close_status().await.is_none());
}
