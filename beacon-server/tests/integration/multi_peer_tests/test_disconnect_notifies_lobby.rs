use beacon_core::{CloseStatus, MessageKind};

use crate::integration::init_tracing;
use crate::utils::{announce, connect, connect_ok, disconnect, spawn_relay, test_config};

#[tokio::test]
async fn test_disconnect_notifies_remaining_members() {
    init_tracing();

    let relay_tx = spawn_relay(test_config());

    let (host_id, lobby, host_handle) = connect_ok(&relay_tx, None).await;
    announce(&relay_tx, host_id, "Ana").await;
    let (second_id, _, _second_handle) = connect_ok(&relay_tx, Some(lobby.as_str())).await;
    announce(&relay_tx, second_id, "Ben").await;
    let (third_id, _, third_handle) = connect_ok(&relay_tx, Some(lobby.as_str())).await;
    announce(&relay_tx, third_id, "Cyn").await;

    disconnect(&relay_tx, second_id).await;

    // each survivor receives exactly one PEER_DISCONNECT naming Ben
    for handle in [&host_handle, &third_handle] {
        let start = std::time::Instant::now();
        loop {
            let notices = handle.messages_of(MessageKind::PeerDisconnect).await;
            if notices.len() == 1 {
                assert_eq!(notices[0].peer_index, second_id.to_string());
                break;
            }
            assert!(
                start.elapsed() < std::time::Duration::from_secs(2),
                "no departure notice"
            );
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
    }

    // double disconnect is a no-op
    disconnect(&relay_tx, second_id).await;
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    assert_eq!(
        host_handle
            .messages_of(MessageKind::PeerDisconnect)
            .await
            .len(),
        1
    );
}

#[tokio::test]
async fn test_last_departure_deletes_the_lobby() {
    init_tracing();

    let relay_tx = spawn_relay(test_config());

    let (host_id, lobby, _) = connect_ok(&relay_tx, None).await;
    let (second_id, _, _) = connect_ok(&relay_tx, Some(lobby.as_str())).await;

    disconnect(&relay_tx, host_id).await;
    disconnect(&relay_tx, second_id).await;

    // the code no longer names an active lobby
    let (outcome, handle) = connect(&relay_tx, Some(lobby.as_str())).await;
    assert_eq!(outcome, Err(CloseStatus::InvalidPayload));
    assert_eq!(
        handle.close_status().await,
        Some(CloseStatus::InvalidPayload)
    );
}
