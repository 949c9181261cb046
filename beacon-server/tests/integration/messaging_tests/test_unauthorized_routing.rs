use beacon_core::{CloseStatus, PeerId};
use serde_json::json;

use crate::integration::init_tracing;
use crate::utils::{connect_ok, send_text, spawn_relay, test_config};

#[tokio::test]
async fn test_relay_to_unknown_destination_closes_the_sender() {
    init_tracing();

    let relay_tx = spawn_relay(test_config());

    // destination id that was never registered
    let (sender_id, _, sender_handle) = connect_ok(&relay_tx, None).await;
    let payload = json!({
        "type": 3,
        "peer_index": PeerId::new().to_string(),
        "data": {},
    });
    send_text(&relay_tx, sender_id, payload.to_string()).await;
    assert_eq!(
        sender_handle.wait_for_close(2000).await,
        Some(CloseStatus::Unauthorized)
    );

    // destination that is not even an identifier
    let (sender_id, _, sender_handle) = connect_ok(&relay_tx, None).await;
    let payload = json!({ "type": 3, "peer_index": "not-a-peer", "data": {} });
    send_text(&relay_tx, sender_id, payload.to_string()).await;
    assert_eq!(
        sender_handle.wait_for_close(2000).await,
        Some(CloseStatus::Unauthorized)
    );
}

#[tokio::test]
async fn test_cross_lobby_relay_is_never_delivered() {
    init_tracing();

    let relay_tx = spawn_relay(test_config());
    let (sender_id, _, sender_handle) = connect_ok(&relay_tx, None).await;
    let (other_id, _, other_handle) = connect_ok(&relay_tx, None).await;

    let payload = json!({
        "type": 5,
        "peer_index": other_id.to_string(),
        "data": { "candidate": "candidate:1" },
    });
    send_text(&relay_tx, sender_id, payload.to_string()).await;

    assert_eq!(
        sender_handle.wait_for_close(2000).await,
        Some(CloseStatus::Unauthorized)
    );

    // the target saw nothing beyond its own SET_ID
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    assert_eq!(other_handle.messages().await.len(), 1);
    assert!(other_handle.close_status().await.is_none());
}
