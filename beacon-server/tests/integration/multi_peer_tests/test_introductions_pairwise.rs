use beacon_core::MessageKind;
use serde_json::json;

use crate::integration::init_tracing;
use crate::utils::{announce, connect_ok, spawn_relay, test_config};

#[tokio::test]
async fn test_introductions_cover_every_ordered_pair() {
    init_tracing();

    let relay_tx = spawn_relay(test_config());

    let (host_id, lobby, host_handle) = connect_ok(&relay_tx, None).await;
    announce(&relay_tx, host_id, "Ana").await;

    // alone in the lobby: announcing produces nothing
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    assert!(
        host_handle
            .messages_of(MessageKind::PeerConnect)
            .await
            .is_empty()
    );

    let (second_id, _, second_handle) = connect_ok(&relay_tx, Some(lobby.as_str())).await;
    announce(&relay_tx, second_id, "Ben").await;
    assert!(second_handle.wait_for_messages(2, 2000).await);
    assert!(host_handle.wait_for_messages(2, 2000).await);

    let (third_id, _, third_handle) = connect_ok(&relay_tx, Some(lobby.as_str())).await;
    announce(&relay_tx, third_id, "Cyn").await;
    assert!(third_handle.wait_for_messages(3, 2000).await);
    assert!(host_handle.wait_for_messages(3, 2000).await);
    assert!(second_handle.wait_for_messages(3, 2000).await);

    // three sequential joins: 3·2 = 6 introduction messages in total
    let mut total = 0;
    for handle in [&host_handle, &second_handle, &third_handle] {
        total += handle.messages_of(MessageKind::PeerConnect).await.len();
    }
    assert_eq!(total, 6);

    // the newcomer learned about existing members in lobby order, with
    // their names and host flags
    let intros = third_handle.messages_of(MessageKind::PeerConnect).await;
    assert_eq!(intros.len(), 2);
    assert_eq!(intros[0].peer_index, host_id.to_string());
    assert_eq!(
        intros[0].data,
        json!({ "name": "Ana", "is_host": true, "preexisting": true })
    );
    assert_eq!(intros[1].peer_index, second_id.to_string());
    assert_eq!(
        intros[1].data,
        json!({ "name": "Ben", "is_host": false, "preexisting": true })
    );

    // existing members received the newcomer's announcement
    let seen_by_host: Vec<_> = host_handle
        .messages_of(MessageKind::PeerConnect)
        .await
        .into_iter()
        .filter(|m| m.peer_index == third_id.to_string())
        .collect();
    assert_eq!(seen_by_host.len(), 1);
    assert_eq!(
        seen_by_host[0].data,
        json!({ "name": "Cyn", "is_host": false, "preexisting": true })
    );
}
