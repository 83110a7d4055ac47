use std::sync::Arc;

use filedrop::hub::SessionHub;
use filedrop::notifier::{NotificationError, Notifier, SessionNotifier, UPLOAD_PROGRESS_EVENT};
use filedrop::progress::ProgressEvent;
use serde_json::json;
use tokio::sync::mpsc;

#[test]
fn test_publish_reaches_registered_session() {
    let hub = SessionHub::new();
    let (tx, mut rx) = mpsc::unbounded_channel();
    hub.register("abc", tx);

    hub.publish("abc", "file-upload", json!({ "filename": "a.txt", "processedAlready": 3 }))
        .unwrap();

    let message: serde_json::Value = serde_json::from_str(&rx.try_recv().unwrap()).unwrap();
    assert_eq!(message["event"], "file-upload");
    assert_eq!(message["data"]["processedAlready"], 3);
}

#[test]
fn test_publish_to_unknown_session_fails() {
    let hub = SessionHub::new();
    let err = hub.publish("nobody", "file-upload", json!({})).unwrap_err();
    assert!(matches!(err, NotificationError::UnknownSession(id) if id == "nobody"));
}

#[test]
fn test_publish_after_client_left() {
    let hub = SessionHub::new();
    let (tx, rx) = mpsc::unbounded_channel();
    hub.register("abc", tx);
    drop(rx);

    let err = hub.publish("abc", "file-upload", json!({})).unwrap_err();
    assert!(matches!(err, NotificationError::ChannelClosed(_)));

    hub.unregister("abc");
    assert!(hub.is_empty());
}

#[test]
fn test_session_notifier_targets_only_its_session() {
    let hub = Arc::new(SessionHub::new());
    let (tx_a, mut rx_a) = mpsc::unbounded_channel();
    let (tx_b, mut rx_b) = mpsc::unbounded_channel();
    hub.register("a", tx_a);
    hub.register("b", tx_b);
    assert_eq!(hub.len(), 2);

    let notifier = SessionNotifier::new(hub.clone(), "a");
    notifier.notify(
        UPLOAD_PROGRESS_EVENT,
        &ProgressEvent {
            filename: "x.bin".to_string(),
            processed_already: 9,
        },
    );

    assert!(rx_a.try_recv().is_ok());
    assert!(rx_b.try_recv().is_err());

    // unknown session is swallowed
    SessionNotifier::new(hub, "gone").notify(UPLOAD_PROGRESS_EVENT, &json!({}));
}
