use std::time::Duration;
use tokio::time::timeout;
use webmail_notify::core::config::NotifierConfig;
use webmail_notify::core::models::NotifierEvent;
use webmail_notify::services::email::MailNotifier;

#[tokio::test]
async fn test_login_failure_event_on_unreachable_server() {
    let mut config = NotifierConfig::new(
        "user@example.com".to_string(),
        "password123".to_string(),
        "127.0.0.1".to_string(),
    );
    // Nothing listens on this port, the connect must fail
    config.port = 1;

    let (handle, mut events) = MailNotifier::spawn(config);

    let event = timeout(Duration::from_secs(30), events.recv())
        .await
        .expect("timed out waiting for event")
        .expect("event channel closed without an event");

    match event {
        NotifierEvent::Login(status) => assert!(!status.success),
        other => panic!("Expected login failure event, got {:?}", other),
    }

    // The notifier takes no corrective action after a failed login
    handle.await.unwrap();
    assert!(events.recv().await.is_none());
}

#[tokio::test]
async fn test_logical_server_name_resolves_before_connect() {
    let config = NotifierConfig::new(
        "user@example.com".to_string(),
        "password123".to_string(),
        "teesta".to_string(),
    );
    assert_eq!(config.resolved_host(), "202.141.80.12");

    let mut config = config;
    config.mail_server = "no-such-server".to_string();
    assert_eq!(config.resolved_host(), "no-such-server");
}
