//! Component assembly from config: both store backends wired through the same services.

use helpdesk::{HelpdeskComponents, HelpdeskConfig, StoreType};
use helpdesk_core::{ConversationKey, Principal, Role, RoleGroup};

fn config(database_url: String, store_type: StoreType) -> HelpdeskConfig {
    HelpdeskConfig {
        database_url,
        log_file: "logs/helpdesk.log".to_string(),
        store_type,
        rooms: vec!["101".to_string(), "205".to_string()],
        guest_names: "g1=Alice Moreau".to_string(),
    }
}

#[tokio::test]
async fn test_sqlite_components_persist_between_builds() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let url = format!("file:{}", dir.path().join("helpdesk.db").display());
    let config = config(url, StoreType::Sqlite);
    let key = ConversationKey::new("g1", "205", RoleGroup::Manager);

    {
        let components = HelpdeskComponents::from_config(&config).await.unwrap();
        components
            .conversations
            .send_guest_message("g1", "205", "MANAGER", "late checkout?")
            .await
            .unwrap();
    }

    let components = HelpdeskComponents::from_config(&config).await.unwrap();
    let thread = components.conversations.get_conversation(&key).await.unwrap();
    assert_eq!(thread.len(), 1);
    assert_eq!(thread[0].body, "late checkout?");

    let manager = Principal::new("m1", [Role::Manager]);
    let inbox = components.summaries.inbox_for(&manager).await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].guest_display_name, "Alice Moreau");
    assert_eq!(inbox[0].unread_count, 1);
}

#[tokio::test]
async fn test_memory_components_use_configured_rooms() {
    let config = config(String::new(), StoreType::Memory);
    let components = HelpdeskComponents::from_config(&config).await.unwrap();

    let err = components
        .conversations
        .send_guest_message("g1", "999", "ADMIN", "hello")
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Room not found");

    components
        .conversations
        .send_guest_message("g1", "101", "ADMIN", "hello")
        .await
        .unwrap();
    let admin = Principal::new("a1", [Role::Admin]);
    assert_eq!(components.summaries.inbox_for(&admin).await.unwrap().len(), 1);
}
