mod common;

use crate::common::*;
use demo_chat_lib::libs::config::ChatConfig;
use demo_chat_lib::libs::session::controller::ChatController;
use demo_chat_lib::libs::session::model::SessionState;
use demo_chat_lib::libs::storage::conversation_store::ConversationStore;
use demo_chat_lib::{open_chat, ChatError, KeyValueStore, Message};
use std::path::Path;

fn message(id: i64, text: &str, sender: &str) -> Message {
    Message {
        id,
        text: text.to_string(),
        sender: sender.to_string(),
        time: "10:00:00 AM".to_string(),
    }
}

#[test]
fn test_values_survive_reopening_the_file() {
    let (_dir, path) = sqlite_path();
    {
        let mut store = open_sqlite(&path);
        store.set("currentUser", "Regular User").unwrap();
        store.set("isLoggedIn", "true").unwrap();
        store.remove("isLoggedIn").unwrap();
    }

    let store = open_sqlite(&path);
    assert_eq!(store.get("currentUser").unwrap().as_deref(), Some("Regular User"));
    assert_eq!(store.get("isLoggedIn").unwrap(), None);
}

#[test]
fn test_conversation_round_trip_on_disk() {
    let (_dir, path) = sqlite_path();
    let history = vec![
        message(1714831509000, "hi", "Admin User"),
        message(1714831509000, "hey 👋", "Regular User"),
        message(1714831510000, "", "system"),
    ];

    let mut conversations = ConversationStore::new(open_sqlite(&path));
    conversations
        .save("Regular User", "Admin User", &history)
        .unwrap();
    drop(conversations);

    let conversations = ConversationStore::new(open_sqlite(&path));
    assert_eq!(conversations.load("Admin User", "Regular User"), history);
    assert_eq!(
        stored_messages(conversations.store(), "chat_Admin User_Regular User"),
        Some(history)
    );
}

#[test]
fn test_session_restores_from_disk() {
    let (_dir, path) = sqlite_path();
    {
        let mut chat = ChatController::new(open_sqlite(&path), TickingClock::new());
        chat.login("Rahul", "Rahul123").unwrap();
        chat.send_message("saved to disk").unwrap();
    }

    let chat = ChatController::restore(open_sqlite(&path), TickingClock::new());
    assert_eq!(chat.state(), SessionState::LoggedIn);
    assert_eq!(chat.session().current_user, "Demo User");
    assert_eq!(chat.messages().len(), 2);
    assert_eq!(chat.messages()[1].text, "saved to disk");
}

#[test]
fn test_two_tabs_last_writer_wins() {
    let (_dir, path) = sqlite_path();
    let mut tab_a = ChatController::new(open_sqlite(&path), TickingClock::new());
    let mut tab_b = ChatController::new(open_sqlite(&path), TickingClock::new());

    tab_a.login("Jyoti", "jyoti123").unwrap();
    tab_b.login("Jyoti", "jyoti123").unwrap();
    let raka = demo_user("Raka");
    tab_a.select_contact(&raka).unwrap();
    tab_b.select_contact(&raka).unwrap();

    tab_a.send_message("from tab a").unwrap();
    tab_b.send_message("from tab b").unwrap();

    let history = ConversationStore::new(open_sqlite(&path)).load("Admin User", "Regular User");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].text, "from tab b");
}

#[test]
fn test_open_chat_uses_config() {
    let (dir, _) = sqlite_path();
    let config = ChatConfig {
        database_path: dir.path().join("nested").join("chat.db"),
        time_format: "%H:%M:%S".to_string(),
    };

    let mut chat = open_chat(&config).unwrap();
    assert_eq!(chat.state(), SessionState::LoggedOut);
    chat.login("Ram", "ram123").unwrap();
    assert_eq!(chat.messages()[0].time.len(), "00:00:00".len());
    drop(chat);

    assert!(Path::new(&config.database_path).exists());
    let chat = open_chat(&config).unwrap();
    assert_eq!(chat.state(), SessionState::LoggedIn);
    assert_eq!(chat.session().current_user, "Guest User");
}

#[test]
fn test_open_chat_rejects_unknown_time_specifier() {
    let (dir, _) = sqlite_path();
    let path = dir.path().join("chat.json");
    std::fs::write(
        &path,
        r#"{ "database_path": "chat.db", "time_format": "%Q" }"#,
    )
    .unwrap();
    assert!(matches!(ChatConfig::load(&path), Err(ChatError::Config(_))));

    let config = ChatConfig {
        database_path: dir.path().join("chat.db"),
        time_format: "%Q".to_string(),
    };
    assert!(matches!(open_chat(&config), Err(ChatError::Config(_))));
    assert!(!config.database_path.exists());
}
