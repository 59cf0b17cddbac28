use crate::libs::config::DEFAULT_TIME_FORMAT;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Sender recorded on messages the app writes itself, such as the welcome line.
pub const SYSTEM_SENDER: &str = "system";

/// Pseudo-participant standing in for the group channel.
pub const GROUP_PARTICIPANT: &str = "Everyone";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Online,
    Offline,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub password: String,
    pub display_name: String,
    pub avatar: String,
    pub status: UserStatus,
    pub color: String,
}

impl User {
    pub fn new(
        username: &str,
        password: &str,
        display_name: &str,
        avatar: &str,
        status: UserStatus,
        color: &str,
    ) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            display_name: display_name.to_string(),
            avatar: avatar.to_string(),
            status,
            color: color.to_string(),
        }
    }

    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }

    pub fn is_online(&self) -> bool {
        self.status == UserStatus::Online
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Milliseconds since the Unix epoch at creation. Not unique.
    pub id: i64,
    pub text: String,
    pub sender: String,
    pub time: String,
}

impl Message {
    pub fn new(text: &str, sender: &str, created_at: DateTime<Local>, time_format: &str) -> Self {
        Self {
            id: created_at.timestamp_millis(),
            text: text.to_string(),
            sender: sender.to_string(),
            time: format_time(created_at, time_format),
        }
    }

    pub fn welcome(display_name: &str, created_at: DateTime<Local>, time_format: &str) -> Self {
        Self::new(
            &format!("Welcome to the chat, {}!", display_name),
            SYSTEM_SENDER,
            created_at,
            time_format,
        )
    }

    pub fn is_system(&self) -> bool {
        self.sender == SYSTEM_SENDER
    }
}

fn format_time(at: DateTime<Local>, time_format: &str) -> String {
    let mut time = String::new();
    if write!(time, "{}", at.format(time_format)).is_err() {
        time.clear();
        let _ = write!(time, "{}", at.format(DEFAULT_TIME_FORMAT));
    }
    time
}
