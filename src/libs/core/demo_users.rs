use crate::libs::core::models::{User, UserStatus};
use once_cell::sync::Lazy;

/// Built-in accounts. Doubles as the credential table and the default roster.
pub static DEMO_USERS: Lazy<Vec<User>> = Lazy::new(|| {
    vec![
        User::new("Jyoti", "jyoti123", "Admin User", "👑", UserStatus::Online, "#10b981"),
        User::new("Raka", "raka123", "Regular User", "👤", UserStatus::Online, "#3b82f6"),
        User::new("Rahul", "Rahul123", "Demo User", "⭐", UserStatus::Online, "#f59e0b"),
        User::new("Ram", "ram123", "Guest User", "👋", UserStatus::Offline, "#6b7280"),
        User::new("Bharata", "bharat123", "Support Team", "🛠️", UserStatus::Online, "#ef4444"),
    ]
});

pub fn find_by_credentials<'a>(users: &'a [User], username: &str, password: &str) -> Option<&'a User> {
    users.iter().find(|user| user.matches(username, password))
}
