use crate::libs::core::models::{Message, User};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn,
}

/// Everything the chat view shows for the signed-in user.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    /// Display name of the signed-in user, empty when logged out.
    pub current_user: String,
    /// Display name of the private-chat partner; `None` is the group channel.
    pub selected_partner: Option<String>,
    pub roster: Vec<User>,
    /// Displayed conversation, oldest first.
    pub messages: Vec<Message>,
    pub logged_in: bool,
}

impl Session {
    pub fn state(&self) -> SessionState {
        if self.logged_in {
            SessionState::LoggedIn
        } else {
            SessionState::LoggedOut
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    /// Inline error shown under the form; empty when there is none.
    pub error: String,
}
