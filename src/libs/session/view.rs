use crate::libs::core::clock::Clock;
use crate::libs::core::models::{Message, User};
use crate::libs::session::controller::ChatController;
use crate::libs::storage::storage_traits::KeyValueStore;

/// One row of the contact sidebar.
#[derive(Clone, Debug, PartialEq)]
pub struct ContactEntry {
    pub user: User,
    pub is_selected: bool,
    /// Something has been stored for the pair (current user, this contact).
    pub has_chat: bool,
}

impl ContactEntry {
    pub fn is_online(&self) -> bool {
        self.user.is_online()
    }
}

impl<S: KeyValueStore, C: Clock> ChatController<S, C> {
    pub fn contacts(&self) -> Vec<ContactEntry> {
        let session = self.session();
        session
            .roster
            .iter()
            .map(|user| ContactEntry {
                user: user.clone(),
                is_selected: session.selected_partner.as_deref() == Some(user.display_name.as_str()),
                has_chat: self
                    .conversations()
                    .has_history(&session.current_user, &user.display_name),
            })
            .collect()
    }

    pub fn status_line(&self) -> String {
        let session = self.session();
        match &session.selected_partner {
            Some(partner) => format!("Online as: {} | Private: {}", session.current_user, partner),
            None => format!("Online as: {}", session.current_user),
        }
    }

    pub fn conversation_title(&self) -> String {
        match &self.session().selected_partner {
            Some(partner) => format!("Private chat with {}", partner),
            None => "Group Chat - Click contacts for private messages".to_string(),
        }
    }

    /// Text shown in place of the message list while it is empty.
    pub fn empty_placeholder(&self) -> String {
        match &self.session().selected_partner {
            Some(partner) => format!("Start conversation with {}...", partner),
            None => "Group chat messages appear here".to_string(),
        }
    }

    pub fn compose_placeholder(&self) -> String {
        match &self.session().selected_partner {
            Some(partner) => format!("Message {}...", partner),
            None => "Group message...".to_string(),
        }
    }

    /// Sent-by-me bubbles render differently from received ones.
    pub fn is_own_message(&self, message: &Message) -> bool {
        self.session().logged_in && message.sender == self.session().current_user
    }
}
