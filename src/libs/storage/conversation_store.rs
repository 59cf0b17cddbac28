use crate::libs::core::models::Message;
use crate::libs::storage::records::ChatKey;
use crate::libs::storage::storage_traits::{KeyValueStore, StoreError};
use tracing::{debug, warn};

/// Message histories keyed by participant pair, persisted as JSON arrays.
///
/// Reads never fail: a missing, unreadable or corrupt history is an empty one.
/// Writes replace the whole history under the key.
#[derive(Debug)]
pub struct ConversationStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ConversationStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn key_for(user_a: &str, user_b: &str) -> ChatKey {
        ChatKey::new(user_a, user_b)
    }

    pub fn load(&self, user_a: &str, user_b: &str) -> Vec<Message> {
        let key = Self::key_for(user_a, user_b);
        let raw = match self.store.get(key.as_str()) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(key = %key, error = %err, "failed to read conversation, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Message>>(&raw) {
            Ok(messages) => {
                debug!(key = %key, count = messages.len(), "loaded conversation");
                messages
            }
            Err(err) => {
                warn!(key = %key, error = %err, "corrupt conversation data, treating as empty");
                Vec::new()
            }
        }
    }

    pub fn save(&mut self, user_a: &str, user_b: &str, messages: &[Message]) -> Result<(), StoreError> {
        let key = Self::key_for(user_a, user_b);
        let raw = serde_json::to_string(messages)?;
        self.store.set(key.as_str(), &raw)?;
        debug!(key = %key, count = messages.len(), "saved conversation");
        Ok(())
    }

    /// Whether anything has been written for the pair, parseable or not.
    pub fn has_history(&self, user_a: &str, user_b: &str) -> bool {
        let key = Self::key_for(user_a, user_b);
        matches!(self.store.get(key.as_str()), Ok(Some(raw)) if !raw.is_empty())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}
