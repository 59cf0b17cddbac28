use std::cmp::Ordering;
use std::fmt;

pub const LOGGED_IN_KEY: &str = "isLoggedIn";
pub const LOGGED_IN_VALUE: &str = "true";
pub const CURRENT_USER_KEY: &str = "currentUser";
pub const MEMBERS_KEY: &str = "chatMembers";

const CHAT_KEY_PREFIX: &str = "chat";
const CHAT_KEY_SEPARATOR: char = '_';

/// Storage key of the conversation between two participants.
///
/// Built from the unordered pair, so `ChatKey::new(a, b) == ChatKey::new(b, a)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChatKey(String);

impl ChatKey {
    pub fn new(participant_a: &str, participant_b: &str) -> Self {
        let (first, second) = match utf16_cmp(participant_a, participant_b) {
            Ordering::Greater => (participant_b, participant_a),
            _ => (participant_a, participant_b),
        };
        ChatKey(format!(
            "{}{}{}{}{}",
            CHAT_KEY_PREFIX, CHAT_KEY_SEPARATOR, first, CHAT_KEY_SEPARATOR, second
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChatKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ChatKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Keys already written by the web client were ordered by UTF-16 code units,
// which differs from byte order for characters above U+FFFF.
fn utf16_cmp(a: &str, b: &str) -> Ordering {
    a.encode_utf16().cmp(b.encode_utf16())
}
