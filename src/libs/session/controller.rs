use crate::libs::config::{validate_time_format, DEFAULT_TIME_FORMAT};
use crate::libs::core::clock::{Clock, SystemClock};
use crate::libs::core::demo_users::{find_by_credentials, DEMO_USERS};
use crate::libs::core::models::{Message, User, GROUP_PARTICIPANT};
use crate::libs::session::model::{LoginForm, Session, SessionState};
use crate::libs::storage::conversation_store::ConversationStore;
use crate::libs::storage::records::{CURRENT_USER_KEY, LOGGED_IN_KEY, LOGGED_IN_VALUE, MEMBERS_KEY};
use crate::libs::storage::storage_traits::{KeyValueStore, StoreError};
use crate::ChatError;
use tracing::{debug, info, warn};

enum RosterRead {
    Present(Vec<User>),
    Absent,
    Corrupt,
}

/// Drives the login gate and the chat view.
///
/// All session state lives here and changes only through the transition
/// methods (`login`, `logout`, `select_contact`, `send_message`); callers
/// observe it through the read-only accessors.
pub struct ChatController<S: KeyValueStore, C: Clock = SystemClock> {
    conversations: ConversationStore<S>,
    clock: C,
    credentials: Vec<User>,
    time_format: String,
    session: Session,
    login_form: LoginForm,
    draft: String,
    scroll_requested: bool,
}

impl<S: KeyValueStore, C: Clock> ChatController<S, C> {
    /// A logged-out controller that ignores any persisted session.
    pub fn new(store: S, clock: C) -> Self {
        Self {
            conversations: ConversationStore::new(store),
            clock,
            credentials: DEMO_USERS.clone(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            session: Session::default(),
            login_form: LoginForm::default(),
            draft: String::new(),
            scroll_requested: false,
        }
    }

    /// Startup path: picks the session back up if the store says someone is
    /// logged in. No welcome message is written.
    pub fn restore(store: S, clock: C) -> Self {
        let mut controller = Self::new(store, clock);
        controller.rehydrate();
        controller
    }

    /// An invalid format is ignored and the default kept.
    pub fn with_time_format(mut self, time_format: &str) -> Self {
        match validate_time_format(time_format) {
            Ok(()) => self.time_format = time_format.to_string(),
            Err(err) => warn!(error = %err, "keeping default time format"),
        }
        self
    }

    /// Replaces the built-in accounts used for login and roster seeding.
    pub fn with_credentials(mut self, credentials: Vec<User>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn login_form(&self) -> &LoginForm {
        &self.login_form
    }

    pub fn messages(&self) -> &[Message] {
        &self.session.messages
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: &str) {
        self.draft = text.to_string();
    }

    /// True once after every change to the displayed list.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_requested)
    }

    pub fn conversations(&self) -> &ConversationStore<S> {
        &self.conversations
    }

    pub fn into_store(self) -> S {
        self.conversations.into_inner()
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<(), ChatError> {
        self.login_form.username = username.to_string();
        self.login_form.password = password.to_string();
        self.login_form.error.clear();

        let user = match find_by_credentials(&self.credentials, username, password) {
            Some(user) => user.clone(),
            None => {
                info!(username, "rejected login");
                self.login_form.error = ChatError::InvalidCredentials.to_string();
                return Err(ChatError::InvalidCredentials);
            }
        };
        let display_name = user.display_name;

        let (roster, seed_roster) = match self.read_roster() {
            RosterRead::Present(roster) => (roster, false),
            RosterRead::Absent | RosterRead::Corrupt => (self.credentials.clone(), true),
        };

        let mut messages = self.conversations.load(&display_name, GROUP_PARTICIPANT);
        messages.push(Message::welcome(&display_name, self.clock.now(), &self.time_format));

        self.session = Session {
            current_user: display_name,
            selected_partner: None,
            roster,
            messages,
            logged_in: true,
        };
        self.scroll_requested = true;
        info!(user = %self.session.current_user, "logged in");

        let store = self.conversations.store_mut();
        store.set(LOGGED_IN_KEY, LOGGED_IN_VALUE)?;
        store.set(CURRENT_USER_KEY, &self.session.current_user)?;
        if seed_roster {
            let raw = serde_json::to_string(&self.session.roster).map_err(StoreError::from)?;
            store.set(MEMBERS_KEY, &raw)?;
        }
        self.conversations.save(
            &self.session.current_user,
            GROUP_PARTICIPANT,
            &self.session.messages,
        )?;
        Ok(())
    }

    /// Conversation histories are left in the store.
    pub fn logout(&mut self) -> Result<(), ChatError> {
        self.ensure_logged_in()?;
        info!(user = %self.session.current_user, "logged out");

        self.session = Session::default();
        self.draft.clear();
        self.scroll_requested = true;

        self.conversations.store_mut().remove(LOGGED_IN_KEY)?;
        Ok(())
    }

    pub fn select_contact(&mut self, member: &User) -> Result<(), ChatError> {
        self.ensure_logged_in()?;

        let messages = self
            .conversations
            .load(&self.session.current_user, &member.display_name);
        debug!(partner = %member.display_name, count = messages.len(), "selected contact");

        self.session.selected_partner = Some(member.display_name.clone());
        self.session.messages = messages;
        self.scroll_requested = true;
        Ok(())
    }

    /// Blank or whitespace-only text is dropped without an error.
    pub fn send_message(&mut self, text: &str) -> Result<(), ChatError> {
        self.ensure_logged_in()?;
        if text.trim().is_empty() {
            return Ok(());
        }

        let recipient = self
            .session
            .selected_partner
            .clone()
            .unwrap_or_else(|| GROUP_PARTICIPANT.to_string());
        let message = Message::new(
            text,
            &self.session.current_user,
            self.clock.now(),
            &self.time_format,
        );

        self.session.messages.push(message);
        self.scroll_requested = true;
        self.draft.clear();

        self.conversations
            .save(&self.session.current_user, &recipient, &self.session.messages)?;
        Ok(())
    }

    pub fn submit_draft(&mut self) -> Result<(), ChatError> {
        let text = self.draft.clone();
        self.send_message(&text)
    }

    fn ensure_logged_in(&self) -> Result<(), ChatError> {
        match self.session.state() {
            SessionState::LoggedIn => Ok(()),
            SessionState::LoggedOut => Err(ChatError::NotLoggedIn),
        }
    }

    fn rehydrate(&mut self) {
        let logged_in = self.read_value(LOGGED_IN_KEY);
        let current_user = self.read_value(CURRENT_USER_KEY);
        let current_user = match (logged_in, current_user) {
            (Some(flag), Some(user)) if !flag.is_empty() && !user.is_empty() => user,
            _ => return,
        };

        let roster = match self.read_roster() {
            RosterRead::Present(roster) => roster,
            RosterRead::Absent | RosterRead::Corrupt => Vec::new(),
        };
        let messages = self.conversations.load(&current_user, GROUP_PARTICIPANT);

        info!(user = %current_user, "restored session");
        self.session = Session {
            current_user,
            selected_partner: None,
            roster,
            messages,
            logged_in: true,
        };
        self.scroll_requested = true;
    }

    fn read_value(&self, key: &str) -> Option<String> {
        match self.conversations.store().get(key) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "failed to read persisted value");
                None
            }
        }
    }

    fn read_roster(&self) -> RosterRead {
        let raw = match self.read_value(MEMBERS_KEY) {
            Some(raw) => raw,
            None => return RosterRead::Absent,
        };
        match serde_json::from_str::<Vec<User>>(&raw) {
            Ok(roster) => RosterRead::Present(roster),
            Err(err) => {
                warn!(error = %err, "corrupt roster data, ignoring it");
                RosterRead::Corrupt
            }
        }
    }
}
