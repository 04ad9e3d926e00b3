//! Session state for a single conversation.
//!
//! A session holds the append-only message log, the busy flag and the draft
//! input. Only the controller mutates it; everyone else sees `&Session`.

use ghat_core::{Author, Message};
use uuid::Uuid;

/// Whether a request is currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    /// A request issued at `generation` has not resolved yet.
    Awaiting { generation: u64 },
}

/// A conversation with its full message log.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    log: Vec<Message>,
    state: SessionState,
    draft_input: String,
    generation: u64,
}

impl Session {
    /// Create a session holding only the greeting.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Uuid::now_v7(),
            log: vec![Message::greeting()],
            state: SessionState::Idle,
            draft_input: String::new(),
            generation: 0,
        }
    }

    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn log(&self) -> &[Message] {
        &self.log
    }

    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub const fn is_busy(&self) -> bool {
        matches!(self.state, SessionState::Awaiting { .. })
    }

    #[must_use]
    pub fn draft_input(&self) -> &str {
        &self.draft_input
    }

    /// Bumped on every reset; tags in-flight requests.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn message_count(&self) -> usize {
        self.log.len()
    }

    #[must_use]
    pub fn last_message(&self) -> Option<&Message> {
        self.log.last()
    }

    /// All assistant-authored messages, in log order.
    #[must_use]
    pub fn assistant_messages(&self) -> Vec<&Message> {
        self.log
            .iter()
            .filter(|m| m.author() == Author::Assistant)
            .collect()
    }

    pub(crate) fn push(&mut self, message: Message) {
        self.log.push(message);
    }

    pub(crate) fn set_state(&mut self, state: SessionState) {
        self.state = state;
    }

    pub(crate) fn set_draft(&mut self, text: String) {
        self.draft_input = text;
    }

    pub(crate) fn take_draft(&mut self) -> String {
        std::mem::take(&mut self.draft_input)
    }

    /// Truncate back to the greeting and start a new generation.
    ///
    /// The busy state is left alone: an in-flight request still has to resolve.
    pub(crate) fn reset(&mut self) {
        self.log.clear();
        self.log.push(Message::greeting());
        self.draft_input.clear();
        self.generation += 1;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghat_core::GREETING;

    #[test]
    fn new_session_starts_with_greeting() {
        let session = Session::new();

        assert_eq!(session.message_count(), 1);
        assert_eq!(session.log()[0], Message::greeting());
        assert_eq!(session.log()[0].text(), GREETING);
        assert!(!session.is_busy());
        assert!(session.draft_input().is_empty());
        assert_eq!(session.generation(), 0);
    }

    #[test]
    fn reset_truncates_to_greeting_and_bumps_generation() {
        let mut session = Session::new();
        session.push(Message::user("Hello"));
        session.push(Message::assistant("Hi there"));
        session.set_draft("half typed".to_string());

        session.reset();

        assert_eq!(session.log(), &[Message::greeting()]);
        assert!(session.draft_input().is_empty());
        assert_eq!(session.generation(), 1);
    }

    #[test]
    fn reset_keeps_busy_state() {
        let mut session = Session::new();
        session.set_state(SessionState::Awaiting { generation: 0 });

        session.reset();

        assert!(session.is_busy());
    }

    #[test]
    fn assistant_messages_filters_log() {
        let mut session = Session::new();
        session.push(Message::user("Hello"));
        session.push(Message::assistant("Hi there"));

        let texts: Vec<&str> = session
            .assistant_messages()
            .iter()
            .map(|m| m.text())
            .collect();
        assert_eq!(texts, vec![GREETING, "Hi there"]);
    }

    #[test]
    fn take_draft_clears_it() {
        let mut session = Session::new();
        session.set_draft("Hello".to_string());

        assert_eq!(session.take_draft(), "Hello");
        assert!(session.draft_input().is_empty());
    }
}
