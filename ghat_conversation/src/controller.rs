//! Session controller: the send/receive state machine.
//!
//! `Idle -> Awaiting` happens in [`SessionController::begin_submit`] /
//! [`SessionController::begin_quick_query`], `Awaiting -> Idle` in
//! [`SessionController::resolve`]. At most one request is in flight per
//! session because the first phase refuses to run while `Awaiting`.

use crate::events::SessionEvent;
use crate::session::{Session, SessionState};
use ghat_core::{CONNECTION_ERROR_REPLY, ChatReply, Message, Transport, TransportError};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Why a submission was not accepted. Rejections leave the session untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejected {
    #[error("input is empty")]
    EmptyInput,
    #[error("a request is already in flight")]
    Busy,
}

/// Token for an accepted submission, consumed by [`SessionController::resolve`].
#[derive(Debug, PartialEq, Eq)]
pub struct PendingRequest {
    text: String,
    generation: u64,
}

impl PendingRequest {
    /// Trimmed text that goes on the wire.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// What the second phase did with the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The assistant message appended to the log.
    Appended(Message),
    /// The session was reset while the request was in flight; nothing appended.
    Discarded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rejected(Rejected),
    Resolved(Resolution),
}

impl SubmitOutcome {
    /// The appended assistant message, if any.
    #[must_use]
    pub const fn reply(&self) -> Option<&Message> {
        match self {
            Self::Resolved(Resolution::Appended(message)) => Some(message),
            _ => None,
        }
    }
}

/// Owns a [`Session`] and orchestrates each send cycle against a transport.
pub struct SessionController<T = Arc<dyn Transport>>
where
    T: Transport,
{
    transport: T,
    session: Session,
    events: broadcast::Sender<SessionEvent>,
}

impl<T> SessionController<T>
where
    T: Transport,
{
    pub fn new(transport: T) -> Self {
        let session = Session::new();
        info!("Starting session {}", session.id());
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            transport,
            session,
            events,
        }
    }

    /// Read-only view of the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.session.is_busy()
    }

    /// Subscribe to log and busy-flag changes.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.session.set_draft(text.into());
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        self.session.draft_input()
    }

    /// First phase of a typed submission. Clears the draft when accepted.
    pub fn begin_submit(&mut self, text: &str) -> Result<PendingRequest, Rejected> {
        let pending = self.begin(text)?;
        self.session.take_draft();
        Ok(pending)
    }

    /// First phase of a preset prompt. The draft is left as it is.
    pub fn begin_quick_query(&mut self, text: &str) -> Result<PendingRequest, Rejected> {
        self.begin(text)
    }

    fn begin(&mut self, text: &str) -> Result<PendingRequest, Rejected> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Rejected::EmptyInput);
        }
        if self.session.is_busy() {
            debug!("Rejecting submission: request already in flight");
            return Err(Rejected::Busy);
        }

        let generation = self.session.generation();
        let message = Message::user(text);
        self.session.push(message.clone());
        self.session.set_state(SessionState::Awaiting { generation });
        self.emit(SessionEvent::MessageAppended(message));
        self.emit(SessionEvent::BusyChanged(true));

        debug!("Idle -> Awaiting (generation {generation})");
        Ok(PendingRequest {
            text: text.to_string(),
            generation,
        })
    }

    /// Second phase: record the outcome and return to `Idle`.
    ///
    /// Transport errors become the fixed connection-error message. A request
    /// issued before the last [`reset`](Self::reset) is dropped.
    pub fn resolve(
        &mut self,
        pending: PendingRequest,
        outcome: Result<ChatReply, TransportError>,
    ) -> Resolution {
        let resolution = if pending.generation == self.session.generation() {
            let text = match outcome {
                Ok(reply) => reply.into_text_or_fallback(),
                Err(e) => {
                    warn!("Request to assistant failed: {e}");
                    CONNECTION_ERROR_REPLY.to_string()
                }
            };
            let message = Message::assistant(text);
            self.session.push(message.clone());
            self.emit(SessionEvent::MessageAppended(message.clone()));
            Resolution::Appended(message)
        } else {
            warn!(
                "Discarding reply from generation {} (session is at {})",
                pending.generation,
                self.session.generation()
            );
            Resolution::Discarded
        };

        self.session.set_state(SessionState::Idle);
        self.emit(SessionEvent::BusyChanged(false));
        debug!("Awaiting -> Idle");

        resolution
    }

    /// Submit typed text: both phases around one exchange.
    pub async fn submit(&mut self, text: &str) -> SubmitOutcome {
        match self.begin_submit(text) {
            Ok(pending) => SubmitOutcome::Resolved(self.exchange(pending).await),
            Err(rejected) => SubmitOutcome::Rejected(rejected),
        }
    }

    /// Submit whatever is in the draft field.
    pub async fn submit_draft(&mut self) -> SubmitOutcome {
        let text = self.session.draft_input().to_string();
        self.submit(&text).await
    }

    /// Submit a preset prompt without touching the draft.
    pub async fn quick_query(&mut self, text: &str) -> SubmitOutcome {
        match self.begin_quick_query(text) {
            Ok(pending) => SubmitOutcome::Resolved(self.exchange(pending).await),
            Err(rejected) => SubmitOutcome::Rejected(rejected),
        }
    }

    /// Start a new conversation. An in-flight request is not cancelled.
    pub fn reset(&mut self) {
        self.session.reset();
        info!(
            "Session {} reset (generation {})",
            self.session.id(),
            self.session.generation()
        );
        self.emit(SessionEvent::Reset);
    }

    async fn exchange(&mut self, pending: PendingRequest) -> Resolution {
        let outcome = self.transport.send(pending.text()).await;
        self.resolve(pending, outcome)
    }

    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use ghat_core::{Author, FALLBACK_REPLY, GREETING};

    fn controller(transport: &Arc<ScriptedTransport>) -> SessionController<Arc<ScriptedTransport>> {
        SessionController::new(Arc::clone(transport))
    }

    #[tokio::test]
    async fn successful_exchange_appends_user_then_assistant() {
        let transport = Arc::new(ScriptedTransport::replying("Hi there"));
        let mut controller = controller(&transport);

        let outcome = controller.submit("Hello").await;

        assert_eq!(outcome.reply().map(Message::text), Some("Hi there"));
        assert_eq!(
            controller.session().log(),
            &[
                Message::greeting(),
                Message::user("Hello"),
                Message::assistant("Hi there"),
            ]
        );
        assert!(!controller.is_busy());
        assert_eq!(transport.requests(), vec!["Hello"]);
    }

    #[tokio::test]
    async fn failed_exchange_appends_connection_error() {
        let transport = Arc::new(ScriptedTransport::failing(TransportError::ConnectionFailed(
            "refused".into(),
        )));
        let mut controller = controller(&transport);
        let before = controller.session().message_count();

        controller.submit("Hello").await;

        let log = controller.session().log();
        assert_eq!(log.len(), before + 2);
        assert_eq!(log[before], Message::user("Hello"));
        assert_eq!(log[before + 1], Message::assistant(CONNECTION_ERROR_REPLY));
        assert!(!controller.is_busy());
    }

    #[tokio::test]
    async fn http_status_failure_appends_connection_error() {
        let transport = Arc::new(ScriptedTransport::failing(TransportError::HttpStatus(500)));
        let mut controller = controller(&transport);

        let outcome = controller.submit("Hello").await;

        assert_eq!(
            outcome.reply().map(Message::text),
            Some(CONNECTION_ERROR_REPLY)
        );
        assert!(!controller.is_busy());
    }

    #[tokio::test]
    async fn missing_or_empty_reply_uses_fallback() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push(Ok(ChatReply::default()));
        transport.push(Ok(ChatReply::text("")));
        let mut controller = controller(&transport);

        controller.submit("one").await;
        controller.submit("two").await;

        let log = controller.session().log();
        assert_eq!(log[2], Message::assistant(FALLBACK_REPLY));
        assert_eq!(log[4], Message::assistant(FALLBACK_REPLY));
    }

    #[tokio::test]
    async fn blank_input_is_rejected_without_side_effects() {
        let transport = Arc::new(ScriptedTransport::new());
        let mut controller = controller(&transport);

        for text in ["", "   ", "\n\t "] {
            assert_eq!(
                controller.submit(text).await,
                SubmitOutcome::Rejected(Rejected::EmptyInput)
            );
            assert_eq!(
                controller.quick_query(text).await,
                SubmitOutcome::Rejected(Rejected::EmptyInput)
            );
        }

        assert_eq!(controller.session().log(), &[Message::greeting()]);
        assert!(!controller.is_busy());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn blank_input_is_rejected_while_busy_too() {
        let transport = Arc::new(ScriptedTransport::new());
        let mut controller = controller(&transport);
        let _pending = controller.begin_submit("Hello").unwrap();

        assert_eq!(controller.begin_submit("  "), Err(Rejected::EmptyInput));
        assert_eq!(controller.session().message_count(), 2);
    }

    #[tokio::test]
    async fn submissions_while_busy_are_no_ops() {
        let transport = Arc::new(ScriptedTransport::replying("unused"));
        let mut controller = controller(&transport);

        let pending = controller.begin_submit("Hello").unwrap();
        assert!(controller.is_busy());

        assert_eq!(
            controller.submit("Hello").await,
            SubmitOutcome::Rejected(Rejected::Busy)
        );
        assert_eq!(
            controller.quick_query("What is Programming?").await,
            SubmitOutcome::Rejected(Rejected::Busy)
        );

        assert_eq!(
            controller.session().log(),
            &[Message::greeting(), Message::user("Hello")]
        );
        assert!(controller.is_busy());
        assert!(transport.requests().is_empty());

        controller.resolve(pending, Ok(ChatReply::text("Hi there")));
        assert!(!controller.is_busy());
    }

    #[tokio::test]
    async fn submit_trims_text_and_clears_draft() {
        let transport = Arc::new(ScriptedTransport::replying("Hi there"));
        let mut controller = controller(&transport);
        controller.set_draft("  Hello  ");

        controller.submit_draft().await;

        assert_eq!(controller.session().log()[1], Message::user("Hello"));
        assert!(controller.draft().is_empty());
        assert_eq!(transport.requests(), vec!["Hello"]);
    }

    #[tokio::test]
    async fn quick_query_leaves_draft_alone() {
        let transport = Arc::new(ScriptedTransport::replying("A language"));
        let mut controller = controller(&transport);
        controller.set_draft("half typed");

        controller.quick_query("What is JavaScript?").await;

        assert_eq!(controller.draft(), "half typed");
        assert_eq!(
            controller.session().log()[1..],
            [
                Message::user("What is JavaScript?"),
                Message::assistant("A language"),
            ]
        );
    }

    #[tokio::test]
    async fn rejected_submit_keeps_draft() {
        let transport = Arc::new(ScriptedTransport::new());
        let mut controller = controller(&transport);
        let _pending = controller.begin_quick_query("first").unwrap();
        controller.set_draft("second");

        assert_eq!(
            controller.submit_draft().await,
            SubmitOutcome::Rejected(Rejected::Busy)
        );
        assert_eq!(controller.draft(), "second");
    }

    #[tokio::test]
    async fn messages_keep_acceptance_order() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_reply("r1");
        transport.push_reply("r2");
        let mut controller = controller(&transport);

        controller.submit("q1").await;
        controller.quick_query("q2").await;

        let texts: Vec<&str> = controller.session().log().iter().map(Message::text).collect();
        assert_eq!(texts, vec![GREETING, "q1", "r1", "q2", "r2"]);
    }

    #[tokio::test]
    async fn reset_restores_greeting() {
        let transport = Arc::new(ScriptedTransport::replying("Hi there"));
        let mut controller = controller(&transport);
        controller.submit("Hello").await;
        controller.set_draft("more");

        controller.reset();

        assert_eq!(controller.session().log(), &[Message::greeting()]);
        assert_eq!(controller.session().log()[0].author(), Author::Assistant);
        assert!(controller.draft().is_empty());
    }

    #[tokio::test]
    async fn reply_from_before_reset_is_discarded() {
        let transport = Arc::new(ScriptedTransport::new());
        let mut controller = controller(&transport);

        let pending = controller.begin_submit("Hello").unwrap();
        controller.reset();
        assert!(controller.is_busy());
        assert_eq!(controller.begin_submit("again"), Err(Rejected::Busy));

        let resolution = controller.resolve(pending, Ok(ChatReply::text("stale")));

        assert_eq!(resolution, Resolution::Discarded);
        assert_eq!(controller.session().log(), &[Message::greeting()]);
        assert!(!controller.is_busy());
    }

    #[tokio::test]
    async fn session_stays_usable_after_failure() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push(Err(TransportError::ConnectionFailed("down".into())));
        transport.push_reply("back up");
        let mut controller = controller(&transport);

        controller.submit("one").await;
        let outcome = controller.submit("two").await;

        assert_eq!(outcome.reply().map(Message::text), Some("back up"));
        assert_eq!(controller.session().message_count(), 5);
    }

    #[tokio::test]
    async fn events_follow_each_phase() {
        let transport = Arc::new(ScriptedTransport::replying("Hi there"));
        let mut controller = controller(&transport);
        let mut events = controller.subscribe();

        controller.submit("Hello").await;
        controller.reset();

        let mut received = Vec::new();
        while let Ok(event) = events.try_recv() {
            received.push(event);
        }
        assert_eq!(
            received,
            vec![
                SessionEvent::MessageAppended(Message::user("Hello")),
                SessionEvent::BusyChanged(true),
                SessionEvent::MessageAppended(Message::assistant("Hi there")),
                SessionEvent::BusyChanged(false),
                SessionEvent::Reset,
            ]
        );
        assert!(received[2].is_assistant_message());
    }

    #[tokio::test]
    async fn rejected_submission_emits_nothing() {
        let transport = Arc::new(ScriptedTransport::new());
        let mut controller = controller(&transport);
        let mut events = controller.subscribe();

        controller.submit("   ").await;

        assert!(events.try_recv().is_err());
    }
}
