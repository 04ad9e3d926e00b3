use ghat_core::Message;

/// Change notification emitted by the controller.
///
/// Sent on a broadcast channel; a renderer or a notifier subscribes through
/// [`SessionController::subscribe`](crate::SessionController::subscribe).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A message was appended to the log.
    MessageAppended(Message),
    /// The busy flag flipped.
    BusyChanged(bool),
    /// The log was truncated back to the greeting.
    Reset,
}

impl SessionEvent {
    /// Whether this event is an assistant message landing in the log.
    #[must_use]
    pub fn is_assistant_message(&self) -> bool {
        matches!(self, Self::MessageAppended(m) if m.is_assistant())
    }
}
