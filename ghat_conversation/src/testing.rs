//! Scripted transport for controller tests.

use async_trait::async_trait;
use ghat_core::{ChatReply, Transport, TransportError};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays queued outcomes and records every request it receives.
#[derive(Default)]
pub struct ScriptedTransport {
    outcomes: Mutex<VecDeque<Result<ChatReply, TransportError>>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replying(reply: &str) -> Self {
        let transport = Self::new();
        transport.push_reply(reply);
        transport
    }

    pub fn failing(error: TransportError) -> Self {
        let transport = Self::new();
        transport.push(Err(error));
        transport
    }

    pub fn push(&self, outcome: Result<ChatReply, TransportError>) {
        self.outcomes.lock().unwrap().push_back(outcome);
    }

    pub fn push_reply(&self, reply: &str) {
        self.push(Ok(ChatReply::text(reply)));
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, text: &str) -> Result<ChatReply, TransportError> {
        self.requests.lock().unwrap().push(text.to_string());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::ConnectionFailed("script exhausted".into())))
    }
}
