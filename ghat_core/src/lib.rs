#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Shared types for the ghat client: the message model, the reply shape of
//! the assistant endpoint and the `Transport` seam the controller talks to.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// First message of every session.
pub const GREETING: &str = "How can I help you today?";

/// Shown when the endpoint answers without a usable `reply`.
pub const FALLBACK_REPLY: &str = "Error: No response from API";

/// Shown for any failed exchange.
pub const CONNECTION_ERROR_REPLY: &str =
    "⚠️ Error connecting to backend. Please check if the server is running.";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Assistant,
}

/// A single entry of the conversation log. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    author: Author,
    text: String,
}

impl Message {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            author: Author::User,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            author: Author::Assistant,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn greeting() -> Self {
        Self::assistant(GREETING)
    }

    #[must_use]
    pub const fn author(&self) -> Author {
        self.author
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_assistant(&self) -> bool {
        self.author == Author::Assistant
    }
}

/// Body of a successful `/api/chat` response.
///
/// `reply` may be missing; the controller decides what to show instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatReply {
    #[serde(default)]
    pub reply: Option<String>,
}

impl ChatReply {
    #[must_use]
    pub fn text(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
        }
    }

    /// The reply text, or [`FALLBACK_REPLY`] when absent or empty.
    #[must_use]
    pub fn into_text_or_fallback(self) -> String {
        self.reply
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| FALLBACK_REPLY.to_string())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("Server responded with status: {0}")]
    HttpStatus(u16),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Malformed reply: {0}")]
    MalformedReply(String),
}

/// One request/response exchange with the assistant endpoint.
///
/// Implementations must not retry or queue.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, text: &str) -> Result<ChatReply, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, text: &str) -> Result<ChatReply, TransportError> {
        (**self).send(text).await
    }
}
