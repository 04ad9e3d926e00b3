use async_trait::async_trait;
use ghat_core::{ChatReply, Transport, TransportError};
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, info};

/// Default location of the assistant backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Path of the chat endpoint, relative to the base URL.
pub const CHAT_PATH: &str = "/api/chat";

/// Single-shot HTTP client for the assistant endpoint.
///
/// No retries and no timeout of its own; whatever `reqwest` does underneath
/// is what the caller gets.
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    #[must_use]
    pub fn new() -> Self {
        info!("Creating HttpTransport");
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}{CHAT_PATH}", self.base_url)
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, text: &str) -> Result<ChatReply, TransportError> {
        let endpoint = self.endpoint();
        debug!("POST {endpoint}");

        let response = self
            .client
            .post(&endpoint)
            .json(&json!({ "message": text }))
            .send()
            .await
            .map_err(|e| TransportError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::HttpStatus(status.as_u16()));
        }

        let body = response.json::<Value>().await.map_err(|e| {
            if e.is_decode() {
                TransportError::MalformedReply(e.to_string())
            } else {
                TransportError::ConnectionFailed(e.to_string())
            }
        })?;
        let reply = reply_from_body(&body);

        debug!("Received reply from {endpoint}: present={}", reply.reply.is_some());
        Ok(reply)
    }
}

/// Read `reply` out of any JSON body.
///
/// Absent, `null`, `false` and `0` count as no reply. Other non-string values
/// are shown as their JSON text.
fn reply_from_body(body: &Value) -> ChatReply {
    let reply = match body.get("reply") {
        None | Some(Value::Null | Value::Bool(false)) => None,
        Some(Value::String(text)) => Some(text.clone()),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => None,
        Some(other) => Some(other.to_string()),
    };
    ChatReply { reply }
}
