//! HTTP client for the relay's `/api/llm` endpoint.

use redpen_core::{RequestPayload, SessionError};
use serde::Deserialize;

#[derive(Deserialize)]
struct AnswerBody {
    answer: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Thin wrapper over reqwest for talking to the relay.
#[derive(Clone)]
pub struct RelayClient {
    base_url: String,
    client: reqwest::Client,
}

impl RelayClient {
    /// Create a client for a relay at `base_url` (scheme + host + port).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Send a payload and return the generated answer.
    ///
    /// A non-success status is surfaced with the relay's `{error}` body when
    /// one can be parsed, or a generic HTTP message otherwise.
    pub async fn send(&self, payload: &RequestPayload) -> Result<String, SessionError> {
        let url = format!("{}/api/llm", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| SessionError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|b| b.error)
                .unwrap_or_else(|_| format!("HTTP error {status}"));
            return Err(SessionError::Relay { status, message });
        }

        let body: AnswerBody = response
            .json()
            .await
            .map_err(|e| SessionError::Transport(e.to_string()))?;

        Ok(body.answer)
    }
}
