//! Error types for the Redpen domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum.

use thiserror::Error;

/// The top-level error type for all Redpen operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures while talking to the model provider.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Rendered with "API key" in the message on purpose — the relay maps
    /// any error whose text mentions the API key to HTTP 401.
    #[error("Invalid API key: {0}")]
    AuthenticationFailed(String),

    #[error("Empty response from LLM")]
    EmptyResponse,

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Failures while reading from or writing to the host document.
#[derive(Debug, Clone, Error)]
pub enum DocumentError {
    /// The document yielded only whitespace. The display text is the
    /// user-facing banner message, so it is localized.
    #[error("Не удалось получить текст из документа. Откройте документ и попробуйте снова.")]
    NoContent,

    #[error("Ошибка доступа к документу: {0}")]
    Access(String),
}

/// Failures surfaced by the client session.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// User aborted the in-flight request. Suppressed — never shown as an
    /// error banner.
    #[error("Request was cancelled")]
    Cancelled,

    /// The relay answered with a non-success status and an `{error}` body.
    #[error("{message} (HTTP {status})")]
    Relay { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(String),

    #[error(transparent)]
    Document(#[from] DocumentError),
}
