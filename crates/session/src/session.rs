//! The chat session — conversation log plus the `send` orchestration.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use redpen_core::text::truncate_chars;
use redpen_core::{Message, Mode, SessionError, Settings};
use redpen_document::{DocumentHost, select_context};
use redpen_prompts::{build_payload, format_context_info};

use crate::RelayClient;

/// How many context characters to show in the user-message preview.
const PREVIEW_CHARS: usize = 100;

/// Per-send flags.
#[derive(Debug, Clone, Copy)]
pub struct SendOptions {
    /// Prefer the selection as context. Forced on for modes that operate on
    /// a selection.
    pub use_selection: bool,
    /// On success, replace the document selection with the answer. Only
    /// honored when the context actually came from a selection.
    pub replace_selection: bool,
    /// On success, insert the answer at the cursor instead.
    pub insert_at_cursor: bool,
}

impl Default for SendOptions {
    fn default() -> Self {
        Self {
            use_selection: true,
            replace_selection: false,
            insert_at_cursor: false,
        }
    }
}

/// How a `send` call resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The assistant message was appended.
    Completed,
    /// The user aborted; nothing appended beyond the user entry, no error
    /// recorded.
    Cancelled,
}

struct SessionState {
    messages: Vec<Message>,
    loading: bool,
    error: Option<String>,
}

/// A client-held conversation with the relay.
///
/// The message log is append-only: `send` is the only operation that adds
/// entries (the user entry immediately, the assistant entry on success), and
/// the log is cleared only by an explicit `clear_messages`. One in-flight
/// request is tracked at a time; a `send` that starts while another is
/// pending replaces the stored cancellation token, so `cancel` always aborts
/// the most recent request.
pub struct ChatSession {
    host: Arc<dyn DocumentHost>,
    relay: RelayClient,
    settings: Mutex<Settings>,
    state: Mutex<SessionState>,
    cancel: Mutex<Option<CancellationToken>>,
}

impl ChatSession {
    pub fn new(host: Arc<dyn DocumentHost>, relay: RelayClient, settings: Settings) -> Self {
        Self {
            host,
            relay,
            settings: Mutex::new(settings),
            state: Mutex::new(SessionState {
                messages: Vec::new(),
                loading: false,
                error: None,
            }),
            cancel: Mutex::new(None),
        }
    }

    /// Snapshot of the conversation log.
    pub fn messages(&self) -> Vec<Message> {
        self.state_lock().messages.clone()
    }

    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.state_lock().loading
    }

    /// The current error banner, if any.
    pub fn error(&self) -> Option<String> {
        self.state_lock().error.clone()
    }

    /// Dismiss the error banner.
    pub fn clear_error(&self) {
        self.state_lock().error = None;
    }

    /// Drop the whole conversation log.
    pub fn clear_messages(&self) {
        self.state_lock().messages.clear();
    }

    pub fn settings(&self) -> Settings {
        self.settings_lock().clone()
    }

    pub fn set_settings(&self, settings: Settings) {
        *self.settings_lock() = settings;
    }

    /// Abort the in-flight request, if any, and clear the loading flag.
    ///
    /// The aborted `send` resolves as [`SendOutcome::Cancelled`] — it is not
    /// an error.
    pub fn cancel(&self) {
        let token = self.cancel_lock().take();
        if let Some(token) = token {
            token.cancel();
            self.state_lock().loading = false;
        }
    }

    /// Run one transform: pick context, build the payload, call the relay,
    /// append the reply, and optionally write it back into the document.
    ///
    /// Every failure except cancellation also sets the error banner.
    pub async fn send(
        &self,
        mode: Mode,
        user_prompt: &str,
        opts: SendOptions,
    ) -> Result<SendOutcome, SessionError> {
        {
            let mut state = self.state_lock();
            state.error = None;
            state.loading = true;
        }

        let token = CancellationToken::new();
        *self.cancel_lock() = Some(token.clone());

        let result = self.send_inner(mode, user_prompt, &opts, &token).await;

        self.state_lock().loading = false;
        *self.cancel_lock() = None;

        match result {
            Ok(()) => Ok(SendOutcome::Completed),
            Err(SessionError::Cancelled) => {
                info!(mode = %mode, "Request cancelled by user");
                Ok(SendOutcome::Cancelled)
            }
            Err(e) => {
                warn!(mode = %mode, error = %e, "Send failed");
                self.state_lock().error = Some(e.to_string());
                Err(e)
            }
        }
    }

    async fn send_inner(
        &self,
        mode: Mode,
        user_prompt: &str,
        opts: &SendOptions,
        token: &CancellationToken,
    ) -> Result<(), SessionError> {
        let settings = self.settings();

        // Selection-oriented modes always try the selection first.
        let use_selection = opts.use_selection || mode.requires_selection();
        let context =
            select_context(self.host.as_ref(), use_selection, settings.max_context_chars).await?;

        let info = format_context_info(&context.text, context.from_selection);
        let preview = if context.text.chars().count() > PREVIEW_CHARS {
            format!("{}...", truncate_chars(&context.text, PREVIEW_CHARS))
        } else {
            context.text.clone()
        };

        let content = if user_prompt.is_empty() {
            format!("[{mode}]")
        } else {
            user_prompt.to_string()
        };
        self.push_message(
            Message::user(content).with_context_info(format!("{info}\n«{preview}»")),
        );

        let payload = build_payload(mode, &context.text, user_prompt, &settings);

        let answer = tokio::select! {
            _ = token.cancelled() => return Err(SessionError::Cancelled),
            result = self.relay.send(&payload) => result?,
        };

        self.push_message(Message::assistant(answer.clone()));

        // Write back only when explicitly requested, and replacement only
        // when the context really was the selection.
        if opts.replace_selection && context.from_selection {
            self.host.replace_selection(&answer).await?;
        } else if opts.insert_at_cursor {
            self.host.insert_at_cursor(&answer).await?;
        }

        Ok(())
    }

    fn push_message(&self, message: Message) {
        self.state_lock().messages.push(message);
    }

    fn state_lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn settings_lock(&self) -> MutexGuard<'_, Settings> {
        self.settings.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn cancel_lock(&self) -> MutexGuard<'_, Option<CancellationToken>> {
        self.cancel.lock().unwrap_or_else(|e| e.into_inner())
    }
}
