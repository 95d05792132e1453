//! End-to-end tests for the Redpen pipeline.
//!
//! These exercise the full path: document selection → payload construction →
//! a real relay server on an ephemeral port → a scripted provider → the
//! session log → optional write-back into the document.

use std::sync::{Arc, Mutex};

use redpen_core::error::ProviderError;
use redpen_core::provider::{ChatRole, Provider, ProviderRequest, ProviderResponse};
use redpen_core::{Mode, Role, Settings};
use redpen_document::BufferDocument;
use redpen_prompts::system_prompt;
use redpen_relay::{RelayState, build_router};
use redpen_session::{ChatSession, RelayClient, SendOptions};

// ── Scripted provider ────────────────────────────────────────────────────

/// Returns a fixed answer and records every request it receives.
struct ScriptedProvider {
    answer: String,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    fn new(answer: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: answer.into(),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "e2e_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        self.requests.lock().unwrap().push(request);
        Ok(ProviderResponse {
            content: self.answer.clone(),
            model: "mock".into(),
            usage: None,
        })
    }
}

async fn spawn_relay(provider: Arc<dyn Provider>, max_context_chars: usize) -> String {
    let state = Arc::new(RelayState {
        provider,
        model: "gpt-4o-mini".into(),
        max_context_chars,
    });
    let app = build_router(state, "https://localhost:3000");
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

// ── Scenarios ────────────────────────────────────────────────────────────

const CLAUSE: &str = "Party A shall deliver goods within 30 days.";

/// Compress a selected clause in legal style: the provider must see the
/// legal compress prompt and the selection verbatim, the answer must land in
/// the log, and the document must stay untouched.
#[tokio::test]
async fn compress_selection_legal_style() {
    let provider = ScriptedProvider::new("Party A delivers within 30 days.");
    let base_url = spawn_relay(provider.clone(), 8000).await;

    let doc = Arc::new(BufferDocument::new(format!("Preamble. {CLAUSE} Closing.")));
    assert!(doc.select_str(CLAUSE));

    let session = ChatSession::new(doc.clone(), RelayClient::new(base_url), Settings::default());

    session
        .send(Mode::Compress, "", SendOptions::default())
        .await
        .unwrap();

    // The provider saw the legal compress variant and the clause verbatim.
    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    let messages = &requests[0].messages;
    assert_eq!(messages[0].role, ChatRole::System);
    assert_eq!(messages[0].content, system_prompt(Mode::Compress, true));
    assert_eq!(messages[1].role, ChatRole::System);
    assert_eq!(messages[1].content, format!("Контекст документа:\n\n{CLAUSE}"));
    // Blank user prompt fell back to the canned compress instruction.
    assert_eq!(messages[2].role, ChatRole::User);
    assert_eq!(messages[2].content, "Сократи текст");
    assert_eq!(requests[0].temperature, 0.2);
    assert_eq!(requests[0].max_tokens, 2000);

    // The answer became an assistant message.
    let log = session.messages();
    assert_eq!(log.len(), 2);
    assert_eq!(log[1].role, Role::Assistant);
    assert_eq!(log[1].content, "Party A delivers within 30 days.");

    // No replacement was requested: the document is unchanged.
    assert_eq!(doc.text(), format!("Preamble. {CLAUSE} Closing."));
}

/// Same scenario, but with replacement requested: the selection gives way to
/// the answer and the rest of the document survives.
#[tokio::test]
async fn compress_selection_with_replacement() {
    let provider = ScriptedProvider::new("Party A delivers within 30 days.");
    let base_url = spawn_relay(provider.clone(), 8000).await;

    let doc = Arc::new(BufferDocument::new(format!("Preamble. {CLAUSE} Closing.")));
    assert!(doc.select_str(CLAUSE));

    let session = ChatSession::new(doc.clone(), RelayClient::new(base_url), Settings::default());

    session
        .send(
            Mode::Compress,
            "",
            SendOptions {
                use_selection: true,
                replace_selection: true,
                insert_at_cursor: false,
            },
        )
        .await
        .unwrap();

    assert_eq!(
        doc.text(),
        "Preamble. Party A delivers within 30 days. Closing."
    );
}

/// Plain-style chat over the document body: the plain chat prompt is used
/// and the whole body rides along as context.
#[tokio::test]
async fn chat_over_document_plain_style() {
    let provider = ScriptedProvider::new("Срок поставки — 30 дней.");
    let base_url = spawn_relay(provider.clone(), 8000).await;

    let doc = Arc::new(BufferDocument::new("Поставка в течение 30 дней."));
    let settings = Settings {
        legal_style: false,
        ..Settings::default()
    };
    let session = ChatSession::new(doc, RelayClient::new(base_url), settings);

    session
        .send(Mode::Chat, "Какой срок поставки?", SendOptions::default())
        .await
        .unwrap();

    let requests = provider.requests();
    let messages = &requests[0].messages;
    assert_eq!(messages[0].content, system_prompt(Mode::Chat, false));
    assert_eq!(
        messages[1].content,
        "Контекст документа:\n\nПоставка в течение 30 дней."
    );
    assert_eq!(messages[2].content, "Какой срок поставки?");
    assert_eq!(requests[0].temperature, 0.3);
}

/// The client cap and the server cap are enforced independently; the
/// stricter server cap wins.
#[tokio::test]
async fn server_cap_wins_when_stricter() {
    let provider = ScriptedProvider::new("ок");
    let base_url = spawn_relay(provider.clone(), 50).await;

    let doc = Arc::new(BufferDocument::new("ф".repeat(1000)));
    let session = ChatSession::new(doc, RelayClient::new(base_url), Settings::default());

    session
        .send(Mode::Summarize, "резюме", SendOptions::default())
        .await
        .unwrap();

    let requests = provider.requests();
    let context = requests[0].messages[1]
        .content
        .strip_prefix("Контекст документа:\n\n")
        .unwrap()
        .to_string();
    assert_eq!(context.chars().count(), 50);
    assert_eq!(requests[0].max_tokens, 1000);
}

/// A selection-oriented mode grabs the selection even when the caller asked
/// for auto context.
#[tokio::test]
async fn rewrite_forces_selection_context() {
    let provider = ScriptedProvider::new("переписано");
    let base_url = spawn_relay(provider.clone(), 8000).await;

    let doc = Arc::new(BufferDocument::new("Первый абзац. Второй абзац."));
    assert!(doc.select_str("Второй абзац."));

    let session = ChatSession::new(doc, RelayClient::new(base_url), Settings::default());

    session
        .send(
            Mode::Rewrite,
            "перепиши",
            SendOptions {
                use_selection: false,
                replace_selection: false,
                insert_at_cursor: false,
            },
        )
        .await
        .unwrap();

    let requests = provider.requests();
    assert_eq!(
        requests[0].messages[1].content,
        "Контекст документа:\n\nВторой абзац."
    );
}
