//! HTTP relay for Redpen.
//!
//! Exposes the two endpoints the add-in client talks to:
//!
//! - `POST /api/llm`    — validate a request payload, assemble the chat
//!   exchange, call the model provider, return `{answer}`
//! - `GET  /api/health` — report status, model, and the server context cap
//!
//! The relay is stateless per request: no conversation history, no response
//! caching. The provider client is built once at startup and injected into
//! the handlers through shared state.
//!
//! Built on Axum.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, StatusCode};
use axum::response::Json;
use axum::routing::{get, post};
use axum::{Router, extract::State};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use redpen_config::AppConfig;
use redpen_core::provider::{ChatMessage, Provider, ProviderRequest};
use redpen_core::text::truncate_chars;
use redpen_prompts::default_user_prompt;
use redpen_provider::OpenAiCompatProvider;

/// Fixed label prepended to the document context system message.
const CONTEXT_LABEL: &str = "Контекст документа:";

/// Default temperature when the client sent none.
const DEFAULT_TEMPERATURE: f32 = 0.3;
/// Default token budget when the client sent none.
const DEFAULT_MAX_TOKENS: u32 = 2000;

/// Shared application state for the relay.
///
/// Owned by the process, created once at startup. Handlers receive it via
/// axum `State` — there is no ambient/global provider client.
pub struct RelayState {
    pub provider: Arc<dyn Provider>,
    pub model: String,
    /// Server-side context cap. Independent from the client's cap; re-applied
    /// on every request so the stricter of the two wins.
    pub max_context_chars: usize,
}

pub type SharedState = Arc<RelayState>;

/// Build the Axum router with all relay routes.
pub fn build_router(state: SharedState, allowed_origin: &str) -> Router {
    let origin = allowed_origin.parse::<HeaderValue>().unwrap_or_else(|_| {
        warn!(origin = %allowed_origin, "Invalid allowed_origin, falling back to default");
        HeaderValue::from_static("https://localhost:3000")
    });

    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::exact(origin))
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .route("/api/llm", post(llm_handler))
        .route("/api/health", get(health_handler))
        .layer(DefaultBodyLimit::max(1024 * 1024)) // 1 MB body limit
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the relay HTTP server.
///
/// Fails fast when no API key is configured.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    config.require_api_key()?;

    let provider: Arc<dyn Provider> = Arc::new(OpenAiCompatProvider::from_config(&config)?);
    let state = Arc::new(RelayState {
        provider,
        model: config.model.clone(),
        max_context_chars: config.max_context_chars,
    });

    let app = build_router(state, &config.relay.allowed_origin);
    let addr = format!("{}:{}", config.relay.host, config.relay.port);

    info!(
        addr = %addr,
        model = %config.model,
        max_context_chars = config.max_context_chars,
        "Relay starting"
    );
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Request / Response types ---

/// Incoming `POST /api/llm` body. Every field is optional at the parse layer
/// so validation can answer with a precise 400 instead of a generic
/// deserialization error.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LlmRequest {
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    system_prompt: Option<String>,
    #[serde(default)]
    context: Option<String>,
    #[serde(default)]
    user_prompt: Option<String>,
    #[serde(default)]
    options: Option<OptionsDto>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct OptionsDto {
    #[serde(default)]
    temperature: Option<f32>,
    #[serde(default)]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct AnswerResponse {
    answer: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    model: String,
    max_context_chars: usize,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn missing_field(field: &str) -> HandlerError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: format!("Missing required field: {field}"),
        }),
    )
}

// --- Handlers ---

async fn health_handler(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model: state.model.clone(),
        max_context_chars: state.max_context_chars,
    })
}

async fn llm_handler(
    State(state): State<SharedState>,
    Json(payload): Json<LlmRequest>,
) -> Result<Json<AnswerResponse>, HandlerError> {
    // Validation order is fixed; the first failing check short-circuits.
    let mode = match payload.mode.as_deref() {
        Some(m) if !m.is_empty() => m.to_string(),
        _ => return Err(missing_field("mode")),
    };
    let system_prompt = match payload.system_prompt {
        Some(sp) if !sp.is_empty() => sp,
        _ => return Err(missing_field("systemPrompt")),
    };
    // Context must be present but may be an empty string.
    let Some(context) = payload.context else {
        return Err(missing_field("context"));
    };

    let options = payload.options.unwrap_or_default();
    let temperature = options.temperature.unwrap_or(DEFAULT_TEMPERATURE);
    let max_tokens = options.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS);

    // Re-apply the server's own cap regardless of what the client enforced.
    let context = {
        let capped = truncate_chars(&context, state.max_context_chars);
        if capped.len() < context.len() {
            info!(
                cap = state.max_context_chars,
                "Context truncated to server cap"
            );
        }
        capped.to_string()
    };

    info!(
        mode = %mode,
        context_chars = context.chars().count(),
        model = %state.model,
        "Processing transform request"
    );

    let mut messages = vec![ChatMessage::system(system_prompt)];

    // The document context rides in its own system message, behind a fixed
    // label. Blank context is simply omitted.
    if !context.trim().is_empty() {
        messages.push(ChatMessage::system(format!("{CONTEXT_LABEL}\n\n{context}")));
    }

    let user_prompt = payload.user_prompt.unwrap_or_default();
    let user_content = if user_prompt.trim().is_empty() {
        default_user_prompt(&mode).to_string()
    } else {
        user_prompt
    };
    messages.push(ChatMessage::user(user_content));

    let request = ProviderRequest {
        model: state.model.clone(),
        messages,
        temperature,
        max_tokens,
    };

    match state.provider.complete(request).await {
        Ok(response) => {
            info!(chars = response.content.chars().count(), "Answer relayed");
            Ok(Json(AnswerResponse {
                answer: response.content,
            }))
        }
        Err(e) => {
            error!(error = %e, "Provider call failed");
            let message = e.to_string();
            let status = if message.contains("API key") {
                StatusCode::UNAUTHORIZED
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            Err((status, Json(ErrorResponse { error: message })))
        }
    }
}
