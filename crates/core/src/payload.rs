//! The outbound request payload sent from client to relay.

use serde::{Deserialize, Serialize};

use crate::mode::Mode;

/// The JSON body of `POST /api/llm`.
///
/// Constructed fresh per request by `redpen_prompts::build_payload`;
/// immutable once sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPayload {
    pub mode: Mode,

    /// Resolved system prompt for (mode, style flag)
    pub system_prompt: String,

    /// Document context, already truncated to the client's cap.
    /// May be an empty string.
    pub context: String,

    /// Free-text user instruction. May be blank — the relay substitutes a
    /// per-mode default.
    pub user_prompt: String,

    pub options: SamplingOptions,
}

/// Sampling options attached to a payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplingOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_field_names_are_camel_case() {
        let payload = RequestPayload {
            mode: Mode::Summarize,
            system_prompt: "sp".into(),
            context: "ctx".into(),
            user_prompt: "up".into(),
            options: SamplingOptions {
                temperature: 0.2,
                max_tokens: 1000,
            },
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["mode"], "summarize");
        assert!(json.get("systemPrompt").is_some());
        assert!(json.get("userPrompt").is_some());
        assert!(json["options"].get("maxTokens").is_some());
    }
}
