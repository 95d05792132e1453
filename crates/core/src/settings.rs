//! User-facing settings.
//!
//! Settings are read at request time and persisted between sessions by
//! `redpen-session`. Partial or corrupt stored data falls back to these
//! defaults field by field.

use serde::{Deserialize, Serialize};

/// Per-user settings for request construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Model identifier sent to the relay's provider
    pub model: String,

    /// Maximum document context size, in characters
    pub max_context_chars: usize,

    /// Use the stricter legal-domain system prompt variants
    pub legal_style: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".into(),
            max_context_chars: 8000,
            legal_style: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.model, "gpt-4o-mini");
        assert_eq!(s.max_context_chars, 8000);
        assert!(s.legal_style);
    }

    #[test]
    fn partial_json_merges_over_defaults() {
        let s: Settings = serde_json::from_str(r#"{"maxContextChars": 4000}"#).unwrap();
        assert_eq!(s.max_context_chars, 4000);
        assert_eq!(s.model, "gpt-4o-mini");
        assert!(s.legal_style);
    }

    #[test]
    fn unknown_fields_ignored() {
        let s: Settings =
            serde_json::from_str(r#"{"legalStyle": false, "theme": "dark"}"#).unwrap();
        assert!(!s.legal_style);
    }
}
