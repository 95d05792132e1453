//! Transform modes — the fixed set of operations a user can invoke.

use serde::{Deserialize, Serialize};

/// The text-transform operation category.
///
/// Immutable per request. The mode determines which system prompt and which
/// sampling defaults apply (see `redpen-prompts`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Free-form Q&A grounded in the document text
    Chat,
    /// Rephrase the selected text, preserving meaning
    Rewrite,
    /// Shorten the selected text to 30-50% of the original
    Compress,
    /// Elaborate on the selected text
    Expand,
    /// Produce a structured summary
    Summarize,
    /// Draft a new document section from a description
    GenerateSection,
}

impl Mode {
    /// All modes, in UI order.
    pub const ALL: [Mode; 6] = [
        Mode::Chat,
        Mode::Rewrite,
        Mode::Compress,
        Mode::Expand,
        Mode::Summarize,
        Mode::GenerateSection,
    ];

    /// The wire identifier for this mode (matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Chat => "chat",
            Mode::Rewrite => "rewrite",
            Mode::Compress => "compress",
            Mode::Expand => "expand",
            Mode::Summarize => "summarize",
            Mode::GenerateSection => "generate_section",
        }
    }

    /// Human-readable label shown in the task pane.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Chat => "Chat по документу",
            Mode::Rewrite => "Переформулировать",
            Mode::Compress => "Сжать",
            Mode::Expand => "Расширить",
            Mode::Summarize => "Суммаризировать",
            Mode::GenerateSection => "Сгенерировать раздел",
        }
    }

    /// Whether this mode semantically operates on a selection.
    ///
    /// These modes always attempt selection-based context first, regardless
    /// of what the caller asked for.
    pub fn requires_selection(&self) -> bool {
        matches!(self, Mode::Rewrite | Mode::Compress | Mode::Expand)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "chat" => Ok(Mode::Chat),
            "rewrite" => Ok(Mode::Rewrite),
            "compress" => Ok(Mode::Compress),
            "expand" => Ok(Mode::Expand),
            "summarize" => Ok(Mode::Summarize),
            "generate_section" => Ok(Mode::GenerateSection),
            other => Err(format!("Unknown mode: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&Mode::GenerateSection).unwrap();
        assert_eq!(json, "\"generate_section\"");
        let parsed: Mode = serde_json::from_str("\"compress\"").unwrap();
        assert_eq!(parsed, Mode::Compress);
    }

    #[test]
    fn selection_requirement() {
        assert!(Mode::Rewrite.requires_selection());
        assert!(Mode::Compress.requires_selection());
        assert!(Mode::Expand.requires_selection());
        assert!(!Mode::Chat.requires_selection());
        assert!(!Mode::Summarize.requires_selection());
        assert!(!Mode::GenerateSection.requires_selection());
    }

    #[test]
    fn roundtrip_from_str() {
        for mode in Mode::ALL {
            let parsed: Mode = mode.as_str().parse().unwrap();
            assert_eq!(parsed, mode);
        }
        assert!("paraphrase".parse::<Mode>().is_err());
    }

    #[test]
    fn labels_are_distinct() {
        let labels: std::collections::HashSet<_> =
            Mode::ALL.iter().map(|m| m.label()).collect();
        assert_eq!(labels.len(), Mode::ALL.len());
    }
}
