//! Context selection policy.
//!
//! Given a requested source (selection vs. auto) and a character cap, pick
//! the document text to ground the model with. Truncation takes a
//! fixed-length prefix, never a smart excerpt.

use redpen_core::DocumentError;
use redpen_core::text::truncate_chars;
use tracing::debug;

use crate::DocumentHost;

/// The selected context and where it came from.
///
/// The source flag drives the user-message annotation and the
/// replace-selection decision downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedContext {
    pub text: String,
    pub from_selection: bool,
}

/// Obtain document context, bounded by `max_chars`.
///
/// When `use_selection` is set and a non-whitespace selection exists, the
/// selection wins. Otherwise the document body is used. Either way the
/// result is prefix-truncated to the cap; a document that yields only
/// whitespace is an error.
pub async fn select_context(
    host: &dyn DocumentHost,
    use_selection: bool,
    max_chars: usize,
) -> Result<SelectedContext, DocumentError> {
    if use_selection && host.has_selection().await.unwrap_or(false) {
        let text = host.selected_text().await?;
        let text = truncate_chars(&text, max_chars);
        if !text.trim().is_empty() {
            debug!(chars = text.chars().count(), "Using selection as context");
            return Ok(SelectedContext {
                text: text.to_string(),
                from_selection: true,
            });
        }
    }

    let body = host.body_text().await?;
    let text = truncate_chars(&body, max_chars);
    if text.trim().is_empty() {
        return Err(DocumentError::NoContent);
    }

    debug!(chars = text.chars().count(), "Using document body as context");
    Ok(SelectedContext {
        text: text.to_string(),
        from_selection: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BufferDocument;

    #[tokio::test]
    async fn selection_wins_when_requested() {
        let doc = BufferDocument::new("Договор поставки. Стороны обязуются.");
        assert!(doc.select_str("Стороны обязуются."));

        let ctx = select_context(&doc, true, 8000).await.unwrap();
        assert!(ctx.from_selection);
        assert_eq!(ctx.text, "Стороны обязуются.");
    }

    #[tokio::test]
    async fn body_used_when_selection_not_requested() {
        let doc = BufferDocument::new("Договор поставки.");
        assert!(doc.select_str("поставки"));

        let ctx = select_context(&doc, false, 8000).await.unwrap();
        assert!(!ctx.from_selection);
        assert_eq!(ctx.text, "Договор поставки.");
    }

    #[tokio::test]
    async fn falls_back_to_body_without_selection() {
        let doc = BufferDocument::new("Договор поставки.");
        let ctx = select_context(&doc, true, 8000).await.unwrap();
        assert!(!ctx.from_selection);
        assert_eq!(ctx.text, "Договор поставки.");
    }

    #[tokio::test]
    async fn both_paths_respect_the_cap() {
        let doc = BufferDocument::new("а".repeat(100));
        let ctx = select_context(&doc, false, 10).await.unwrap();
        assert_eq!(ctx.text.chars().count(), 10);

        let doc = BufferDocument::new("б".repeat(100));
        assert!(doc.select_str(&"б".repeat(100)));
        let ctx = select_context(&doc, true, 10).await.unwrap();
        assert!(ctx.from_selection);
        assert_eq!(ctx.text.chars().count(), 10);
    }

    #[tokio::test]
    async fn whitespace_only_document_is_no_content() {
        let doc = BufferDocument::new("   \n\t  ");
        let err = select_context(&doc, true, 8000).await.unwrap_err();
        assert!(matches!(err, DocumentError::NoContent));
    }

    #[tokio::test]
    async fn empty_document_is_no_content() {
        let doc = BufferDocument::new("");
        let err = select_context(&doc, false, 8000).await.unwrap_err();
        assert!(matches!(err, DocumentError::NoContent));
    }
}
