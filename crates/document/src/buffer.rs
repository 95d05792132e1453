//! In-memory document host.
//!
//! Backs the CLI's one-shot transforms and the test suite. The selection is
//! a byte range into the buffer; a collapsed range models a bare cursor,
//! matching how an editing surface reports an empty selection.

use std::ops::Range;
use std::sync::Mutex;

use async_trait::async_trait;
use redpen_core::DocumentError;

use crate::DocumentHost;

/// A document held in memory, with a cursor/selection.
pub struct BufferDocument {
    inner: Mutex<Inner>,
}

struct Inner {
    text: String,
    /// Byte range of the selection. Collapsed (`start == end`) means a bare
    /// cursor. Always lies on char boundaries.
    selection: Range<usize>,
}

impl BufferDocument {
    /// Create a document with the cursor at the end and nothing selected.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let end = text.len();
        Self {
            inner: Mutex::new(Inner {
                text,
                selection: end..end,
            }),
        }
    }

    /// Select the first occurrence of `needle`. Returns whether it was found.
    pub fn select_str(&self, needle: &str) -> bool {
        let mut inner = self.lock();
        match inner.text.find(needle) {
            Some(start) => {
                inner.selection = start..start + needle.len();
                true
            }
            None => false,
        }
    }

    /// Collapse the selection to a cursor at its end.
    pub fn clear_selection(&self) {
        let mut inner = self.lock();
        let end = inner.selection.end;
        inner.selection = end..end;
    }

    /// Snapshot of the full buffer.
    pub fn text(&self) -> String {
        self.lock().text.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl DocumentHost for BufferDocument {
    async fn selected_text(&self) -> Result<String, DocumentError> {
        let inner = self.lock();
        Ok(inner.text[inner.selection.clone()].to_string())
    }

    async fn body_text(&self) -> Result<String, DocumentError> {
        Ok(self.lock().text.clone())
    }

    async fn has_selection(&self) -> Result<bool, DocumentError> {
        let inner = self.lock();
        Ok(!inner.text[inner.selection.clone()].trim().is_empty())
    }

    async fn replace_selection(&self, text: &str) -> Result<(), DocumentError> {
        let mut inner = self.lock();
        let Range { start, end } = inner.selection.clone();
        inner.text.replace_range(start..end, text);
        // The replacement stays selected, as on a live editing surface.
        inner.selection = start..start + text.len();
        Ok(())
    }

    async fn insert_at_cursor(&self, text: &str) -> Result<(), DocumentError> {
        let mut inner = self.lock();
        let at = inner.selection.end;
        inner.text.insert_str(at, text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn new_document_has_no_selection() {
        let doc = BufferDocument::new("Пункт 1. Предмет договора.");
        assert!(!doc.has_selection().await.unwrap());
        assert_eq!(doc.selected_text().await.unwrap(), "");
        assert_eq!(doc.body_text().await.unwrap(), "Пункт 1. Предмет договора.");
    }

    #[tokio::test]
    async fn select_str_marks_the_substring() {
        let doc = BufferDocument::new("Пункт 1. Предмет договора.");
        assert!(doc.select_str("Предмет договора."));
        assert!(doc.has_selection().await.unwrap());
        assert_eq!(doc.selected_text().await.unwrap(), "Предмет договора.");
        assert!(!doc.select_str("нет такого текста"));
    }

    #[tokio::test]
    async fn replace_selection_splices_text() {
        let doc = BufferDocument::new("Срок поставки: 30 дней.");
        assert!(doc.select_str("30 дней"));
        doc.replace_selection("десять рабочих дней").await.unwrap();
        assert_eq!(doc.text(), "Срок поставки: десять рабочих дней.");
        // The new text is selected afterwards.
        assert_eq!(doc.selected_text().await.unwrap(), "десять рабочих дней");
    }

    #[tokio::test]
    async fn replace_with_collapsed_selection_inserts_at_cursor() {
        let doc = BufferDocument::new("Раздел 1.");
        doc.replace_selection(" Раздел 2.").await.unwrap();
        assert_eq!(doc.text(), "Раздел 1. Раздел 2.");
    }

    #[tokio::test]
    async fn insert_at_cursor_appends_after_selection() {
        let doc = BufferDocument::new("Раздел 1. Раздел 3.");
        assert!(doc.select_str("Раздел 1."));
        doc.insert_at_cursor(" Раздел 2.").await.unwrap();
        assert_eq!(doc.text(), "Раздел 1. Раздел 2. Раздел 3.");
        // The original selection is untouched.
        assert_eq!(doc.selected_text().await.unwrap(), "Раздел 1.");
    }

    #[tokio::test]
    async fn clear_selection_collapses_to_cursor() {
        let doc = BufferDocument::new("Текст документа");
        assert!(doc.select_str("Текст"));
        doc.clear_selection();
        assert!(!doc.has_selection().await.unwrap());
    }

    #[tokio::test]
    async fn whitespace_selection_does_not_count() {
        let doc = BufferDocument::new("слово   слово");
        assert!(doc.select_str("   "));
        assert!(!doc.has_selection().await.unwrap());
    }
}
