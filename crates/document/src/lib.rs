//! Host document abstraction for Redpen.
//!
//! The live word-processor session is an external collaborator; this crate
//! defines the trait the rest of the system consumes, the context-selection
//! policy on top of it, and an in-memory implementation used by the CLI and
//! by tests.

pub mod buffer;
pub mod selector;

pub use buffer::BufferDocument;
pub use selector::{SelectedContext, select_context};

use async_trait::async_trait;
use redpen_core::DocumentError;

/// Operations consumed against a live document session.
///
/// All calls are asynchronous and fallible — the host on the other side is a
/// remote editing surface, not local state.
#[async_trait]
pub trait DocumentHost: Send + Sync {
    /// The currently selected text. Empty when the selection is collapsed
    /// to a cursor.
    async fn selected_text(&self) -> Result<String, DocumentError>;

    /// The full document body text.
    async fn body_text(&self) -> Result<String, DocumentError>;

    /// Whether a non-whitespace selection exists.
    async fn has_selection(&self) -> Result<bool, DocumentError>;

    /// Replace the current selection with `text`. With a collapsed
    /// selection this inserts at the cursor.
    async fn replace_selection(&self, text: &str) -> Result<(), DocumentError>;

    /// Insert `text` at the cursor (the end of the current selection).
    async fn insert_at_cursor(&self, text: &str) -> Result<(), DocumentError>;
}
