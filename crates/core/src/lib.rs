//! # Redpen Core
//!
//! Domain types, traits, and error definitions for the Redpen document
//! assistant. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The model provider is defined as a trait here; implementations live in
//! their own crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod message;
pub mod mode;
pub mod payload;
pub mod provider;
pub mod settings;
pub mod text;

// Re-export key types at crate root for ergonomics
pub use error::{DocumentError, Error, ProviderError, Result, SessionError};
pub use message::{Message, Role};
pub use mode::Mode;
pub use payload::{RequestPayload, SamplingOptions};
pub use provider::{ChatMessage, ChatRole, Provider, ProviderRequest, ProviderResponse, Usage};
pub use settings::Settings;
pub use text::truncate_chars;
