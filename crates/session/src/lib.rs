//! Client-side session layer for Redpen.
//!
//! Owns the append-only conversation log, orchestrates a `send` from context
//! selection through the relay call to the assistant reply, tracks the
//! single in-flight request with a cooperative cancellation token, and
//! persists user settings between sessions.

pub mod client;
pub mod session;
pub mod settings_store;

pub use client::RelayClient;
pub use session::{ChatSession, SendOptions, SendOutcome};
pub use settings_store::{load_settings, save_settings};
