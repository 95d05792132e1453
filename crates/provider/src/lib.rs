//! Model provider implementation for Redpen.
//!
//! One implementation: `OpenAiCompatProvider`, which covers OpenAI and any
//! endpoint exposing the `/chat/completions` shape. It implements the
//! `redpen_core::Provider` trait.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatProvider;
