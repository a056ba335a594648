//! Stride AI Layer
//!
//! HTTP client for an Ollama-compatible chat endpoint plus parsing of
//! model replies into suggestion lists. Deliberately thin: prompts in,
//! text out; persistence and orchestration live in stride-core.

pub mod client;
pub mod suggest;

pub use client::{AiClient, ChatMessage, DEFAULT_AI_URL, DEFAULT_MODEL};
pub use suggest::parse_suggestions;
