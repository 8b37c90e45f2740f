//! Optional LLM commentary for flagged listings.
//!
//! Blocking HTTP client against an OpenAI-compatible chat-completions
//! endpoint (no Tokio runtime required). Commentary is strictly advisory:
//! every failure collapses to an empty string at the public boundary, so
//! enrichment can never fail an audit run.

mod client;

pub use client::{CommentaryClient, DEFAULT_API_URL, DEFAULT_MODEL, EnrichConfig, EnrichError};
