//! Chat-completions client for rule commentary.
//!
//! One request per rendered chunk of flagged rows. The typed error enum
//! exists for logging; callers only see [`CommentaryClient::review_chunk`],
//! which degrades every failure to empty commentary.

use std::env;
use std::time::Duration;

use serde_json::json;
use thiserror::Error;
use tracing::{debug, warn};

/// Chat-completions endpoint used when `LISTING_AUDIT_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
/// Model used when `LISTING_AUDIT_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "gpt-4";

const API_KEY_VAR: &str = "LISTING_AUDIT_API_KEY";
const API_URL_VAR: &str = "LISTING_AUDIT_API_URL";
const MODEL_VAR: &str = "LISTING_AUDIT_MODEL";

const SYSTEM_PROMPT: &str = "You are a data validation assistant.";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Error type for commentary requests.
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("LISTING_AUDIT_API_KEY is not set")]
    MissingApiKey,
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("malformed completion response: {0}")]
    Parse(String),
}

/// Endpoint settings, normally read from `LISTING_AUDIT_*` variables.
#[derive(Debug, Clone)]
pub struct EnrichConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
}

impl EnrichConfig {
    /// Reads the endpoint settings from the environment. Only the API key
    /// is required; a blank key counts as missing.
    pub fn from_env() -> Result<Self, EnrichError> {
        let api_key = env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(EnrichError::MissingApiKey)?;
        let api_url = env::var(API_URL_VAR).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let model = env::var(MODEL_VAR).unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self {
            api_key,
            api_url,
            model,
        })
    }
}

/// Commentary API client (blocking).
#[derive(Clone)]
pub struct CommentaryClient {
    http: reqwest::blocking::Client,
    config: EnrichConfig,
}

impl CommentaryClient {
    /// Creates a client from environment configuration.
    pub fn from_env() -> Result<Self, EnrichError> {
        Self::new(EnrichConfig::from_env()?)
    }

    /// Creates a client with explicit settings.
    pub fn new(config: EnrichConfig) -> Result<Self, EnrichError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("listing-audit/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(EnrichError::ClientBuild)?;
        Ok(Self { http, config })
    }

    /// Asks the model to review one rendered chunk of flagged rows.
    ///
    /// Transport, HTTP, and parse failures are all isolated here: the error
    /// is logged and the caller gets an empty string, so an unreachable or
    /// misbehaving endpoint leaves the audit output untouched.
    pub fn review_chunk(&self, chunk: &str) -> String {
        match self.request_commentary(chunk) {
            Ok(commentary) => commentary,
            Err(error) => {
                warn!(%error, "commentary request failed; continuing without it");
                String::new()
            }
        }
    }

    fn request_commentary(&self, chunk: &str) -> Result<String, EnrichError> {
        let body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": user_prompt(chunk) },
            ],
        });

        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .map_err(EnrichError::Network)?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            return Err(EnrichError::Http { status, body });
        }

        let payload: serde_json::Value = response
            .json()
            .map_err(|e| EnrichError::Parse(e.to_string()))?;
        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| EnrichError::Parse("missing choices[0].message.content".into()))?;

        debug!(chars = content.len(), "received commentary");
        Ok(content.trim().to_string())
    }
}

fn user_prompt(chunk: &str) -> String {
    format!("Validate the following data chunk: {chunk}")
}
