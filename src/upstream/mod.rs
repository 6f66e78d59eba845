use axum::async_trait;
use axum::http::StatusCode;
use thiserror::Error;

use crate::upstream::prompt::PromptPair;

pub mod extract;
pub mod openai;
pub mod prompt;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream responded with status {status}")]
    Rejected { status: StatusCode, body: String },

    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl UpstreamError {
    /// Text relayed to the caller as the error detail.
    pub fn detail(&self) -> String {
        match self {
            UpstreamError::Rejected { body, .. } => body.clone(),
            UpstreamError::Transport(err) => err.to_string(),
        }
    }
}

/// A completion service that turns a prompt pair into generated text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Submits the prompt and returns the generated text, empty if none could be found.
    async fn complete(&self, prompt: &PromptPair) -> Result<String, UpstreamError>;
}
