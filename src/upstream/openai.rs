use axum::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::upstream::extract::extract_output_text;
use crate::upstream::prompt::PromptPair;
use crate::upstream::{CompletionProvider, UpstreamError};

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/responses";
pub const MODEL: &str = "gpt-4.1-mini";

#[derive(Serialize, Debug)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: [InputMessage<'a>; 2],
    text: TextOptions,
}

#[derive(Serialize, Debug)]
struct InputMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize, Debug)]
struct TextOptions {
    format: TextFormat,
}

#[derive(Serialize, Debug)]
struct TextFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

impl<'a> ResponsesRequest<'a> {
    fn new(prompt: &'a PromptPair) -> Self {
        ResponsesRequest {
            model: MODEL,
            input: [
                InputMessage {
                    role: "system",
                    content: &prompt.system,
                },
                InputMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            text: TextOptions {
                format: TextFormat {
                    kind: "json_object",
                },
            },
        }
    }
}

/// Client for the OpenAI Responses API.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    endpoint: Url,
}

impl OpenAiClient {
    pub fn new(client: Client, api_key: String, endpoint: Url) -> Self {
        Self {
            client,
            api_key,
            endpoint,
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    #[tracing::instrument(level = "info", skip_all, fields(endpoint = %self.endpoint, model = MODEL))]
    async fn complete(&self, prompt: &PromptPair) -> Result<String, UpstreamError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&ResponsesRequest::new(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Rejected { status, body });
        }

        // Shape drift degrades into an empty extraction rather than an error
        let body = response.text().await?;
        let payload = serde_json::from_str::<Value>(&body).unwrap_or(Value::Null);
        let text = extract_output_text(&payload);
        debug!("Extracted {} characters of model output", text.chars().count());
        Ok(text)
    }
}
