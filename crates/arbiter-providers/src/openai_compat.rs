use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Instant;

use arbiter_core::{
    BackendInvoker, BackendRef, Error, InvocationReply, InvocationRequest, Result, TokenUsage,
};

/// Default endpoint, overridable per deployment.
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// Env var key for the API key.
const ENV_API_KEY: &str = "ARBITER_API_KEY";

/// Invoker for any OpenAI-compatible chat-completions endpoint.
///
/// The backend reference's id is sent as the model name; the provider part
/// is informational only, since the endpoint is fixed per invoker instance.
pub struct OpenAiCompatInvoker {
    /// HTTP client for API requests.
    client: Client,
    /// Base URL of the chat-completions API.
    base_url: String,
    /// Bearer token for the endpoint.
    api_key: String,
}

impl OpenAiCompatInvoker {
    /// Creates a new invoker from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the `ARBITER_API_KEY` environment variable is
    /// not set.
    pub fn new() -> Result<Self> {
        let api_key =
            env::var(ENV_API_KEY).map_err(|_| Error::Config(format!("{ENV_API_KEY} not set")))?;
        Self::with_api_key(api_key)
    }

    /// Creates a new invoker with the given API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the provided API key is empty.
    pub fn with_api_key(api_key: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::MissingApiKey(ENV_API_KEY.to_owned()));
        }

        Ok(Self {
            client: Client::default(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key,
        })
    }

    /// Sets the endpoint base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

/// Request payload sent to the chat-completions API.
#[derive(Debug, Serialize)]
struct ChatRequest {
    /// Model identifier understood by the endpoint.
    model: String,
    /// Messages that form the conversation context for the request.
    messages: Vec<ChatMessage>,
    /// Sampling temperature controlling response randomness.
    temperature: f32,
    /// Maximum number of tokens allowed in the completion.
    max_tokens: u32,
}

/// Message delivered to the API.
#[derive(Debug, Serialize)]
struct ChatMessage {
    /// Role of the message author.
    role: String,
    /// Textual content of the message.
    content: String,
}

/// Response payload returned by the endpoint.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    /// List of candidate completions.
    choices: Vec<ChatChoice>,
    /// Token accounting information for the request.
    usage: Option<ChatUsage>,
}

/// A single completion choice.
#[derive(Debug, Deserialize)]
struct ChatChoice {
    /// Message generated for the choice.
    message: ChatResponseMessage,
}

/// Response message containing the generated text.
#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    /// Generated text content.
    content: String,
}

/// Token usage metrics for a response.
#[derive(Debug, Deserialize)]
struct ChatUsage {
    /// Number of tokens in the prompt portion of the request.
    prompt_tokens: u64,
    /// Number of tokens produced in the completion.
    completion_tokens: u64,
}

#[async_trait]
impl BackendInvoker for OpenAiCompatInvoker {
    fn name(&self) -> &'static str {
        "openai-compat"
    }

    async fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn invoke(
        &self,
        backend: &BackendRef,
        request: &InvocationRequest,
    ) -> Result<InvocationReply> {
        let start = Instant::now();

        let payload = ChatRequest {
            model: backend.id.clone(),
            messages: vec![ChatMessage {
                role: "user".to_owned(),
                content: request.prompt.clone(),
            }],
            temperature: request.temperature,
            max_tokens: request.max_output_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|err| Error::Invoker(format!("request to {backend} failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_owned());
            return Err(Error::Invoker(format!(
                "backend {backend} returned {status}: {error_text}"
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|err| Error::InvalidResponse(format!("failed to parse response: {err}")))?;

        let latency_ms = start.elapsed().as_millis() as u64;

        let text = chat_response
            .choices
            .first()
            .map(|choice| choice.message.content.clone())
            .ok_or_else(|| Error::InvalidResponse(format!("no completion from {backend}")))?;

        let tokens_used = chat_response
            .usage
            .map(|usage| TokenUsage {
                input: usage.prompt_tokens,
                output: usage.completion_tokens,
            })
            .unwrap_or_default();

        Ok(InvocationReply {
            text,
            tokens_used,
            latency_ms,
        })
    }
}
