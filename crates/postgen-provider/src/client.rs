//! HTTP client for an OpenAI-compatible text-generation provider.
//!
//! One generation is one non-streaming `POST {base}/chat/completions` round
//! trip. There is no retry here; callers decide what a failure means.

use std::time::Duration;

use postgen_core::{Prompt, MAX_OUTPUT_TOKENS, TEMPERATURE};
use reqwest::{Client, Url};

use crate::error::ProviderError;
use crate::types::{ChatMessage, ChatRequest, ChatResponse};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/";

/// Longest slice of an error body kept in [`ProviderError::UnexpectedStatus`].
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Client for the generation provider.
///
/// Use [`ProviderClient::new`] for the hosted API or
/// [`ProviderClient::with_base_url`] for a self-hosted endpoint or a mock
/// server in tests.
pub struct ProviderClient {
    client: Client,
    api_key: String,
    model: String,
    completions_url: Url,
}

impl ProviderClient {
    /// Creates a client pointed at the hosted `OpenAI` API.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client for any OpenAI-compatible base URL, e.g.
    /// `http://localhost:8080/v1`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ProviderError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("postgen/0.1")
            .build()?;

        // Exactly one trailing slash, so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let completions_url = Url::parse(&normalised)
            .and_then(|base| base.join("chat/completions"))
            .map_err(|e| ProviderError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            completions_url,
        })
    }

    #[must_use]
    pub fn completions_url(&self) -> &Url {
        &self.completions_url
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Runs one generation and returns the model's text verbatim.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Http`] on network failure.
    /// - [`ProviderError::UnexpectedStatus`] on a non-2xx response.
    /// - [`ProviderError::Deserialize`] if the body is not a chat completion.
    /// - [`ProviderError::EmptyCompletion`] if no message content came back.
    pub async fn generate(&self, prompt: &Prompt) -> Result<String, ProviderError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_OUTPUT_TOKENS,
        };

        tracing::debug!(
            model = %self.model,
            platform = %prompt.platform,
            "sending chat completion request"
        );

        let response = self
            .client
            .post(self.completions_url.clone())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ProviderError::UnexpectedStatus {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let completion: ChatResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::Deserialize {
                context: format!("chat completion from {}", self.completions_url),
                source: e,
            })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ProviderError::EmptyCompletion)
    }
}
