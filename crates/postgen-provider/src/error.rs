use thiserror::Error;

/// Errors returned by the generation provider client.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network, TLS, or body-read failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("provider returned HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The response body did not match the chat completion shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The completion carried no choice or no message content.
    #[error("provider returned an empty completion")]
    EmptyCompletion,

    #[error("invalid provider base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
