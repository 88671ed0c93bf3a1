//! Post generation handler.
//!
//! The session check happens in middleware, so no body byte is read for an
//! unauthenticated caller. Everything after that is one pass: parse the body,
//! build the prompt, call the provider once, and interpret its text.

use axum::{body::Bytes, extract::State, Extension, Json};
use postgen_core::{
    parse_generated_posts, CoreError, GeneratedPosts, GenerationOutcome, GenerationRequest,
    KnowledgeBase, Platform,
};
use postgen_provider::{ProviderClient, ProviderError};
use serde::Deserialize;
use thiserror::Error;

use crate::middleware::{RequestId, Session};

use super::{ApiError, AppState};

/// Request body as sent by clients. Every field is optional here so absence
/// can be reported as `MissingFields` instead of a deserialization error.
#[derive(Debug, Deserialize)]
struct GenerateRequestBody {
    platform: Option<String>,
    #[serde(rename = "knowledgeBase")]
    knowledge_base: Option<serde_json::Value>,
}

/// Failures of a single generation request. All are terminal.
#[derive(Debug, Error)]
pub(super) enum GenerateError {
    #[error("platform or knowledgeBase missing from request")]
    MissingFields,

    #[error("malformed request body: {0}")]
    MalformedRequest(String),

    #[error("invalid platform '{0}'")]
    InvalidPlatform(String),

    #[error(transparent)]
    InvalidKnowledgeBase(CoreError),

    #[error("generation provider failed: {0}")]
    GenerationFailed(#[from] ProviderError),

    #[error("provider output is not a posts object: {reason}")]
    ParseFailed { raw: String, reason: String },
}

impl GenerateError {
    /// Log the failure and map it to the user-safe payload.
    fn into_api_error(self, request_id: &str) -> ApiError {
        match self {
            GenerateError::MissingFields => {
                tracing::warn!(request_id, error = %self, "rejected generation request");
                ApiError::new("bad_request", "Missing required fields")
            }
            GenerateError::MalformedRequest(_) => {
                tracing::warn!(request_id, error = %self, "rejected generation request");
                ApiError::new("bad_request", "Invalid request body")
            }
            GenerateError::InvalidPlatform(_) => {
                tracing::warn!(request_id, error = %self, "rejected generation request");
                ApiError::new("bad_request", "Invalid platform")
            }
            GenerateError::InvalidKnowledgeBase(_) => {
                tracing::warn!(request_id, error = %self, "rejected generation request");
                ApiError::new(
                    "validation_error",
                    "Knowledge base must contain at least one topic",
                )
            }
            GenerateError::GenerationFailed(ref e) => {
                tracing::error!(request_id, error = %e, "error generating posts");
                ApiError::new("generation_failed", "Failed to generate posts")
            }
            GenerateError::ParseFailed { raw, reason } => {
                tracing::error!(
                    request_id,
                    error = %reason,
                    raw_len = raw.len(),
                    "error parsing provider response"
                );
                ApiError::new("parse_failed", "Failed to parse AI response").with_posts(vec![raw])
            }
        }
    }
}

/// Turn raw body bytes into a typed request.
///
/// Platform is checked before the knowledge base content is looked at.
fn parse_request(body: &[u8]) -> Result<GenerationRequest, GenerateError> {
    let raw: GenerateRequestBody = serde_json::from_slice(body)
        .map_err(|e| GenerateError::MalformedRequest(e.to_string()))?;

    let (Some(platform), Some(knowledge_base)) = (
        raw.platform.filter(|p| !p.is_empty()),
        raw.knowledge_base.filter(|kb| !kb.is_null()),
    ) else {
        return Err(GenerateError::MissingFields);
    };

    let platform = platform.parse::<Platform>().map_err(|e| match e {
        CoreError::InvalidPlatform(p) => GenerateError::InvalidPlatform(p),
        other => GenerateError::InvalidKnowledgeBase(other),
    })?;

    let knowledge_base: KnowledgeBase = serde_json::from_value(knowledge_base)
        .map_err(|e| GenerateError::MalformedRequest(format!("knowledgeBase: {e}")))?;
    knowledge_base
        .validate()
        .map_err(GenerateError::InvalidKnowledgeBase)?;

    Ok(GenerationRequest {
        platform,
        knowledge_base,
    })
}

async fn run_generation(
    provider: &ProviderClient,
    body: &[u8],
    session: &Session,
    request_id: &str,
) -> Result<GeneratedPosts, GenerateError> {
    let request = parse_request(body)?;

    tracing::info!(
        request_id,
        session = %session.fingerprint,
        platform = %request.platform,
        topics = request.knowledge_base.topics.len(),
        "generating posts"
    );

    let text = provider.generate(&request.prompt()).await?;

    match parse_generated_posts(&text) {
        GenerationOutcome::Posts(posts) => {
            tracing::info!(request_id, count = posts.len(), "generated posts");
            Ok(GeneratedPosts { posts })
        }
        GenerationOutcome::Unparsed { raw, reason } => {
            Err(GenerateError::ParseFailed { raw, reason })
        }
    }
}

/// POST /api/v1/generate: generate posts for a platform from a knowledge base.
pub(super) async fn generate_posts(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(session): Extension<Session>,
    body: Bytes,
) -> Result<Json<GeneratedPosts>, ApiError> {
    let rid = req_id.0.as_str();
    run_generation(&state.provider, &body, &session, rid)
        .await
        .map(Json)
        .map_err(|e| e.into_api_error(rid))
}

#[cfg(test)]
#[path = "generate_test.rs"]
mod tests;
