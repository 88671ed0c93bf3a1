use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use uuid::Uuid;

use crate::api::ApiError;

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Authenticated caller, stored as a request extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// First hex characters of the token digest, safe to log.
    pub fingerprint: String,
}

impl Session {
    fn anonymous() -> Self {
        Self {
            fingerprint: "anonymous".to_string(),
        }
    }
}

type TokenDigest = [u8; 32];

/// Session token settings used by middleware.
#[derive(Debug, Clone)]
pub struct AuthState {
    token_digests: Arc<Vec<TokenDigest>>,
    pub enabled: bool,
}

impl AuthState {
    /// Builds auth config from `POSTGEN_SESSION_TOKENS` (comma-separated bearer tokens).
    ///
    /// In development, empty/missing tokens disable auth for local iteration.
    /// In non-development envs, empty/missing tokens fail startup.
    pub fn from_env(is_development: bool) -> anyhow::Result<Self> {
        let raw = std::env::var("POSTGEN_SESSION_TOKENS").unwrap_or_default();
        Self::from_raw(&raw, is_development)
    }

    fn from_raw(raw: &str, is_development: bool) -> anyhow::Result<Self> {
        let tokens = postgen_core::parse_list(raw);

        if tokens.is_empty() {
            if is_development {
                tracing::warn!(
                    "POSTGEN_SESSION_TOKENS not set; session auth disabled in development environment"
                );
                return Ok(Self::disabled());
            }

            anyhow::bail!(
                "POSTGEN_SESSION_TOKENS is required outside development; provide comma-separated session tokens"
            );
        }

        Ok(Self::from_tokens(tokens))
    }

    /// Auth off: every request gets an anonymous session.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            token_digests: Arc::new(Vec::new()),
            enabled: false,
        }
    }

    /// Builds an enabled auth state that accepts exactly `tokens`.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let digests = tokens
            .into_iter()
            .map(|t| digest(t.as_ref()))
            .collect::<Vec<_>>();
        Self {
            token_digests: Arc::new(digests),
            enabled: true,
        }
    }

    /// Returns the session for `token` if it is one of the configured tokens.
    fn verify(&self, token: &str) -> Option<Session> {
        let candidate = digest(token);
        // Check every digest so timing does not reveal which one matched.
        let matched = self
            .token_digests
            .iter()
            .fold(subtle::Choice::from(0), |acc, known| {
                acc | known.as_slice().ct_eq(candidate.as_slice())
            });

        bool::from(matched).then(|| Session {
            fingerprint: fingerprint(&candidate),
        })
    }
}

fn digest(token: &str) -> TokenDigest {
    Sha256::digest(token.as_bytes()).into()
}

fn fingerprint(digest: &TokenDigest) -> String {
    digest[..4].iter().map(|b| format!("{b:02x}")).collect()
}

/// Axum middleware that extracts or generates a request ID.
///
/// If the incoming request has an `x-request-id` header, that value is used.
/// Otherwise a new `UUIDv4` is generated. The ID is:
/// - Inserted into request extensions as [`RequestId`]
/// - Set on the response as the `x-request-id` header
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Middleware enforcing a valid session before the handler reads the body.
///
/// On success the [`Session`] is inserted into request extensions.
pub async fn require_session(
    State(auth): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Response {
    if !auth.enabled {
        req.extensions_mut().insert(Session::anonymous());
        return next.run(req).await;
    }

    let session = extract_bearer_token(req.headers().get(AUTHORIZATION))
        .and_then(|token| auth.verify(token));

    if let Some(session) = session {
        req.extensions_mut().insert(session);
        next.run(req).await
    } else {
        let request_id = req
            .extensions()
            .get::<RequestId>()
            .map_or("unknown", |r| r.0.as_str());
        tracing::warn!(request_id, path = %req.uri().path(), "rejected request without a valid session");
        ApiError::unauthorized().into_response()
    }
}

fn extract_bearer_token(value: Option<&HeaderValue>) -> Option<&str> {
    value
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|s| !s.trim().is_empty())
}
