use serde::{Deserialize, Serialize};

/// The `{"posts": [...]}` shape the output directive asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPosts {
    pub posts: Vec<String>,
}

/// Result of interpreting provider text.
///
/// `Unparsed` keeps the provider output so callers can still show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Posts(Vec<String>),
    Unparsed { raw: String, reason: String },
}

/// Interpret provider text as a list of posts.
///
/// Count and content of the posts are not checked; whatever array of strings
/// the provider returned is passed through in order.
#[must_use]
pub fn parse_generated_posts(text: &str) -> GenerationOutcome {
    match serde_json::from_str::<GeneratedPosts>(text) {
        Ok(parsed) => GenerationOutcome::Posts(parsed.posts),
        Err(e) => GenerationOutcome::Unparsed {
            raw: text.to_string(),
            reason: e.to_string(),
        },
    }
}
