//! System/user instruction construction for a generation call.
//!
//! All knowledge-base content goes into the system instruction. The user
//! instruction is a fixed sentence that only names the platform, so the
//! output-format directive stays the last word on what the model returns.

use crate::{CoreError, KnowledgeBase, Platform};

/// Posts requested per generation call.
pub const POSTS_PER_REQUEST: usize = 5;

/// Sampling temperature sent with every generation call.
pub const TEMPERATURE: f32 = 0.7;

/// Upper bound on provider output, in provider tokens.
pub const MAX_OUTPUT_TOKENS: u32 = 2000;

const OUTPUT_DIRECTIVE: &str = concat!(
    "Return ONLY the posts as a JSON array of strings, with no additional text or explanation.\n",
    "Format the response as: { \"posts\": [\"post1\", \"post2\", \"post3\", \"post4\", \"post5\"] }"
);

/// Instruction pair handed to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub platform: Platform,
    pub system: String,
    pub user: String,
}

impl Prompt {
    #[must_use]
    pub fn for_platform(platform: Platform, knowledge_base: &KnowledgeBase) -> Self {
        let mut system = format!(
            "You are an expert social media content creator.\n\
             Generate {POSTS_PER_REQUEST} high-quality {platform} posts about the following topics: {topics}.\n\
             Use a {tone} tone and target the following audience: {audience}.",
            topics = knowledge_base.topics_clause(),
            tone = knowledge_base.tone,
            audience = knowledge_base.target_audience,
        );

        if let Some(hashtags) = knowledge_base.hashtags_clause() {
            system.push_str(&format!(
                " Include these hashtags where appropriate: {hashtags}."
            ));
        }

        system.push('\n');
        system.push_str(platform.formatting_directive());
        system.push('\n');
        system.push_str(OUTPUT_DIRECTIVE);

        let user =
            format!("Generate {POSTS_PER_REQUEST} {platform} posts based on the provided information.");

        Self {
            platform,
            system,
            user,
        }
    }
}

/// One generation call's input. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub platform: Platform,
    pub knowledge_base: KnowledgeBase,
}

impl GenerationRequest {
    #[must_use]
    pub fn prompt(&self) -> Prompt {
        Prompt::for_platform(self.platform, &self.knowledge_base)
    }
}

/// Build the instruction pair for a raw platform identifier.
///
/// # Errors
///
/// Returns [`CoreError::InvalidPlatform`] if `platform` is not a known identifier.
pub fn build_prompt(platform: &str, knowledge_base: &KnowledgeBase) -> Result<Prompt, CoreError> {
    let platform = platform.parse::<Platform>()?;
    Ok(Prompt::for_platform(platform, knowledge_base))
}
