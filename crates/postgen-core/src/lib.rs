pub mod app_config;
pub mod config;
pub mod knowledge_base;
pub mod platform;
pub mod posts;
pub mod prompt;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use knowledge_base::{load_knowledge_base, parse_list, KnowledgeBase};
pub use platform::Platform;
pub use posts::{parse_generated_posts, GeneratedPosts, GenerationOutcome};
pub use prompt::{
    build_prompt, GenerationRequest, Prompt, MAX_OUTPUT_TOKENS, POSTS_PER_REQUEST, TEMPERATURE,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid platform: {0}")]
    InvalidPlatform(String),

    #[error("knowledge base must contain at least one topic")]
    EmptyTopics,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read knowledge base file {path}: {source}")]
    KnowledgeBaseFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse knowledge base file: {0}")]
    KnowledgeBaseFileParse(#[source] serde_yaml::Error),

    #[error("invalid knowledge base: {0}")]
    Validation(#[from] CoreError),
}
