//! Knowledge base input from flags or a YAML file.

use std::path::PathBuf;

use clap::Args;
use postgen_core::{load_knowledge_base, parse_list, KnowledgeBase};

#[derive(Debug, Args)]
pub struct InputArgs {
    /// Target platform: linkedin, twitter, or reddit
    #[arg(long)]
    pub platform: String,
    /// YAML knowledge base file (topics, tone, target_audience, hashtags)
    #[arg(long, conflicts_with_all = ["topics", "tone", "audience", "hashtags"])]
    pub knowledge_base: Option<PathBuf>,
    /// Comma-separated topics
    #[arg(long, required_unless_present = "knowledge_base")]
    pub topics: Option<String>,
    /// Tone of voice, e.g. "professional"
    #[arg(long, required_unless_present = "knowledge_base")]
    pub tone: Option<String>,
    /// Target audience description
    #[arg(long, required_unless_present = "knowledge_base")]
    pub audience: Option<String>,
    /// Comma-separated hashtags or keywords
    #[arg(long)]
    pub hashtags: Option<String>,
}

impl InputArgs {
    /// Resolve the knowledge base from the file or the inline flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded or the topics are empty.
    pub fn knowledge_base(&self) -> anyhow::Result<KnowledgeBase> {
        if let Some(path) = &self.knowledge_base {
            return Ok(load_knowledge_base(path)?);
        }

        let knowledge_base = KnowledgeBase {
            topics: parse_list(self.topics.as_deref().unwrap_or_default()),
            tone: self.tone.clone().unwrap_or_default(),
            target_audience: self.audience.clone().unwrap_or_default(),
            hashtags: parse_list(self.hashtags.as_deref().unwrap_or_default()),
        };
        knowledge_base.validate()?;
        Ok(knowledge_base)
    }
}
