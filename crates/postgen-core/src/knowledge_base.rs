use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, CoreError};

/// A user's saved content preferences, used to parametrize generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub topics: Vec<String>,
    pub tone: String,
    pub target_audience: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
}

impl KnowledgeBase {
    /// Reject a knowledge base that has nothing to write about.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyTopics`] when every topic is blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.topics.iter().all(|t| t.trim().is_empty()) {
            return Err(CoreError::EmptyTopics);
        }
        Ok(())
    }

    #[must_use]
    pub fn topics_clause(&self) -> String {
        self.topics.join(", ")
    }

    /// Comma-joined hashtags, or `None` when there are none to include.
    #[must_use]
    pub fn hashtags_clause(&self) -> Option<String> {
        let joined = self.hashtags.join(", ");
        (!joined.is_empty()).then_some(joined)
    }
}

/// Split comma-separated user input into trimmed, non-empty entries.
#[must_use]
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Load and validate a knowledge base from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_knowledge_base(path: &Path) -> Result<KnowledgeBase, ConfigError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| ConfigError::KnowledgeBaseFileIo {
            path: path.display().to_string(),
            source: e,
        })?;

    let knowledge_base: KnowledgeBase =
        serde_yaml::from_str(&content).map_err(ConfigError::KnowledgeBaseFileParse)?;

    knowledge_base.validate()?;

    Ok(knowledge_base)
}

#[cfg(test)]
#[path = "knowledge_base_test.rs"]
mod tests;
