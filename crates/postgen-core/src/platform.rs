use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Target social network for a batch of generated posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linkedin,
    Twitter,
    Reddit,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Linkedin, Platform::Twitter, Platform::Reddit];

    /// Wire identifier, as accepted in request bodies.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Linkedin => "linkedin",
            Platform::Twitter => "twitter",
            Platform::Reddit => "reddit",
        }
    }

    /// Short user-facing blurb shown next to the platform picker.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Platform::Linkedin => {
                "Generate professional, long-form posts optimized for LinkedIn's business audience."
            }
            Platform::Twitter => {
                "Generate short, engaging tweets under 280 characters for Twitter/X."
            }
            Platform::Reddit => {
                "Generate discussion-oriented posts with relevant context for Reddit communities."
            }
        }
    }

    /// Formatting guidance appended to the system instruction.
    #[must_use]
    pub fn formatting_directive(self) -> &'static str {
        match self {
            Platform::Linkedin => concat!(
                "Format as professional LinkedIn posts with clear paragraphs.\n",
                "Each post should be 3-4 paragraphs long and include a call to action.\n",
                "Make the content insightful and valuable for professional networking."
            ),
            Platform::Twitter => concat!(
                "Format as short, engaging tweets under 280 characters.\n",
                "Make them punchy, memorable, and shareable.\n",
                "Include relevant hashtags from the provided list."
            ),
            Platform::Reddit => concat!(
                "Format as discussion-oriented Reddit posts with relevant context.\n",
                "Include a clear title (in quotes at the top) and a detailed body.\n",
                "Make the content conversational and designed to spark discussion."
            ),
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linkedin" => Ok(Platform::Linkedin),
            "twitter" => Ok(Platform::Twitter),
            "reddit" => Ok(Platform::Reddit),
            other => Err(CoreError::InvalidPlatform(other.to_string())),
        }
    }
}
