//! Addon manifest model.
//!
//! Only the parts that carry translatable strings are modeled; any other
//! manifest field is accepted and ignored.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::strings::content::Block;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AddonType {
    Guide,
    Tutorial,
    Message,
    Replacer,
}

impl AddonType {
    pub fn as_str(self) -> &'static str {
        match self {
            AddonType::Guide => "guide",
            AddonType::Tutorial => "tutorial",
            AddonType::Message => "message",
            AddonType::Replacer => "replacer",
        }
    }
}

/// Addon manifest (`manifest.json`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddonManifest {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AddonType,
    /// Untranslatable addons produce no strings.
    #[serde(default = "default_translatable")]
    pub translatable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guide: Option<GuideBody>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tutorial: Option<TutorialBody>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<MessageBody>,
    /// Accepted here as well as under `message`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uses_shared_strings: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_version: Option<String>,
}

fn default_translatable() -> bool {
    true
}

impl AddonManifest {
    pub fn uses_shared_strings(&self) -> bool {
        self.uses_shared_strings == Some(true)
            || self
                .message
                .as_ref()
                .is_some_and(|m| m.uses_shared_strings == Some(true))
    }

    /// `shortVersion`, with the `message` value taking precedence.
    pub fn short_version(&self) -> Option<&str> {
        self.message
            .as_ref()
            .and_then(|m| m.short_version.as_deref())
            .or(self.short_version.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct GuideBody {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle_comment: Option<String>,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct TutorialBody {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_comment: Option<String>,
    pub subtitle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle_comment: Option<String>,
    pub completion_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_message_comment: Option<String>,
    pub steps: Vec<TutorialStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct TutorialStep {
    pub id: String,
    pub tooltip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// With shared strings, `title`, `subtitle` and leaf block contents are ids
/// into the shared string definitions rather than English text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct MessageBody {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle_comment: Option<String>,
    pub blocks: Vec<Block>,
    #[serde(
        rename = "usesSharedStrings",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub uses_shared_strings: Option<bool>,
    #[serde(rename = "shortVersion", default, skip_serializing_if = "Option::is_none")]
    pub short_version: Option<String>,
}
