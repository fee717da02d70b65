use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// The blog post being assembled, threaded through every stage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    pub title: String,
    pub introduction: String,
    /// Fixed in number and order once the outline exists
    pub sections: Vec<Section>,
    pub conclusion: String,
    pub call_to_action: String,
    pub keywords: BTreeSet<String>,
    /// Only the first candidate is kept
    pub meta_description: String,
    pub media_suggestions: Vec<MediaSuggestion>,
}

impl Document {
    /// All section bodies joined with newlines
    pub fn joined_content(&self) -> String {
        self.sections
            .iter()
            .map(|s| s.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Number of suggestions that received an image
    pub fn images_generated(&self) -> usize {
        self.media_suggestions
            .iter()
            .filter(|m| m.generated_image_url.is_some())
            .count()
    }

    /// Whether the outline produced nothing usable
    pub fn is_blank(&self) -> bool {
        self.title.is_empty() && self.introduction.is_empty() && self.sections.is_empty()
    }
}

/// One body section of the post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    pub title: String,
    pub content: String,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: String::new(),
        }
    }
}

/// A suggested visual and, if generation succeeded, its image
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaSuggestion {
    pub description: String,
    #[serde(alias = "placement_suggestion", alias = "placement")]
    pub placement_suggestion: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_image_url: Option<String>,
}

impl MediaSuggestion {
    pub fn new(description: impl Into<String>, placement: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            placement_suggestion: placement.into(),
            generated_image_url: None,
        }
    }
}
