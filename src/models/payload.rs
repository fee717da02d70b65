use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::models::{Document, MediaSuggestion, Section};

/// Field names accepted in an outline, matched ignoring case and underscores
const OUTLINE_KEYS: &[&str] = &[
    "title",
    "introduction",
    "mainSections",
    "sections",
    "conclusion",
    "callToAction",
    "content",
    "subtopic",
    "summary",
];

const SUGGESTION_KEYS: &[&str] = &[
    "description",
    "placementSuggestion",
    "placement",
    "generatedImageUrl",
];

/// Outline as returned by the model
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutlinePayload {
    pub title: String,
    pub introduction: String,
    #[serde(alias = "main_sections", alias = "sections")]
    pub main_sections: Vec<OutlineSection>,
    pub conclusion: String,
    /// Suggested CTA; the CTA stage writes the real one
    #[serde(alias = "call_to_action")]
    pub call_to_action: String,
}

/// A section entry in the outline
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutlineSection {
    pub title: String,
    /// Subtopic notes; section bodies are written by the content stage
    #[serde(alias = "subtopic", alias = "summary")]
    pub content: String,
}

impl From<OutlinePayload> for Document {
    fn from(payload: OutlinePayload) -> Self {
        Document {
            title: payload.title,
            introduction: payload.introduction,
            sections: payload
                .main_sections
                .into_iter()
                .map(|s| Section::new(s.title))
                .collect(),
            conclusion: payload.conclusion,
            ..Default::default()
        }
    }
}

/// Parse an outline payload. Keys match regardless of case.
pub fn parse_outline(json: &str) -> Result<OutlinePayload, serde_json::Error> {
    parse_with_keys(json, OUTLINE_KEYS)
}

/// Parse a visual suggestion list. Keys match regardless of case.
pub fn parse_media_suggestions(json: &str) -> Result<Vec<MediaSuggestion>, serde_json::Error> {
    parse_with_keys(json, SUGGESTION_KEYS)
}

fn parse_with_keys<T>(json: &str, keys: &[&str]) -> Result<T, serde_json::Error>
where
    T: DeserializeOwned + Default,
{
    let mut value: Value = serde_json::from_str(json)?;
    canonicalize_keys(&mut value, keys);
    // A JSON null is treated the same as a missing payload
    let parsed: Option<T> = serde_json::from_value(value)?;
    Ok(parsed.unwrap_or_default())
}

/// Rewrite object keys to their canonical spelling, at every depth
fn canonicalize_keys(value: &mut Value, keys: &[&str]) {
    match value {
        Value::Object(map) => {
            for (key, mut child) in std::mem::take(map) {
                canonicalize_keys(&mut child, keys);
                let folded = fold_key(&key);
                let key = keys
                    .iter()
                    .find(|known| fold_key(known) == folded)
                    .map_or(key, |known| known.to_string());
                map.insert(key, child);
            }
        }
        Value::Array(items) => {
            for item in items {
                canonicalize_keys(item, keys);
            }
        }
        _ => {}
    }
}

fn fold_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}
