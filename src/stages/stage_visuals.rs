use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

use crate::llm::{PromptVars, TextGenerator, VISUALS_TEMPLATE, extract_structured_payload};
use crate::models::{Document, MediaSuggestion, parse_media_suggestions};
use crate::stages::Stage;

/// Read-only view of the post used to suggest visuals
#[derive(Debug, Clone, Default)]
pub struct VisualInput {
    pub title: String,
    /// Section bodies joined with newlines
    pub content: String,
}

impl VisualInput {
    /// Snapshot the title and current section bodies
    pub fn snapshot(document: &Document) -> Self {
        Self {
            title: document.title.clone(),
            content: document.joined_content(),
        }
    }
}

/// Proposes images and diagrams for the post
#[derive(Debug, Clone, Default)]
pub struct VisualSuggestionsStage;

#[async_trait]
impl Stage for VisualSuggestionsStage {
    type Input = VisualInput;
    type Output = Vec<MediaSuggestion>;

    fn name(&self) -> &'static str {
        "visual-suggestions"
    }

    async fn run(
        &self,
        generator: &dyn TextGenerator,
        input: VisualInput,
    ) -> Result<Vec<MediaSuggestion>> {
        let vars = PromptVars::new()
            .with("title", input.title)
            .with("content", input.content);

        let raw = generator.invoke(&VISUALS_TEMPLATE, &vars).await?;
        let payload = extract_structured_payload(&raw);

        let suggestions = parse_media_suggestions(&payload).unwrap_or_else(|e| {
            warn!("Visual suggestions were not a valid JSON list, using none: {}", e);
            Vec::new()
        });

        info!("Visual suggestions: {}", suggestions.len());
        Ok(suggestions)
    }
}
