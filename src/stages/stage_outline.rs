use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

use crate::llm::{OUTLINE_TEMPLATE, PromptVars, TextGenerator, extract_structured_payload};
use crate::models::{Document, parse_outline};
use crate::stages::Stage;

/// What to write about and for whom
#[derive(Debug, Clone)]
pub struct OutlineRequest {
    pub topic: String,
    pub target_audience: String,
}

/// Builds the initial document skeleton from a topic
#[derive(Debug, Clone, Default)]
pub struct OutlineStage;

#[async_trait]
impl Stage for OutlineStage {
    type Input = OutlineRequest;
    type Output = Document;

    fn name(&self) -> &'static str {
        "outline"
    }

    /// A malformed outline payload yields an empty document, never an error.
    async fn run(&self, generator: &dyn TextGenerator, input: OutlineRequest) -> Result<Document> {
        let vars = PromptVars::new()
            .with("topic", input.topic)
            .with("targetAudience", input.target_audience);

        let raw = generator.invoke(&OUTLINE_TEMPLATE, &vars).await?;
        let payload = extract_structured_payload(&raw);

        let document = match parse_outline(&payload) {
            Ok(outline) => Document::from(outline),
            Err(e) => {
                warn!("Outline response was not valid JSON, using empty document: {}", e);
                Document::default()
            }
        };

        info!(
            "Outline: \"{}\" with {} sections",
            document.title,
            document.sections.len()
        );

        Ok(document)
    }
}
