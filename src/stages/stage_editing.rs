use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

use crate::llm::{EDITING_TEMPLATE, PromptVars, TextGenerator, normalize_plain_text};
use crate::models::Document;
use crate::stages::Stage;

/// Final proofreading pass over every section, in order
#[derive(Debug, Clone, Default)]
pub struct EditingStage;

#[async_trait]
impl Stage for EditingStage {
    type Input = Document;
    type Output = Document;

    fn name(&self) -> &'static str {
        "editing"
    }

    async fn run(&self, generator: &dyn TextGenerator, mut document: Document) -> Result<Document> {
        for section in document.sections.iter_mut() {
            let vars = PromptVars::new().with("content", section.content.as_str());

            let raw = generator
                .invoke(&EDITING_TEMPLATE, &vars)
                .await
                .with_context(|| format!("Failed to edit section \"{}\"", section.title))?;

            section.content = normalize_plain_text(&raw);
        }

        info!("Editing: {} sections proofread", document.sections.len());
        Ok(document)
    }
}
