use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

use crate::llm::{CONTENT_TEMPLATE, PromptVars, TextGenerator, normalize_plain_text};
use crate::models::Document;
use crate::stages::Stage;

/// Writes the body of every section, one call per section in order
#[derive(Debug, Clone, Default)]
pub struct ContentStage;

#[async_trait]
impl Stage for ContentStage {
    type Input = Document;
    type Output = Document;

    fn name(&self) -> &'static str {
        "content"
    }

    async fn run(&self, generator: &dyn TextGenerator, mut document: Document) -> Result<Document> {
        let total = document.sections.len();

        for (index, section) in document.sections.iter_mut().enumerate() {
            let vars = PromptVars::new()
                .with("title", document.title.as_str())
                .with("intro", document.introduction.as_str())
                .with("sectionTitle", section.title.as_str());

            let raw = generator
                .invoke(&CONTENT_TEMPLATE, &vars)
                .await
                .with_context(|| format!("Failed to write section \"{}\"", section.title))?;

            section.content = normalize_plain_text(&raw);
            info!("Section {}/{} written: {}", index + 1, total, section.title);
        }

        Ok(document)
    }
}
