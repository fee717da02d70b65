use std::collections::BTreeSet;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info};

use crate::llm::{PromptVars, SEO_TEMPLATE, TextGenerator, normalize_plain_text};
use crate::models::Document;
use crate::stages::Stage;

/// Marker that introduces the meta description in an SEO response
pub const META_DESCRIPTION_MARKER: &str = "\nMETA_DESCRIPTION:";

/// Input for the SEO stage
#[derive(Debug, Clone)]
pub struct SeoInput {
    pub document: Document,
    pub keywords: BTreeSet<String>,
}

/// Rewrites sections around the target keywords and picks up a meta description
#[derive(Debug, Clone, Default)]
pub struct SeoStage;

/// Split a response into section content and an optional meta description
pub fn split_meta_description(raw: &str) -> (String, Option<String>) {
    let mut parts = raw.splitn(2, META_DESCRIPTION_MARKER);
    let content = normalize_plain_text(parts.next().unwrap_or_default());
    let meta = parts.next().map(normalize_plain_text);
    (content, meta)
}

#[async_trait]
impl Stage for SeoStage {
    type Input = SeoInput;
    type Output = Document;

    fn name(&self) -> &'static str {
        "seo"
    }

    /// Sections are processed strictly in order; the first response carrying a
    /// meta description decides it.
    async fn run(&self, generator: &dyn TextGenerator, input: SeoInput) -> Result<Document> {
        let SeoInput {
            mut document,
            keywords,
        } = input;
        let keyword_list = keywords.iter().map(String::as_str).collect::<Vec<_>>().join(", ");

        for section in document.sections.iter_mut() {
            let vars = PromptVars::new()
                .with("keywords", keyword_list.as_str())
                .with("content", section.content.as_str());

            let raw = generator
                .invoke(&SEO_TEMPLATE, &vars)
                .await
                .with_context(|| format!("Failed to optimize section \"{}\"", section.title))?;

            let (content, meta) = split_meta_description(&raw);
            section.content = content;

            if let Some(meta) = meta {
                if document.meta_description.is_empty() {
                    debug!("Meta description taken from section \"{}\"", section.title);
                    document.meta_description = meta;
                }
            }
        }

        document.keywords = keywords;
        info!(
            "SEO: {} sections optimized, meta description {}",
            document.sections.len(),
            if document.meta_description.is_empty() { "missing" } else { "set" }
        );

        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Section;
    use crate::llm::scripted::ScriptedGenerator;

    fn input() -> SeoInput {
        SeoInput {
            document: Document {
                sections: vec![
                    Section {
                        title: "One".to_string(),
                        content: "first body".to_string(),
                    },
                    Section {
                        title: "Two".to_string(),
                        content: "second body".to_string(),
                    },
                ],
                ..Default::default()
            },
            keywords: ["free kick", "football"].iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_split_with_marker() {
        let (content, meta) = split_meta_description("Body text\nMETA_DESCRIPTION: A short summary");
        assert_eq!(content, "Body text");
        assert_eq!(meta.as_deref(), Some("A short summary"));
    }

    #[test]
    fn test_split_without_marker() {
        let (content, meta) = split_meta_description("  Body only  ");
        assert_eq!(content, "Body only");
        assert!(meta.is_none());
    }

    #[test]
    fn test_split_marker_needs_preceding_newline() {
        let (content, meta) = split_meta_description("META_DESCRIPTION: not a side channel");
        assert_eq!(content, "META_DESCRIPTION: not a side channel");
        assert!(meta.is_none());
    }

    #[test]
    fn test_split_limits_to_two_parts() {
        let (content, meta) =
            split_meta_description("Body\nMETA_DESCRIPTION: one\nMETA_DESCRIPTION: two");
        assert_eq!(content, "Body");
        assert_eq!(meta.as_deref(), Some("one\nMETA_DESCRIPTION: two"));
    }

    #[tokio::test]
    async fn test_meta_description_first_write_wins() {
        let generator = ScriptedGenerator::new(|_, vars| {
            let body = vars.get("content").unwrap();
            Ok(format!("optimized {}\nMETA_DESCRIPTION: meta from {}", body, body))
        });

        let doc = SeoStage.run(&generator, input()).await.unwrap();

        assert_eq!(doc.meta_description, "meta from first body");
        assert_eq!(doc.sections[0].content, "optimized first body");
        assert_eq!(doc.sections[1].content, "optimized second body");
    }

    #[tokio::test]
    async fn test_meta_description_from_later_section_when_first_lacks_it() {
        let generator = ScriptedGenerator::new(|_, vars| match vars.get("content") {
            Some("first body") => Ok("optimized first".to_string()),
            _ => Ok("optimized second\nMETA_DESCRIPTION: second meta".to_string()),
        });

        let doc = SeoStage.run(&generator, input()).await.unwrap();
        assert_eq!(doc.meta_description, "second meta");
    }

    #[tokio::test]
    async fn test_keywords_copied_and_joined() {
        let generator = ScriptedGenerator::constant("optimized");

        let doc = SeoStage.run(&generator, input()).await.unwrap();

        assert_eq!(doc.keywords.len(), 2);
        assert!(doc.meta_description.is_empty());
        let calls = generator.calls();
        assert_eq!(calls[0].1.get("keywords"), Some("football, free kick"));
    }
}
