use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::{BlogRequest, Document};

/// Machine-readable output of a pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPost {
    pub run_id: String,
    /// RFC 3339 timestamp
    pub generated_at: String,
    pub topic: String,
    pub target_audience: String,
    pub duration_ms: u64,
    pub images_generated: usize,
    pub document: Document,
}

impl GeneratedPost {
    pub fn new(request: &BlogRequest, document: Document, duration_ms: u64) -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            topic: request.topic.clone(),
            target_audience: request.target_audience.clone(),
            duration_ms,
            images_generated: document.images_generated(),
            document,
        }
    }

    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }
}

/// Markdown view of a document
pub struct MarkdownPost<'a> {
    document: &'a Document,
}

impl<'a> MarkdownPost<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }

    /// Format the post as Markdown
    pub fn format(&self) -> String {
        let doc = self.document;
        let mut output = String::new();

        output.push_str(&format!("# {}\n\n", doc.title));

        if !doc.meta_description.is_empty() {
            output.push_str(&format!("> {}\n\n", doc.meta_description));
        }

        if !doc.keywords.is_empty() {
            let keywords: Vec<&str> = doc.keywords.iter().map(String::as_str).collect();
            output.push_str(&format!("*Keywords: {}*\n\n", keywords.join(", ")));
        }

        push_block(&mut output, &doc.introduction);

        for section in &doc.sections {
            output.push_str(&format!("## {}\n\n", section.title));
            push_block(&mut output, &section.content);
        }

        if !doc.conclusion.is_empty() {
            output.push_str("## Conclusion\n\n");
            push_block(&mut output, &doc.conclusion);
        }

        if !doc.call_to_action.is_empty() {
            output.push_str("---\n\n");
            push_block(&mut output, &doc.call_to_action);
        }

        if !doc.media_suggestions.is_empty() {
            output.push_str("## Visual Suggestions\n\n");
            for suggestion in &doc.media_suggestions {
                output.push_str(&format!("- {}", suggestion.description));
                if !suggestion.placement_suggestion.is_empty() {
                    output.push_str(&format!(" (placement: {})", suggestion.placement_suggestion));
                }
                output.push('\n');
                if let Some(url) = &suggestion.generated_image_url {
                    output.push_str(&format!("  ![{}]({})\n", suggestion.description, url));
                }
            }
        }

        output
    }

    /// Write to a Markdown file
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        write!(file, "{}", self.format())?;
        Ok(())
    }
}

fn push_block(output: &mut String, text: &str) {
    if !text.is_empty() {
        output.push_str(text);
        output.push_str("\n\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MediaSuggestion, Section};
    use std::collections::BTreeSet;

    fn document() -> Document {
        let mut image = MediaSuggestion::new("Hero shot", "Top");
        image.generated_image_url = Some("https://img.test/hero.png".to_string());

        Document {
            title: "Free Kicks".to_string(),
            introduction: "Intro text".to_string(),
            sections: vec![Section {
                title: "Technique".to_string(),
                content: "Strike the valve.".to_string(),
            }],
            conclusion: "The end".to_string(),
            call_to_action: "Subscribe now".to_string(),
            keywords: ["football".to_string()].into_iter().collect(),
            meta_description: "All about free kicks".to_string(),
            media_suggestions: vec![image, MediaSuggestion::new("Chart", "")],
        }
    }

    #[test]
    fn test_markdown_contains_all_parts() {
        let markdown = MarkdownPost::new(&document()).format();

        assert!(markdown.starts_with("# Free Kicks\n"));
        assert!(markdown.contains("> All about free kicks"));
        assert!(markdown.contains("*Keywords: football*"));
        assert!(markdown.contains("## Technique\n\nStrike the valve."));
        assert!(markdown.contains("## Conclusion"));
        assert!(markdown.contains("Subscribe now"));
        assert!(markdown.contains("- Hero shot (placement: Top)"));
        assert!(markdown.contains("![Hero shot](https://img.test/hero.png)"));
        assert!(markdown.contains("- Chart\n"));
    }

    #[test]
    fn test_markdown_skips_empty_parts() {
        let markdown = MarkdownPost::new(&Document::default()).format();
        assert_eq!(markdown, "# \n\n");
    }

    #[test]
    fn test_generated_post_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("post.json");
        let request = BlogRequest::new("Free kicks", "Fans", BTreeSet::new(), "Subscribe");

        let post = GeneratedPost::new(&request, document(), 1234);
        post.write_json(&path).unwrap();

        let loaded = crate::io::parse_generated_post_file(&path).unwrap();
        assert_eq!(loaded.run_id, post.run_id);
        assert_eq!(loaded.images_generated, 1);
        assert_eq!(loaded.document, document());

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["durationMs"], 1234);
        assert_eq!(raw["document"]["metaDescription"], "All about free kicks");
    }
}
