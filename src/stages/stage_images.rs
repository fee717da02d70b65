use anyhow::Result;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::llm::{GenerationError, IMAGE_TEMPLATE, PromptVars, TextGenerator, normalize_plain_text};
use crate::models::MediaSuggestion;
use crate::stages::Stage;

/// Default style passed along with every image description
pub const DEFAULT_IMAGE_STYLE: &str = "professional, blog-style";

/// Generates an image for each suggestion.
///
/// Suggestions are independent: a failure on one is logged and leaves its URL
/// unset, and never stops the others. The returned list keeps the input order.
#[derive(Debug, Clone)]
pub struct ImageGenerationStage {
    /// Style hint sent with each description
    pub style: String,
    /// Maximum concurrent image requests
    pub max_parallel: usize,
}

impl Default for ImageGenerationStage {
    fn default() -> Self {
        Self {
            style: DEFAULT_IMAGE_STYLE.to_string(),
            max_parallel: 4,
        }
    }
}

#[async_trait]
impl Stage for ImageGenerationStage {
    type Input = Vec<MediaSuggestion>;
    type Output = Vec<MediaSuggestion>;

    fn name(&self) -> &'static str {
        "image-generation"
    }

    async fn run(
        &self,
        generator: &dyn TextGenerator,
        mut suggestions: Vec<MediaSuggestion>,
    ) -> Result<Vec<MediaSuggestion>> {
        let jobs: Vec<(usize, String)> = suggestions
            .iter()
            .enumerate()
            .map(|(idx, s)| (idx, s.description.clone()))
            .collect();
        let style = self.style.as_str();

        let results: Vec<(usize, Result<String, GenerationError>)> = stream::iter(jobs)
            .map(move |(idx, description)| async move {
                let vars = PromptVars::new()
                    .with("description", description)
                    .with("style", style);
                (idx, generator.invoke(&IMAGE_TEMPLATE, &vars).await)
            })
            .buffer_unordered(self.max_parallel.max(1))
            .collect()
            .await;

        let mut failed = 0;
        for (idx, result) in results {
            let suggestion = &mut suggestions[idx];
            match result {
                Ok(raw) => {
                    let url = normalize_plain_text(&raw);
                    if url.is_empty() {
                        warn!("Image for \"{}\" came back empty", suggestion.description);
                        failed += 1;
                    } else {
                        debug!("Image for \"{}\": {}", suggestion.description, url);
                        suggestion.generated_image_url = Some(url);
                    }
                }
                Err(e) => {
                    warn!(
                        "Error generating image for suggestion \"{}\": {}",
                        suggestion.description, e
                    );
                    failed += 1;
                }
            }
        }

        info!(
            "Images: {} generated, {} failed",
            suggestions.len() - failed,
            failed
        );

        Ok(suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::scripted::{ScriptedGenerator, provider_failure};

    fn suggestions() -> Vec<MediaSuggestion> {
        vec![
            MediaSuggestion::new("one", "top"),
            MediaSuggestion::new("two", "middle"),
            MediaSuggestion::new("three", "bottom"),
        ]
    }

    #[tokio::test]
    async fn test_failure_is_isolated_per_item() {
        let generator = ScriptedGenerator::new(|_, vars| match vars.get("description") {
            Some("two") => Err(provider_failure("content policy")),
            Some(other) => Ok(format!("https://images.test/{}.png", other)),
            None => unreachable!(),
        });

        let result = ImageGenerationStage::default()
            .run(&generator, suggestions())
            .await
            .unwrap();

        assert_eq!(result.len(), 3);
        assert_eq!(
            result[0].generated_image_url.as_deref(),
            Some("https://images.test/one.png")
        );
        assert!(result[1].generated_image_url.is_none());
        assert_eq!(
            result[2].generated_image_url.as_deref(),
            Some("https://images.test/three.png")
        );
        assert_eq!(generator.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_order_preserved_with_serial_fanout() {
        let generator = ScriptedGenerator::new(|_, vars| {
            Ok(format!("url-{}", vars.get("description").unwrap()))
        });
        let stage = ImageGenerationStage {
            max_parallel: 1,
            ..Default::default()
        };

        let result = stage.run(&generator, suggestions()).await.unwrap();

        let descriptions: Vec<_> = result.iter().map(|s| s.description.as_str()).collect();
        assert_eq!(descriptions, vec!["one", "two", "three"]);
        assert_eq!(result[1].generated_image_url.as_deref(), Some("url-two"));
        assert_eq!(result[1].placement_suggestion, "middle");
    }

    #[tokio::test]
    async fn test_empty_response_leaves_url_unset() {
        let generator = ScriptedGenerator::constant("  ``` ```  ");

        let result = ImageGenerationStage::default()
            .run(&generator, suggestions())
            .await
            .unwrap();

        assert!(result.iter().all(|s| s.generated_image_url.is_none()));
    }

    #[tokio::test]
    async fn test_style_is_passed_through() {
        let generator = ScriptedGenerator::constant("https://images.test/x.png");
        let stage = ImageGenerationStage {
            style: "watercolor".to_string(),
            ..Default::default()
        };

        stage.run(&generator, vec![MediaSuggestion::new("x", "y")]).await.unwrap();

        assert_eq!(generator.calls()[0].1.get("style"), Some("watercolor"));
    }

    #[tokio::test]
    async fn test_no_suggestions_makes_no_calls() {
        let generator = ScriptedGenerator::constant("unused");
        let result = ImageGenerationStage::default()
            .run(&generator, Vec::new())
            .await
            .unwrap();

        assert!(result.is_empty());
        assert!(generator.calls().is_empty());
    }
}
