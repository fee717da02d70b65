//! Blog post pipeline orchestrator.
//!
//! Runs the stages in their fixed order:
//! Outline -> Content -> (SEO || Visual suggestions) -> Images -> CTA -> Editing.
//! The visual suggestions stage reads a snapshot of the content taken before
//! SEO starts, so its prompt never sees a mix of pre- and post-SEO text.

use std::collections::BTreeSet;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info, instrument, warn};

use crate::llm::TextGenerator;
use crate::models::{BlogRequest, Document};
use crate::stages::{
    CallToActionStage, ContentStage, CtaInput, DEFAULT_IMAGE_STYLE, EditingStage,
    ImageGenerationStage, OutlineRequest, OutlineStage, SeoInput, SeoStage, Stage, VisualInput,
    VisualSuggestionsStage,
};

/// Configuration for the pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Style hint for generated images
    pub image_style: String,
    /// Maximum concurrent image requests
    pub max_parallel_images: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            image_style: DEFAULT_IMAGE_STYLE.to_string(),
            max_parallel_images: 4,
        }
    }
}

/// Orchestrates one blog post generation run per call
pub struct BlogPipeline<G: TextGenerator> {
    generator: Arc<G>,
    config: PipelineConfig,
}

impl<G: TextGenerator> BlogPipeline<G> {
    pub fn new(generator: Arc<G>) -> Self {
        Self {
            generator,
            config: PipelineConfig::default(),
        }
    }

    pub fn with_config(generator: Arc<G>, config: PipelineConfig) -> Self {
        Self { generator, config }
    }

    /// Run the pipeline for a request
    pub async fn generate(&self, request: &BlogRequest) -> Result<Document> {
        request.validate()?;
        self.generate_blog_post(
            &request.topic,
            &request.target_audience,
            &request.keywords,
            &request.cta_goal,
        )
        .await
    }

    /// Generate a complete blog post.
    ///
    /// Any stage failure ends the run and is returned to the caller, except
    /// per-image failures, which only leave that image unset.
    #[instrument(skip(self, target_audience, target_keywords, cta_goal))]
    pub async fn generate_blog_post(
        &self,
        topic: &str,
        target_audience: &str,
        target_keywords: &BTreeSet<String>,
        cta_goal: &str,
    ) -> Result<Document> {
        info!("Starting blog post generation");

        match self
            .run_stages(topic, target_audience, target_keywords, cta_goal)
            .await
        {
            Ok(document) => {
                info!(
                    "Blog post complete: {} sections, {}/{} images",
                    document.sections.len(),
                    document.images_generated(),
                    document.media_suggestions.len()
                );
                Ok(document)
            }
            Err(e) => {
                error!("Error generating blog post for topic \"{}\": {:#}", topic, e);
                Err(e)
            }
        }
    }

    async fn run_stages(
        &self,
        topic: &str,
        target_audience: &str,
        target_keywords: &BTreeSet<String>,
        cta_goal: &str,
    ) -> Result<Document> {
        let document = self
            .run_stage(
                &OutlineStage,
                OutlineRequest {
                    topic: topic.to_string(),
                    target_audience: target_audience.to_string(),
                },
            )
            .await?;
        if document.is_blank() {
            warn!("Outline produced an empty document, continuing");
        } else if document.sections.is_empty() {
            warn!("Outline has no sections, continuing with an empty body");
        }

        let document = self.run_stage(&ContentStage, document).await?;

        // Snapshot before SEO takes ownership of the document
        let visual_input = VisualInput::snapshot(&document);
        let seo_input = SeoInput {
            document,
            keywords: target_keywords.clone(),
        };
        let (mut document, suggestions) = tokio::try_join!(
            self.run_stage(&SeoStage, seo_input),
            self.run_stage(&VisualSuggestionsStage, visual_input),
        )?;

        let images = ImageGenerationStage {
            style: self.config.image_style.clone(),
            max_parallel: self.config.max_parallel_images,
        };
        document.media_suggestions = self.run_stage(&images, suggestions).await?;

        document.call_to_action = self
            .run_stage(
                &CallToActionStage,
                CtaInput {
                    title: document.title.clone(),
                    goal: cta_goal.to_string(),
                },
            )
            .await?;

        self.run_stage(&EditingStage, document).await
    }

    async fn run_stage<S: Stage>(&self, stage: &S, input: S::Input) -> Result<S::Output> {
        let output = stage
            .run(self.generator.as_ref(), input)
            .await
            .with_context(|| format!("{} stage failed", stage.name()))?;
        info!("Stage {} completed", stage.name());
        Ok(output)
    }
}
