use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::llm::{CTA_TEMPLATE, PromptVars, TextGenerator, normalize_plain_text};
use crate::stages::Stage;

/// Input for the call-to-action stage
#[derive(Debug, Clone)]
pub struct CtaInput {
    pub title: String,
    pub goal: String,
}

/// Writes the call to action for the caller's goal
#[derive(Debug, Clone, Default)]
pub struct CallToActionStage;

#[async_trait]
impl Stage for CallToActionStage {
    type Input = CtaInput;
    type Output = String;

    fn name(&self) -> &'static str {
        "call-to-action"
    }

    async fn run(&self, generator: &dyn TextGenerator, input: CtaInput) -> Result<String> {
        let vars = PromptVars::new()
            .with("title", input.title)
            .with("goal", input.goal);

        let raw = generator.invoke(&CTA_TEMPLATE, &vars).await?;
        let cta = normalize_plain_text(&raw);
        info!("Call to action: {} chars", cta.len());

        Ok(cta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::scripted::{ScriptedGenerator, provider_failure};

    #[tokio::test]
    async fn test_cta_is_normalized() {
        let generator = ScriptedGenerator::constant("```text\nSign up today!\n```\n");

        let cta = CallToActionStage
            .run(
                &generator,
                CtaInput {
                    title: "Post".to_string(),
                    goal: "newsletter".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(cta, "Sign up today!");
        assert_eq!(generator.calls()[0].1.get("goal"), Some("newsletter"));
    }

    #[tokio::test]
    async fn test_cta_failure_propagates() {
        let generator = ScriptedGenerator::new(|_, _| Err(provider_failure("down")));

        let result = CallToActionStage
            .run(
                &generator,
                CtaInput {
                    title: "Post".to_string(),
                    goal: "newsletter".to_string(),
                },
            )
            .await;

        assert!(result.is_err());
    }
}
