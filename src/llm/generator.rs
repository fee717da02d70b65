use async_trait::async_trait;

use crate::llm::{PromptTemplate, PromptVars};

/// Errors raised at the text-generation boundary
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("template '{template}' references unset variable '{variable}'")]
    MissingVariable {
        template: &'static str,
        variable: String,
    },

    #[error("request to generation API failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("generation API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("generation API returned no text content")]
    EmptyResponse,
}

/// The external text-generation capability.
///
/// A call takes an opaque template plus named string variables and yields the
/// raw response text. Failures are reported only through the error; there are
/// no partial results.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn invoke(
        &self,
        template: &PromptTemplate,
        vars: &PromptVars,
    ) -> Result<String, GenerationError>;
}
