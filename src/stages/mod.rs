pub mod stage_content;
pub mod stage_cta;
pub mod stage_editing;
pub mod stage_images;
pub mod stage_outline;
pub mod stage_seo;
pub mod stage_visuals;

pub use stage_content::*;
pub use stage_cta::*;
pub use stage_editing::*;
pub use stage_images::*;
pub use stage_outline::*;
pub use stage_seo::*;
pub use stage_visuals::*;

use anyhow::Result;
use async_trait::async_trait;

use crate::llm::TextGenerator;

/// One step of the pipeline.
///
/// A stage takes its input by value, calls the generator once or once per
/// item, normalizes the responses, and hands back its output.
#[async_trait]
pub trait Stage: Send + Sync {
    type Input: Send + 'static;
    type Output: Send + 'static;

    fn name(&self) -> &'static str;

    async fn run(&self, generator: &dyn TextGenerator, input: Self::Input) -> Result<Self::Output>;
}
