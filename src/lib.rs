pub mod io;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod stages;

pub use io::{GeneratedPost, MarkdownPost, parse_generated_post_file, parse_request_file};
pub use llm::{
    AnthropicClient, AnthropicConfig, GenerationError, PromptTemplate, PromptVars, TextGenerator,
    extract_structured_payload, normalize_plain_text,
};
pub use models::{BlogRequest, Document, MediaSuggestion, Section, parse_keywords_string};
pub use pipeline::{BlogPipeline, PipelineConfig};
pub use stages::Stage;
