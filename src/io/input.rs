use std::path::Path;

use anyhow::{Context, Result};

use crate::io::GeneratedPost;
use crate::models::BlogRequest;

/// Load a blog request from a JSON file
///
/// Expected format:
/// ```json
/// {
///   "topic": "Juninho Pernambucano, the Greatest Free Kicker of All Time",
///   "targetAudience": "Football (Soccer) enthusiasts",
///   "keywords": ["football", "free kick"],
///   "ctaGoal": "Subscribe to our newsletter"
/// }
/// ```
pub fn parse_request_file(path: &Path) -> Result<BlogRequest> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    let request: BlogRequest =
        serde_json::from_str(&content).context("Failed to parse blog request JSON")?;
    request.validate()?;
    Ok(request)
}

/// Load a previously generated post
pub fn parse_generated_post_file(path: &Path) -> Result<GeneratedPost> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    serde_json::from_str(&content).context("Failed to parse generated post JSON")
}
