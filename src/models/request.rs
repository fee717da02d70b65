use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Everything the caller supplies for one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogRequest {
    pub topic: String,
    pub target_audience: String,
    #[serde(default)]
    pub keywords: BTreeSet<String>,
    pub cta_goal: String,
}

impl BlogRequest {
    pub fn new(
        topic: impl Into<String>,
        target_audience: impl Into<String>,
        keywords: BTreeSet<String>,
        cta_goal: impl Into<String>,
    ) -> Self {
        Self {
            topic: topic.into(),
            target_audience: target_audience.into(),
            keywords,
            cta_goal: cta_goal.into(),
        }
    }

    /// Reject requests that cannot produce a meaningful post
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.topic.trim().is_empty() {
            anyhow::bail!("Blog request has an empty topic");
        }
        Ok(())
    }
}

/// Parse keywords from a comma-separated string
pub fn parse_keywords_string(input: &str) -> BTreeSet<String> {
    input
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
