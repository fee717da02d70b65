use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::llm::GenerationError;

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\$(\w+)\}\}").expect("valid regex"));

/// System prompt shared by every stage
pub const SYSTEM_PROMPT: &str = r#"You are a professional blog writer and editor.

Follow the output format requested in each instruction exactly.
When asked for JSON, return only the JSON document with no surrounding prose.
When asked for plain text, return only the text with no preamble or commentary."#;

/// A named prompt template with `{{$variable}}` placeholders
#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    /// Stable identifier, used in logs and errors
    pub name: &'static str,
    /// System prompt sent alongside the rendered body
    pub system: &'static str,
    /// Template body
    pub body: &'static str,
}

impl PromptTemplate {
    /// Substitute every placeholder in the body.
    ///
    /// Substituted values are not scanned again, so a value that itself
    /// contains `{{$x}}` is inserted literally.
    pub fn render(&self, vars: &PromptVars) -> Result<String, GenerationError> {
        if let Some(missing) = PLACEHOLDER_RE
            .captures_iter(self.body)
            .map(|caps| caps[1].to_string())
            .find(|name| vars.get(name).is_none())
        {
            return Err(GenerationError::MissingVariable {
                template: self.name,
                variable: missing,
            });
        }

        Ok(PLACEHOLDER_RE
            .replace_all(self.body, |caps: &Captures| {
                vars.get(&caps[1]).unwrap_or_default().to_string()
            })
            .into_owned())
    }
}

/// Named string variables for a template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptVars(BTreeMap<String, String>);

impl PromptVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

pub const OUTLINE_TEMPLATE: PromptTemplate = PromptTemplate {
    name: "outline",
    system: SYSTEM_PROMPT,
    body: r#"Create a detailed blog post outline for the topic: {{$topic}}
Target audience: {{$targetAudience}}

Generate a structured outline with:
1. An engaging title
2. Introduction section
3. 3-5 main body sections with subtopics
4. Conclusion section
5. Call-to-action suggestion

Format the response as valid JSON (not as a code block) matching this structure:
{
  "title": "string",
  "introduction": "string",
  "mainSections": [
    {
      "title": "string",
      "content": "string"
    }
  ],
  "conclusion": "string",
  "callToAction": "string"
}"#,
};

pub const CONTENT_TEMPLATE: PromptTemplate = PromptTemplate {
    name: "content",
    system: SYSTEM_PROMPT,
    body: r#"Generate detailed content for the blog post outline below:
Title: {{$title}}
Introduction topic: {{$intro}}
Section title: {{$sectionTitle}}

For this section, generate engaging, informative content that flows naturally.
Maintain a consistent tone and style.
Include relevant examples and explanations.
Keep technical accuracy and readability in mind.

Return the content as plain text (not JSON formatted)."#,
};

pub const EDITING_TEMPLATE: PromptTemplate = PromptTemplate {
    name: "editing",
    system: SYSTEM_PROMPT,
    body: r#"Proofread and edit the following blog post content:
{{$content}}

Focus on:
1. Grammar and spelling
2. Clarity and coherence
3. Style consistency
4. Technical accuracy
5. Flow between sections

Return the improved content as plain text (not JSON formatted)."#,
};

pub const SEO_TEMPLATE: PromptTemplate = PromptTemplate {
    name: "seo",
    system: SYSTEM_PROMPT,
    body: r#"Optimize the following content for SEO using these keywords: {{$keywords}}

Content: {{$content}}

1. Naturally integrate keywords
2. Optimize headings
3. Improve meta description
4. Enhance readability
5. Maintain natural flow

Return the optimized content as plain text (not JSON formatted).
Also provide a meta description in a new line starting with "META_DESCRIPTION:""#,
};

pub const VISUALS_TEMPLATE: PromptTemplate = PromptTemplate {
    name: "visuals",
    system: SYSTEM_PROMPT,
    body: r#"Analyze the blog post content and suggest relevant visuals:
Title: {{$title}}
Content: {{$content}}

Generate suggestions for:
1. Featured image
2. Section-specific illustrations
3. Infographics or diagrams
4. Placement recommendations

Format the response as valid JSON (not as a code block) matching this structure:
[
  {
    "description": "string",
    "placementSuggestion": "string"
  }
]"#,
};

pub const CTA_TEMPLATE: PromptTemplate = PromptTemplate {
    name: "cta",
    system: SYSTEM_PROMPT,
    body: r#"Generate an engaging call-to-action for the blog post:
Title: {{$title}}
Goal: {{$goal}}

Create a compelling CTA that:
1. Aligns with the post content
2. Drives the desired action
3. Uses persuasive language
4. Maintains the post's tone

Return the CTA as plain text (not JSON formatted)."#,
};

pub const IMAGE_TEMPLATE: PromptTemplate = PromptTemplate {
    name: "image",
    system: SYSTEM_PROMPT,
    body: r#"Generate an image matching this description: {{$description}}
Style: {{$style}}

Return only the image URL."#,
};
