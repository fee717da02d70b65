//! Scripted text generator for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm::{GenerationError, PromptTemplate, PromptVars, TextGenerator};

type Responder = dyn Fn(&str, &PromptVars) -> Result<String, GenerationError> + Send + Sync;

/// Answers each call through a closure keyed on template name and variables,
/// and records every call in order.
pub struct ScriptedGenerator {
    responder: Box<Responder>,
    calls: Mutex<Vec<(String, PromptVars)>>,
}

impl ScriptedGenerator {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&str, &PromptVars) -> Result<String, GenerationError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Respond with the same text to every call
    pub fn constant(text: &str) -> Self {
        let text = text.to_string();
        Self::new(move |_, _| Ok(text.clone()))
    }

    pub fn calls(&self) -> Vec<(String, PromptVars)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn template_names(&self) -> Vec<String> {
        self.calls().into_iter().map(|(name, _)| name).collect()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn invoke(
        &self,
        template: &PromptTemplate,
        vars: &PromptVars,
    ) -> Result<String, GenerationError> {
        // Render so that tests also catch missing template variables
        template.render(vars)?;
        self.calls
            .lock()
            .unwrap()
            .push((template.name.to_string(), vars.clone()));
        (self.responder)(template.name, vars)
    }
}

/// A stand-in for a provider failure
pub fn provider_failure(message: &str) -> GenerationError {
    GenerationError::Api {
        status: 500,
        message: message.to_string(),
    }
}
