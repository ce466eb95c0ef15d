// src/prompt/mod.rs
//! Composes the generation prompt from a context document.
//!
//! The context is serialized as pretty-printed JSON and dropped into a fixed
//! French instruction template. Serialization order follows the document
//! (relation labels in fetch order), so the same document always yields the
//! same prompt bytes.

use crate::error::AppError;
use crate::model::ContextDocument;
use crate::types::RenderedPrompt;
use handlebars::Handlebars;
use serde_json::json;

const TEMPLATE_NAME: &str = "linkedin-post";
const TEMPLATE_SOURCE: &str = include_str!("../../templates/linkedin-post.hbs");

/// Renders context documents into prompt text.
#[derive(Clone)]
pub struct PromptBuilder {
    registry: Handlebars<'static>,
}

impl PromptBuilder {
    /// Registers the built-in template. Escaping is off: the prompt is plain
    /// text and the JSON must reach the model unchanged.
    pub fn new() -> Result<Self, AppError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        registry
            .register_template_string(TEMPLATE_NAME, TEMPLATE_SOURCE)
            .map_err(|e| AppError::TemplateRenderError {
                name: TEMPLATE_NAME.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { registry })
    }

    pub fn build(&self, document: &ContextDocument) -> Result<RenderedPrompt, AppError> {
        let context_json = serde_json::to_string_pretty(document)?;

        let rendered = self
            .registry
            .render(TEMPLATE_NAME, &json!({ "context": context_json }))
            .map_err(|e| AppError::TemplateRenderError {
                name: TEMPLATE_NAME.to_string(),
                message: e.to_string(),
            })?;

        let prompt = RenderedPrompt::new(rendered.trim_end().to_string());
        log::debug!(
            "Prompt composed: {} bytes ({} bytes of context)",
            prompt.as_str().len(),
            context_json.len()
        );
        Ok(prompt)
    }
}
