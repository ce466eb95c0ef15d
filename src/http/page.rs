// src/http/page.rs
//! HTML result page with a copy-to-clipboard button.

use crate::error::AppError;
use crate::types::GeneratedPost;
use handlebars::Handlebars;
use serde_json::json;

const TEMPLATE_NAME: &str = "post-page";
const TEMPLATE_SOURCE: &str = include_str!("../../templates/post-page.hbs");

/// Renders a generated post into the result page.
#[derive(Clone)]
pub struct PostPage {
    registry: Handlebars<'static>,
}

impl PostPage {
    pub fn new() -> Result<Self, AppError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(escape_html_text);
        registry
            .register_template_string(TEMPLATE_NAME, TEMPLATE_SOURCE)
            .map_err(|e| AppError::TemplateRenderError {
                name: TEMPLATE_NAME.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { registry })
    }

    pub fn render(&self, post: &GeneratedPost) -> Result<String, AppError> {
        let data = json!({
            "post": post.as_str(),
            "post_literal": escape_template_literal(post.as_str()),
        });
        self.registry
            .render(TEMPLATE_NAME, &data)
            .map_err(|e| AppError::TemplateRenderError {
                name: TEMPLATE_NAME.to_string(),
                message: e.to_string(),
            })
    }
}

/// Escapes text placed inside an element body (`<pre>`).
pub fn escape_html_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}

/// Escapes text embedded in a JavaScript template literal inside `<script>`.
///
/// Backslashes, backticks and `${` would end or alter the literal. Every `<`
/// becomes `\x3C` so neither `</script>` nor `<!--` can reach the HTML parser.
pub fn escape_template_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '`' => out.push_str("\\`"),
            '<' => out.push_str("\\x3C"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            other => out.push(other),
        }
    }
    out
}
