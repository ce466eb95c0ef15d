// src/generation/mock.rs
//! Scripted generator for unit tests.

use super::TextGenerator;
use crate::error::AppError;
use crate::types::{GeneratedPost, RenderedPrompt};
use tokio::sync::RwLock;

/// Returns a fixed reply (or fails) and keeps every prompt it was given.
pub(crate) struct MockGenerator {
    reply: Option<String>,
    prompts: RwLock<Vec<String>>,
}

impl MockGenerator {
    pub(crate) fn replying(text: impl Into<String>) -> Self {
        Self {
            reply: Some(text.into()),
            prompts: RwLock::new(Vec::new()),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            reply: None,
            prompts: RwLock::new(Vec::new()),
        }
    }

    pub(crate) async fn prompts(&self) -> Vec<String> {
        self.prompts.read().await.clone()
    }
}

#[async_trait::async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &RenderedPrompt) -> Result<GeneratedPost, AppError> {
        self.prompts.write().await.push(prompt.as_str().to_string());
        match &self.reply {
            Some(text) => Ok(GeneratedPost::new(text.clone())),
            None => Err(AppError::GenerationService {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                kind: "api_error".to_string(),
                message: "scripted failure".to_string(),
            }),
        }
    }
}
