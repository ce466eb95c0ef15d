// src/generation/mod.rs
//! Text generation: the ability to turn a prompt into a drafted post.

mod anthropic;

#[cfg(test)]
pub(crate) mod mock;

pub use anthropic::{AnthropicClient, ContentFragment, Message, MessagesRequest, MessagesResponse};

use crate::error::AppError;
use crate::types::{GeneratedPost, RenderedPrompt};

/// A single-shot language model: one prompt in, one text out.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &RenderedPrompt) -> Result<GeneratedPost, AppError>;
}
