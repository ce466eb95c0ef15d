// src/lib.rs
//! notion2post library: drafts LinkedIn posts from Notion pages.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ValidationError`
//! - **Configuration**: `ServiceConfig`
//! - **Domain model**: `ContentItem`, `RelationSet`, `ContextDocument`
//! - **Content store**: `ContentStore`, `NotionHttpClient`
//! - **Generation**: `TextGenerator`, `AnthropicClient`
//! - **Pipeline**: `ContextAssembler`, `PromptBuilder`, `DraftPipeline`
//! - **HTTP**: `create_router`, `AppState`

pub mod api;
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod generation;
pub mod http;
pub mod model;
pub mod pipeline;
pub mod prompt;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionClientError, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::ServiceConfig;

// --- Domain Model ---
pub use crate::model::{
    ContentBlock, ContentItem, ContextDocument, RelatedItem, RelationLabel, RelationSet,
};

// --- Domain Types ---
pub use crate::types::{ApiKey, GeneratedPost, GenerationApiKey, NotionId, RenderedPrompt};

// --- Content Store ---
pub use crate::api::{ContentStore, NotionHttpClient, PropertyItem};

// --- Generation ---
pub use crate::generation::{AnthropicClient, TextGenerator};

// --- Pipeline ---
pub use crate::context::{ContextAssembler, RelationHydrator};
pub use crate::pipeline::{Draft, DraftError, DraftPipeline, DraftStage};
pub use crate::prompt::PromptBuilder;

// --- HTTP ---
pub use crate::http::{create_router, AppState, HttpError};
