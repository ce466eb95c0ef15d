// src/api/mod.rs
//! Notion API interaction: the ability to read pages, properties and blocks.
//!
//! Business logic depends on the [`ContentStore`] trait, never on HTTP
//! details, so the hydrator can be exercised against an in-memory store.

pub mod client;
pub mod parser;
pub mod responses;

#[cfg(test)]
pub(crate) mod mock;

use crate::error::AppError;
use crate::model::{ContentBlock, ContentItem};
use crate::types::NotionId;

pub use client::NotionHttpClient;
pub use responses::PropertyItem;

/// The three reads this service needs from a Notion workspace.
#[async_trait::async_trait]
pub trait ContentStore: Send + Sync {
    /// Retrieves a page object by id.
    async fn retrieve_page(&self, id: &NotionId) -> Result<ContentItem, AppError>;

    /// Retrieves one property of a page. `property` is the property name or id.
    async fn retrieve_property(
        &self,
        page: &NotionId,
        property: &str,
    ) -> Result<PropertyItem, AppError>;

    /// Lists the top-level child blocks of a block (or page).
    async fn list_children(&self, block: &NotionId) -> Result<Vec<ContentBlock>, AppError>;
}
