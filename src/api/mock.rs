// src/api/mock.rs
//! In-memory content store for unit tests.

use super::{ContentStore, PropertyItem};
use crate::error::{AppError, NotionClientError};
use crate::model::{ContentBlock, ContentItem};
use crate::types::NotionId;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

/// Serves pages, properties and children from maps, and records every call.
#[derive(Default)]
pub(crate) struct MockContentStore {
    pages: RwLock<HashMap<String, ContentItem>>,
    properties: RwLock<HashMap<(String, String), PropertyItem>>,
    children: RwLock<HashMap<String, Vec<ContentBlock>>>,
    failing: RwLock<HashSet<String>>,
    calls: RwLock<Vec<String>>,
}

impl MockContentStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn add_page(&self, page: ContentItem) {
        self.pages
            .write()
            .await
            .insert(page.id.as_str().to_string(), page);
    }

    pub(crate) async fn add_property(&self, page: &NotionId, name: &str, item: PropertyItem) {
        self.properties
            .write()
            .await
            .insert((page.as_str().to_string(), name.to_string()), item);
    }

    pub(crate) async fn add_children(&self, block: &NotionId, blocks: Vec<ContentBlock>) {
        self.children
            .write()
            .await
            .insert(block.as_str().to_string(), blocks);
    }

    /// Makes the call identified by `key` (as recorded in `calls`) fail.
    pub(crate) async fn fail_on(&self, key: impl Into<String>) {
        self.failing.write().await.insert(key.into());
    }

    pub(crate) async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }

    async fn record(&self, key: String) -> Result<(), AppError> {
        self.calls.write().await.push(key.clone());
        if self.failing.read().await.contains(&key) {
            return Err(not_found(&key));
        }
        Ok(())
    }
}

fn not_found(what: &str) -> AppError {
    NotionClientError::NotionApi {
        status: 404,
        code: "object_not_found".to_string(),
        message: format!("Could not find {}", what),
        request_id: None,
    }
    .into()
}

#[async_trait::async_trait]
impl ContentStore for MockContentStore {
    async fn retrieve_page(&self, id: &NotionId) -> Result<ContentItem, AppError> {
        let key = format!("page:{}", id.as_str());
        self.record(key.clone()).await?;
        self.pages
            .read()
            .await
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| not_found(&key))
    }

    async fn retrieve_property(
        &self,
        page: &NotionId,
        property: &str,
    ) -> Result<PropertyItem, AppError> {
        let key = format!("property:{}:{}", page.as_str(), property);
        self.record(key.clone()).await?;
        self.properties
            .read()
            .await
            .get(&(page.as_str().to_string(), property.to_string()))
            .cloned()
            .ok_or_else(|| not_found(&key))
    }

    async fn list_children(&self, block: &NotionId) -> Result<Vec<ContentBlock>, AppError> {
        self.record(format!("children:{}", block.as_str())).await?;
        Ok(self
            .children
            .read()
            .await
            .get(block.as_str())
            .cloned()
            .unwrap_or_default())
    }
}
