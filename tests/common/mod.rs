// tests/common/mod.rs
//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use notion2post::{
    AppError, AppState, ContentBlock, ContentItem, ContentStore, GeneratedPost, NotionClientError,
    NotionId, PropertyItem, RelationLabel, RenderedPrompt, TextGenerator,
};
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

pub const MAIN: &str = "550e8400e29b41d4a716446655440000";
pub const PROJECT: &str = "11111111111111111111111111111111";
pub const CONTACT: &str = "22222222222222222222222222222222";
pub const WIKI: &str = "33333333333333333333333333333333";

pub fn id(raw: &str) -> NotionId {
    NotionId::parse(raw).expect("test ids are valid")
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

/// In-memory workspace keyed by raw ids.
#[derive(Default)]
pub struct StubStore {
    pages: RwLock<HashMap<String, ContentItem>>,
    relations: RwLock<HashMap<String, Vec<NotionId>>>,
    children: RwLock<HashMap<String, Vec<ContentBlock>>>,
    failing_pages: RwLock<HashSet<String>>,
}

impl StubStore {
    pub async fn add_page(&self, raw: &str, title: &str) {
        let item = ContentItem::new(id(raw)).with_property(
            "Nom",
            json!({ "id": "title", "type": "title", "title": [{ "plain_text": title }] }),
        );
        self.pages.write().await.insert(id(raw).as_str().to_string(), item);
        self.children.write().await.insert(
            id(raw).as_str().to_string(),
            vec![json!({ "type": "paragraph", "paragraph": { "text": title } })],
        );
    }

    pub async fn link(&self, label: RelationLabel, targets: &[&str]) {
        self.relations.write().await.insert(
            label.property_name().to_string(),
            targets.iter().map(|raw| id(raw)).collect(),
        );
    }

    pub async fn fail_page(&self, raw: &str) {
        self.failing_pages
            .write()
            .await
            .insert(id(raw).as_str().to_string());
    }

    /// A main page with a project, a contact and a wiki entry linked.
    pub async fn workspace() -> Arc<Self> {
        let store = Arc::new(Self::default());
        store.add_page(MAIN, "Lancement de l'offre").await;
        store.add_page(PROJECT, "Refonte du site").await;
        store.add_page(CONTACT, "Camille Martin").await;
        store.add_page(WIKI, "Charte éditoriale").await;
        store.link(RelationLabel::Projets, &[PROJECT]).await;
        store.link(RelationLabel::Contacts, &[CONTACT]).await;
        store.link(RelationLabel::Wiki, &[WIKI]).await;
        store
    }
}

#[async_trait::async_trait]
impl ContentStore for StubStore {
    async fn retrieve_page(&self, page: &NotionId) -> Result<ContentItem, AppError> {
        if self.failing_pages.read().await.contains(page.as_str()) {
            return Err(not_found(page.as_str()));
        }
        self.pages
            .read()
            .await
            .get(page.as_str())
            .cloned()
            .ok_or_else(|| not_found(page.as_str()))
    }

    async fn retrieve_property(
        &self,
        _page: &NotionId,
        property: &str,
    ) -> Result<PropertyItem, AppError> {
        Ok(PropertyItem::relation(
            self.relations
                .read()
                .await
                .get(property)
                .cloned()
                .unwrap_or_default(),
        ))
    }

    async fn list_children(&self, block: &NotionId) -> Result<Vec<ContentBlock>, AppError> {
        Ok(self
            .children
            .read()
            .await
            .get(block.as_str())
            .cloned()
            .unwrap_or_default())
    }
}

/// Generator that always answers with the same text and counts its calls.
pub struct StubGenerator {
    reply: String,
    prompts: RwLock<Vec<String>>,
}

impl StubGenerator {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            prompts: RwLock::new(Vec::new()),
        })
    }

    pub async fn calls(&self) -> usize {
        self.prompts.read().await.len()
    }

    pub async fn last_prompt(&self) -> Option<String> {
        self.prompts.read().await.last().cloned()
    }
}

#[async_trait::async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, prompt: &RenderedPrompt) -> Result<GeneratedPost, AppError> {
        self.prompts.write().await.push(prompt.as_str().to_string());
        Ok(GeneratedPost::new(self.reply.clone()))
    }
}

pub fn state(store: Arc<StubStore>, generator: Arc<StubGenerator>) -> AppState {
    AppState::new(store, generator, Some(id(MAIN))).expect("state builds")
}
