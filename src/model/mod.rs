// src/model/mod.rs
//! Domain model for the content being turned into a post.
//!
//! The store owns the schema of pages and blocks, so both stay as JSON
//! values; only the shape this service relies on (ids, the relation
//! structure, the assembled document) is typed.

mod relations;

pub use relations::{RelationLabel, RelationSet};

use crate::types::NotionId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An opaque fragment of a page body, exactly as the store returned it.
pub type ContentBlock = Value;

/// A page retrieved from the content store.
///
/// `properties` holds the store-defined key/value set. Every other top-level
/// field of the page object (url, timestamps, parent, ...) is kept verbatim
/// in `attributes` so the serialized form matches what the store sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: NotionId,
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl ContentItem {
    pub fn new(id: NotionId) -> Self {
        Self {
            id,
            properties: Map::new(),
            attributes: Map::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: Value) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    /// Plain-text title, taken from whichever property has type `title`.
    pub fn title(&self) -> Option<String> {
        self.properties.values().find_map(|prop| {
            if prop.get("type")?.as_str()? != "title" {
                return None;
            }
            let text: String = prop
                .get("title")?
                .as_array()?
                .iter()
                .filter_map(|rt| rt.get("plain_text").and_then(Value::as_str))
                .collect();
            Some(text)
        })
    }
}

/// A page reached through a relation property, plus its top-level blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedItem {
    pub page: ContentItem,
    pub content: Vec<ContentBlock>,
}

/// Everything known about one content item: the page and its relations.
///
/// Built once per request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextDocument {
    main_page: ContentItem,
    relations: RelationSet,
}

impl ContextDocument {
    pub fn new(main_page: ContentItem, relations: RelationSet) -> Self {
        Self {
            main_page,
            relations,
        }
    }

    pub fn main_page(&self) -> &ContentItem {
        &self.main_page
    }

    pub fn relations(&self) -> &RelationSet {
        &self.relations
    }

    /// Total number of related pages across all relations.
    pub fn related_count(&self) -> usize {
        self.relations.total_items()
    }
}
