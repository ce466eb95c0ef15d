// src/api/responses.rs
//! Response shapes returned by the Notion API.

use crate::types::NotionId;
use serde::{Deserialize, Serialize};

// Notion's error envelope, parsed through notion-client's type.
pub use notion_client::objects::error::Error as NotionError;

/// Generic paginated response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub object: String,
    pub results: Vec<T>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

/// Block children response. Blocks stay opaque.
pub type RetrieveBlockChildrenResponse = PaginatedResponse<serde_json::Value>;

/// Typed view of a page property lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyItem {
    /// A relation property and the pages it links to, in store order.
    Relation {
        linked: Vec<NotionId>,
        /// The store reported more linked pages than it returned.
        has_more: bool,
    },
    /// Any non-relation property; `kind` is the store's type tag.
    Other { kind: String },
}

impl PropertyItem {
    pub fn relation(linked: Vec<NotionId>) -> Self {
        PropertyItem::Relation {
            linked,
            has_more: false,
        }
    }

    /// Linked page ids, or `None` when this is not a relation.
    pub fn linked_pages(&self) -> Option<&[NotionId]> {
        match self {
            PropertyItem::Relation { linked, .. } => Some(linked),
            PropertyItem::Other { .. } => None,
        }
    }

    /// Whether the store holds more linked pages than it returned.
    pub fn has_more(&self) -> bool {
        matches!(self, PropertyItem::Relation { has_more: true, .. })
    }

    pub fn kind(&self) -> &str {
        match self {
            PropertyItem::Relation { .. } => "relation",
            PropertyItem::Other { kind } => kind,
        }
    }
}
