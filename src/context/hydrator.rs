// src/context/hydrator.rs
//! Relation hydration: follows each relation property of a page and loads the
//! linked pages together with their top-level blocks.
//!
//! Every call is awaited in order. A failure while hydrating one relation is
//! logged and leaves that relation empty; siblings and the caller never see it.

use crate::api::ContentStore;
use crate::error::AppError;
use crate::model::{RelatedItem, RelationLabel, RelationSet};
use crate::types::NotionId;
use std::sync::Arc;

/// Loads relation properties of a page through a [`ContentStore`].
#[derive(Clone)]
pub struct RelationHydrator {
    store: Arc<dyn ContentStore>,
}

impl RelationHydrator {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// Hydrates `labels` for `page_id`. Every label ends up in the result,
    /// mapped to an empty sequence when it has nothing to contribute.
    pub async fn hydrate(&self, page_id: &NotionId, labels: &[RelationLabel]) -> RelationSet {
        let mut relations = RelationSet::default();

        for &label in labels {
            let items = match self.hydrate_relation(page_id, label).await {
                Ok(items) => items,
                Err(e) => {
                    let hint = if e.is_not_found() {
                        " (is the page shared with the integration?)"
                    } else {
                        ""
                    };
                    log::warn!(
                        "Error fetching relation {} of {}: {}{}",
                        label,
                        page_id,
                        e,
                        hint
                    );
                    Vec::new()
                }
            };
            relations.insert(label, items);
        }

        relations
    }

    async fn hydrate_relation(
        &self,
        page_id: &NotionId,
        label: RelationLabel,
    ) -> Result<Vec<RelatedItem>, AppError> {
        let property = self
            .store
            .retrieve_property(page_id, label.property_name())
            .await?;

        let Some(linked) = property.linked_pages() else {
            log::debug!(
                "Property {} is of type '{}', not a relation",
                label,
                property.kind()
            );
            return Ok(Vec::new());
        };

        if property.has_more() {
            log::debug!(
                "Relation {} links more pages than the first page of results; only {} followed",
                label,
                linked.len()
            );
        }

        if linked.is_empty() {
            log::debug!("Relation {} has no linked pages", label);
            return Ok(Vec::new());
        }

        let mut items = Vec::with_capacity(linked.len());
        for id in linked {
            let page = self.store.retrieve_page(id).await?;
            let content = self.store.list_children(id).await?;
            items.push(RelatedItem { page, content });
        }

        log::debug!("Relation {}: {} linked page(s)", label, items.len());
        Ok(items)
    }
}
