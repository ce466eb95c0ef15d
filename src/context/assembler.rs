// src/context/assembler.rs
use super::RelationHydrator;
use crate::api::ContentStore;
use crate::error::AppError;
use crate::model::{ContextDocument, RelationLabel};
use crate::types::NotionId;
use std::sync::Arc;

/// Builds the [`ContextDocument`] for a content page.
#[derive(Clone)]
pub struct ContextAssembler {
    store: Arc<dyn ContentStore>,
    hydrator: RelationHydrator,
}

impl ContextAssembler {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        let hydrator = RelationHydrator::new(store.clone());
        Self { store, hydrator }
    }

    /// Retrieves the main page, then hydrates all five relations.
    ///
    /// A failure to retrieve the main page is returned as-is; relation
    /// failures are absorbed by the hydrator.
    pub async fn assemble(&self, page_id: &NotionId) -> Result<ContextDocument, AppError> {
        log::info!("Retrieving content page {}", page_id);
        let main_page = self.store.retrieve_page(page_id).await?;
        log::info!(
            "Main page: {}",
            main_page.title().as_deref().unwrap_or("(untitled)")
        );

        let relations = self.hydrator.hydrate(page_id, &RelationLabel::ALL).await;

        let document = ContextDocument::new(main_page, relations);
        log::info!(
            "Context assembled for {}: {} related page(s)",
            page_id,
            document.related_count()
        );
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockContentStore;
    use crate::api::PropertyItem;
    use crate::model::ContentItem;
    use serde_json::json;

    const MAIN: &str = "550e8400e29b41d4a716446655440000";

    #[tokio::test]
    async fn assembles_main_page_and_relations() {
        let store = Arc::new(MockContentStore::new());
        let main = NotionId::parse(MAIN).unwrap();
        store
            .add_page(ContentItem::new(main.clone()).with_property("Statut", json!({ "type": "status" })))
            .await;
        for label in RelationLabel::ALL {
            store
                .add_property(&main, label.property_name(), PropertyItem::relation(vec![]))
                .await;
        }

        let document = ContextAssembler::new(store).assemble(&main).await.unwrap();

        assert_eq!(document.main_page().id, main);
        assert!(document.main_page().properties.contains_key("Statut"));
        assert_eq!(document.relations().len(), 5);
    }

    #[tokio::test]
    async fn main_page_failure_is_fatal_and_skips_relations() {
        let store = Arc::new(MockContentStore::new());
        let main = NotionId::parse(MAIN).unwrap();

        let result = ContextAssembler::new(store.clone()).assemble(&main).await;

        assert!(matches!(result, Err(ref e) if e.is_content_store_failure()));
        assert_eq!(store.calls().await, vec![format!("page:{}", MAIN)]);
    }
}
