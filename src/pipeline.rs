// src/pipeline.rs
//! The draft pipeline: assemble context → compose prompt → generate post.
//!
//! Both HTTP handlers run exactly this sequence and differ only in how they
//! read the page id and format the result.

use crate::api::ContentStore;
use crate::context::ContextAssembler;
use crate::error::AppError;
use crate::generation::TextGenerator;
use crate::model::ContextDocument;
use crate::prompt::PromptBuilder;
use crate::types::{GeneratedPost, NotionId};
use std::fmt;
use std::sync::Arc;

/// Pipeline stage, used to describe where a request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftStage {
    Assemble,
    Compose,
    Generate,
}

impl fmt::Display for DraftStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftStage::Assemble => write!(f, "content retrieval"),
            DraftStage::Compose => write!(f, "prompt composition"),
            DraftStage::Generate => write!(f, "post generation"),
        }
    }
}

/// A pipeline failure tagged with the stage that produced it.
#[derive(Debug, thiserror::Error)]
#[error("{stage} failed: {source}")]
pub struct DraftError {
    pub stage: DraftStage,
    #[source]
    pub source: AppError,
}

impl DraftError {
    fn at(stage: DraftStage) -> impl FnOnce(AppError) -> Self {
        move |source| DraftError { stage, source }
    }
}

/// A drafted post and the context it was drafted from.
#[derive(Debug, Clone)]
pub struct Draft {
    pub post: GeneratedPost,
    pub context: ContextDocument,
}

/// Runs the three stages in order, stopping at the first failure.
#[derive(Clone)]
pub struct DraftPipeline {
    assembler: ContextAssembler,
    prompts: PromptBuilder,
    generator: Arc<dyn TextGenerator>,
}

impl DraftPipeline {
    pub fn new(
        store: Arc<dyn ContentStore>,
        generator: Arc<dyn TextGenerator>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            assembler: ContextAssembler::new(store),
            prompts: PromptBuilder::new()?,
            generator,
        })
    }

    pub async fn draft(&self, page_id: &NotionId) -> Result<Draft, DraftError> {
        let context = self
            .assembler
            .assemble(page_id)
            .await
            .map_err(DraftError::at(DraftStage::Assemble))?;

        let prompt = self
            .prompts
            .build(&context)
            .map_err(DraftError::at(DraftStage::Compose))?;

        log::info!("Generating post for {} ({} prompt bytes)", page_id, prompt.as_str().len());
        let post = self
            .generator
            .generate(&prompt)
            .await
            .map_err(DraftError::at(DraftStage::Generate))?;

        log::info!("Post generated for {}: {} chars", page_id, post.as_str().chars().count());
        Ok(Draft { post, context })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockContentStore;
    use crate::api::PropertyItem;
    use crate::generation::mock::MockGenerator;
    use crate::model::{ContentItem, RelationLabel};

    const MAIN: &str = "550e8400e29b41d4a716446655440000";

    async fn seeded_store() -> Arc<MockContentStore> {
        let store = Arc::new(MockContentStore::new());
        let main = NotionId::parse(MAIN).unwrap();
        store.add_page(ContentItem::new(main.clone())).await;
        for label in RelationLabel::ALL {
            store
                .add_property(&main, label.property_name(), PropertyItem::relation(vec![]))
                .await;
        }
        store
    }

    #[tokio::test]
    async fn drafts_from_context_with_no_relations() {
        let store = seeded_store().await;
        let generator = Arc::new(MockGenerator::replying("Un post"));
        let pipeline = DraftPipeline::new(store, generator.clone()).unwrap();

        let draft = pipeline.draft(&NotionId::parse(MAIN).unwrap()).await.unwrap();

        assert_eq!(draft.post.as_str(), "Un post");
        assert_eq!(draft.context.related_count(), 0);
        let prompts = generator.prompts().await;
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("550e8400-e29b-41d4-a716-446655440000"));
    }

    #[tokio::test]
    async fn main_page_failure_skips_generation() {
        let store = Arc::new(MockContentStore::new());
        let generator = Arc::new(MockGenerator::replying("jamais"));
        let pipeline = DraftPipeline::new(store, generator.clone()).unwrap();

        let err = pipeline
            .draft(&NotionId::parse(MAIN).unwrap())
            .await
            .unwrap_err();

        assert_eq!(err.stage, DraftStage::Assemble);
        assert!(generator.prompts().await.is_empty());
    }

    #[tokio::test]
    async fn generation_failure_is_tagged() {
        let store = seeded_store().await;
        let pipeline = DraftPipeline::new(store, Arc::new(MockGenerator::failing())).unwrap();

        let err = pipeline
            .draft(&NotionId::parse(MAIN).unwrap())
            .await
            .unwrap_err();

        assert_eq!(err.stage, DraftStage::Generate);
        assert!(err.source.is_generation_failure());
        assert!(err.to_string().starts_with("post generation failed"));
    }
}
