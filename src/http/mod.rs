// src/http/mod.rs
//! HTTP surface: two thin handlers over the shared draft pipeline.

mod handlers;
pub mod page;

pub use handlers::{GeneratePostRequest, GeneratePostResponse, PageQuery};
pub use page::PostPage;

use crate::api::ContentStore;
use crate::error::AppError;
use crate::generation::TextGenerator;
use crate::pipeline::{DraftError, DraftPipeline};
use crate::types::{NotionId, ValidationError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

/// Shared application state, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: DraftPipeline,
    pub page: PostPage,
    pub database_id: Option<NotionId>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ContentStore>,
        generator: Arc<dyn TextGenerator>,
        database_id: Option<NotionId>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            pipeline: DraftPipeline::new(store, generator)?,
            page: PostPage::new()?,
            database_id,
        })
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/generate-post-url",
            get(handlers::generate_post_url).fallback(handlers::method_not_allowed),
        )
        .route(
            "/generate-post",
            post(handlers::generate_post).fallback(handlers::method_not_allowed),
        )
        .with_state(state)
}

/// JSON error body. `message` is omitted when there is nothing safe to say.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Failures a handler can report to the caller.
#[derive(Debug)]
pub enum HttpError {
    MethodNotAllowed,
    MissingPageId,
    InvalidPageId(ValidationError),
    /// The pipeline failed. `describe_stage` adds a generic stage description
    /// to the body; upstream detail is only ever logged.
    Draft {
        error: DraftError,
        describe_stage: bool,
    },
    /// The result page could not be rendered.
    Render(AppError),
}

impl HttpError {
    fn status(&self) -> StatusCode {
        match self {
            HttpError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            HttpError::MissingPageId | HttpError::InvalidPageId(_) => StatusCode::BAD_REQUEST,
            HttpError::Draft { .. } | HttpError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            HttpError::MethodNotAllowed => ErrorBody {
                error: "Method not allowed",
                message: None,
            },
            HttpError::MissingPageId => ErrorBody {
                error: "Page ID is required",
                message: None,
            },
            HttpError::InvalidPageId(e) => ErrorBody {
                error: "Invalid page ID",
                message: Some(e.to_string()),
            },
            HttpError::Draft {
                error,
                describe_stage,
            } => ErrorBody {
                error: "Internal server error",
                message: describe_stage.then(|| format!("{} failed", error.stage)),
            },
            HttpError::Render(_) => ErrorBody {
                error: "Internal server error",
                message: Some("page rendering failed".to_string()),
            },
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        match &self {
            HttpError::Draft { error, .. } => log::error!("Error: {}", error),
            HttpError::Render(error) => log::error!("Error: {}", error),
            _ => log::debug!("Rejected request: {}", self.body().error),
        }
        (self.status(), Json(self.body())).into_response()
    }
}
