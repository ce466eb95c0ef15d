// src/http/handlers.rs
use super::{AppState, HttpError};
use crate::model::ContextDocument;
use crate::types::{GeneratedPost, NotionId};
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::Method,
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};

/// Query string of `GET /generate-post-url`.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(rename = "pageId")]
    pub page_id: Option<String>,
}

/// Body of `POST /generate-post`.
#[derive(Debug, Default, Deserialize)]
pub struct GeneratePostRequest {
    #[serde(rename = "pageId")]
    pub page_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GeneratePostResponse {
    pub success: bool,
    pub post: GeneratedPost,
    pub context: ContextDocument,
}

#[derive(Serialize)]
pub(super) struct HealthResponse {
    healthy: bool,
    version: &'static str,
    database_id: Option<String>,
}

pub(super) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        healthy: true,
        version: env!("CARGO_PKG_VERSION"),
        database_id: state.database_id.as_ref().map(NotionId::to_hyphenated),
    })
}

pub(super) async fn method_not_allowed(method: Method) -> HttpError {
    log::debug!("{} is not allowed here", method);
    HttpError::MethodNotAllowed
}

/// A blank or absent id is "missing"; anything else must parse as a Notion id.
fn require_page_id(raw: Option<String>) -> Result<NotionId, HttpError> {
    let raw = raw
        .filter(|value| !value.trim().is_empty())
        .ok_or(HttpError::MissingPageId)?;
    NotionId::parse(&raw).map_err(HttpError::InvalidPageId)
}

/// `GET /generate-post-url?pageId=…` → HTML page with the post.
///
/// A query string the extractor rejects (a repeated `pageId`, say) counts as
/// a missing id.
pub(super) async fn generate_post_url(
    State(state): State<AppState>,
    query: Option<Query<PageQuery>>,
) -> Result<Html<String>, HttpError> {
    let page_id = require_page_id(query.and_then(|Query(query)| query.page_id))?;

    let draft = state
        .pipeline
        .draft(&page_id)
        .await
        .map_err(|error| HttpError::Draft {
            error,
            describe_stage: true,
        })?;

    let html = state.page.render(&draft.post).map_err(HttpError::Render)?;
    Ok(Html(html))
}

/// `POST /generate-post` with `{"pageId": …}` → JSON with the post and its context.
///
/// The body is read raw so that an empty or malformed body reports a missing
/// id rather than an extractor rejection.
pub(super) async fn generate_post(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GeneratePostResponse>, HttpError> {
    let request: GeneratePostRequest = serde_json::from_slice(&body).unwrap_or_default();
    let page_id = require_page_id(request.page_id)?;

    let draft = state
        .pipeline
        .draft(&page_id)
        .await
        .map_err(|error| HttpError::Draft {
            error,
            describe_stage: false,
        })?;

    Ok(Json(GeneratePostResponse {
        success: true,
        post: draft.post,
        context: draft.context,
    }))
}
