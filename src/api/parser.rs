// src/api/parser.rs
//! Turns raw Notion API responses into domain values.
//!
//! Every parser takes the status-tagged body from
//! [`extract_response_text`](super::client::extract_response_text), so error
//! envelopes are mapped the same way regardless of endpoint.

use super::client::ApiResponse;
use super::responses::{NotionError, PropertyItem, RetrieveBlockChildrenResponse};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionClientError, NotionErrorCode};
use crate::model::{ContentBlock, ContentItem};
use crate::types::NotionId;
use reqwest::StatusCode;
use serde_json::Value;

/// Parse any Notion API response body, mapping error statuses to `AppError`.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_body(&result.data, &result.url)
    } else {
        Err(parse_error(&result.data, result.status, &result.url))
    }
}

fn parse_body<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        NotionClientError::Deserialization {
            source: e,
            body: preview(body),
        }
        .into()
    })
}

fn parse_error(body: &str, status: StatusCode, url: &str) -> AppError {
    // Try Notion's error envelope first
    if let Ok(notion_error) = serde_json::from_str::<NotionError>(body) {
        return NotionClientError::from(notion_error).into();
    }

    AppError::NotionService {
        code: NotionErrorCode::from_http_status(status.as_u16()),
        message: format!("HTTP {} from {}", status, url),
        status,
    }
}

fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let head: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", head)
    } else {
        body.to_string()
    }
}

/// Parse a `GET pages/{id}` response.
pub fn parse_page_response(result: ApiResponse<String>) -> Result<ContentItem, AppError> {
    parse_api_response(result)
}

/// Parse a `GET blocks/{id}/children` response. Only the first page of results is kept.
pub fn parse_children_response(
    result: ApiResponse<String>,
) -> Result<Vec<ContentBlock>, AppError> {
    let url = result.url.clone();
    let response: RetrieveBlockChildrenResponse = parse_api_response(result)?;
    if response.has_more {
        log::debug!(
            "{} has more children than the first page; only {} kept",
            url,
            response.results.len()
        );
    }
    Ok(response.results)
}

/// Parse a `GET pages/{id}/properties/{property}` response.
pub fn parse_property_response(result: ApiResponse<String>) -> Result<PropertyItem, AppError> {
    let value: Value = parse_api_response(result)?;
    property_item_from_value(&value)
}

/// Reads a property item from either response shape Notion uses.
///
/// Paginated properties (relations among them) come back as a `list` whose
/// `property_item.type` names the property kind and whose `results` hold one
/// item per linked page. Single-value properties come back as one
/// `property_item` object.
pub fn property_item_from_value(value: &Value) -> Result<PropertyItem, AppError> {
    let object = value.get("object").and_then(Value::as_str).unwrap_or("");

    match object {
        "list" => {
            let kind = value
                .pointer("/property_item/type")
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            if kind != "relation" {
                return Ok(PropertyItem::Other {
                    kind: kind.to_string(),
                });
            }

            let results = value
                .get("results")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let linked = results
                .iter()
                .filter_map(|item| item.get("relation"))
                .map(relation_reference)
                .collect::<Result<Vec<_>, _>>()?;
            let has_more = value
                .get("has_more")
                .and_then(Value::as_bool)
                .unwrap_or(false);

            Ok(PropertyItem::Relation { linked, has_more })
        }
        "property_item" => {
            let kind = value.get("type").and_then(Value::as_str).unwrap_or("unknown");
            if kind != "relation" {
                return Ok(PropertyItem::Other {
                    kind: kind.to_string(),
                });
            }

            let linked = match value.get("relation") {
                Some(Value::Array(refs)) => refs
                    .iter()
                    .map(relation_reference)
                    .collect::<Result<Vec<_>, _>>()?,
                Some(reference @ Value::Object(_)) => vec![relation_reference(reference)?],
                _ => Vec::new(),
            };

            Ok(PropertyItem::relation(linked))
        }
        other => Err(AppError::MalformedResponse(format!(
            "Expected a property item or list, got object '{}'",
            other
        ))),
    }
}

fn relation_reference(reference: &Value) -> Result<NotionId, AppError> {
    let id = reference
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::MalformedResponse("Relation entry without id".to_string()))?;
    Ok(NotionId::parse(id)?)
}
