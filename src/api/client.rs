// src/api/client.rs
//! Thin HTTP client for the Notion API.
//!
//! Handles authentication and request/response plumbing. Parsing lives in
//! [`parser`](super::parser).

use super::parser;
use super::responses::PropertyItem;
use crate::constants::{NOTION_API_BASE_URL, NOTION_VERSION};
use crate::error::AppError;
use crate::model::{ContentBlock, ContentItem};
use crate::types::{ApiKey, NotionId};
use reqwest::{header, Client, Response, Url};

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: Url,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(api_key: &ApiKey) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .build()?;
        let base_url = Url::parse(NOTION_API_BASE_URL).map_err(|e| {
            AppError::MissingConfiguration(format!("Invalid Notion base URL: {}", e))
        })?;
        Ok(Self { client, base_url })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Builds an endpoint URL from path segments. Segments are percent-encoded,
    /// so property names with spaces or accents are safe.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                AppError::MissingConfiguration("Notion base URL cannot have a path".to_string())
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Makes a GET request to the endpoint named by `segments`.
    pub async fn get(&self, segments: &[&str]) -> Result<Response, AppError> {
        let url = self.endpoint(segments)?;
        log::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        log::debug!("{} -> {}", response.url().path(), response.status());

        Ok(response)
    }
}

#[async_trait::async_trait]
impl super::ContentStore for NotionHttpClient {
    async fn retrieve_page(&self, id: &NotionId) -> Result<ContentItem, AppError> {
        let response = self.get(&["pages", &id.to_hyphenated()]).await?;
        let result = extract_response_text(response).await?;
        parser::parse_page_response(result)
    }

    async fn retrieve_property(
        &self,
        page: &NotionId,
        property: &str,
    ) -> Result<PropertyItem, AppError> {
        let response = self
            .get(&["pages", &page.to_hyphenated(), "properties", property])
            .await?;
        let result = extract_response_text(response).await?;
        parser::parse_property_response(result)
    }

    async fn list_children(&self, block: &NotionId) -> Result<Vec<ContentBlock>, AppError> {
        let response = self
            .get(&["blocks", &block.to_hyphenated(), "children"])
            .await?;
        let result = extract_response_text(response).await?;
        parser::parse_children_response(result)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text, keeping status and URL for error reporting.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
