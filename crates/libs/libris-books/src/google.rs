//! Google Books API client.

use crate::book::Book;
use crate::error::{BooksError, BooksResult};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

pub const GOOGLE_BOOKS_API: &str = "https://www.googleapis.com/books/v1";

/// Every way a volume can end up in a user's library.
const ACQUIRE_METHODS: [&str; 7] = [
    "FAMILY_SHARED",
    "PREORDERED",
    "PUBLIC_DOMAIN",
    "PURCHASED",
    "RENTED",
    "SAMPLE",
    "UPLOADED",
];

/// Something that can list the books a bearer token gives access to.
#[async_trait]
pub trait BookLibrary: Send + Sync {
    async fn list_books(&self, access_token: &str) -> BooksResult<Vec<Book>>;
}

/// One page of `volumes/mybooks`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volumes {
    #[serde(default)]
    pub total_items: u64,
    #[serde(default)]
    pub items: Vec<Volume>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    #[serde(default)]
    pub volume_info: VolumeInfo,
    #[serde(default)]
    pub access_info: AccessInfo,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub publisher: String,
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub industry_identifiers: Vec<IndustryIdentifier>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndustryIdentifier {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub identifier: String,
}

/// Only the presence of the download descriptors matters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessInfo {
    pub pdf: Option<serde_json::Value>,
    pub epub: Option<serde_json::Value>,
}

#[derive(Clone)]
pub struct GoogleBooksClient {
    http_client: Client,
    base_url: String,
}

impl GoogleBooksClient {
    pub fn new(timeout: Duration) -> BooksResult<Self> {
        Self::with_base_url(GOOGLE_BOOKS_API, timeout)
    }

    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> BooksResult<Self> {
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_page(&self, access_token: &str, start_index: u64) -> BooksResult<Volumes> {
        let mut query: Vec<(&str, String)> = ACQUIRE_METHODS
            .iter()
            .map(|method| ("acquireMethod", method.to_string()))
            .collect();
        query.push(("processingState", "COMPLETED_SUCCESS".to_string()));
        query.push(("startIndex", start_index.to_string()));

        let response = self
            .http_client
            .get(format!("{}/volumes/mybooks", self.base_url))
            .bearer_auth(access_token)
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(BooksError::TokenRejected);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "Listing volumes failed: {}", body);
            return Err(BooksError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl BookLibrary for GoogleBooksClient {
    async fn list_books(&self, access_token: &str) -> BooksResult<Vec<Book>> {
        info!("Getting the user's books");

        let mut books = Vec::new();
        let mut next_index = 0;
        let mut total_items;

        loop {
            let page = self.fetch_page(access_token, next_index).await?;
            debug!(
                start_index = next_index,
                received = page.items.len(),
                "Fetched a page of volumes"
            );

            books.extend(page.items.iter().map(Book::from));

            next_index += page.items.len() as u64;
            total_items = page.total_items;

            if page.items.is_empty() || next_index >= total_items {
                break;
            }
        }

        info!(
            "{} books processed (of a total of {})",
            books.len(),
            total_items
        );
        Ok(books)
    }
}
