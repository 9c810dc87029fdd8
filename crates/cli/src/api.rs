//! REST client for the books endpoints.

use async_trait::async_trait;
use bookstore_app::modules::books::models::{Book, CreateBook, DeletedBook};
use serde::de::DeserializeOwned;

/// Errors from the books API client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (connection refused, DNS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("books API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// The three operations the catalogue screen drives.
#[async_trait]
pub trait BooksApi: Send + Sync {
    async fn list_books(&self) -> Result<Vec<Book>, ApiError>;

    async fn create_book(&self, book: &CreateBook) -> Result<Book, ApiError>;

    async fn delete_book(&self, id: &str) -> Result<DeletedBook, ApiError>;
}

/// [`BooksApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBooksApi {
    client: reqwest::Client,
    api_url: String,
}

impl HttpBooksApi {
    /// Create a client for the API rooted at `api_url`, e.g.
    /// `http://localhost:5009/api`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { client, api_url }
    }

    fn books_url(&self) -> String {
        format!("{}/books", self.api_url)
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl BooksApi for HttpBooksApi {
    async fn list_books(&self) -> Result<Vec<Book>, ApiError> {
        let response = self.client.get(self.books_url()).send().await?;
        Self::parse_response(response).await
    }

    async fn create_book(&self, book: &CreateBook) -> Result<Book, ApiError> {
        let response = self
            .client
            .post(self.books_url())
            .json(book)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn delete_book(&self, id: &str) -> Result<DeletedBook, ApiError> {
        let response = self
            .client
            .delete(format!("{}/{}", self.books_url(), id))
            .send()
            .await?;
        Self::parse_response(response).await
    }
}
