//! HTTP client for paginated list endpoints.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{query::Query, types::PageResponse, Error};

/// Request timeout for page fetches.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client that fetches one page at a time.
///
/// Each request builds a fresh `reqwest::Client` with a 30-second timeout.
/// The client never retries; every failure is returned to the caller.
pub struct Client {
    /// Base URL for the API, without a trailing slash.
    base_api_url: String,
}

impl Client {
    /// Creates a new client rooted at `base_url`.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    /// Builds the full request URL for `path` with the query's parameters.
    pub fn page_url(&self, path: &str, query: &impl Query) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::InvalidUrl(e.to_string())
        })?;
        Ok(query.add_to_url(&url))
    }

    /// Sends a GET request and returns the raw body of a successful response.
    pub async fn get_body(&self, url: Url) -> Result<String, Error> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        let resp = client
            .get(url)
            .header("accept", "application/json, text/plain, */*")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        Ok(body)
    }

    /// Fetches the page the query points at.
    ///
    /// An empty body or a JSON `null` yields `Ok(None)`, which callers treat
    /// as an empty page.
    pub async fn get_page<T, Q>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Option<PageResponse<T>>, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.page_url(path, query)?;
        tracing::debug!("GET {}", url);
        let body = self.get_body(url).await?;
        parse_page(&body)
    }
}

/// Parses a page body. Blank bodies and `null` are an absent page.
pub fn parse_page<T: DeserializeOwned>(body: &str) -> Result<Option<PageResponse<T>>, Error> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str::<Option<PageResponse<T>>>(body).map_err(|e| {
        let snippet = truncate_body(body);
        tracing::error!("Failed to parse page: {} | body: {}", e, snippet);
        Error::ParseFailed(e.to_string())
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
