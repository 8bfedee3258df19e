//! PostgREST client for the hosted books table

use super::BookGateway;
use crate::constants::{BOOKS_TABLE, CONNECT_TIMEOUT_SECS, LIST_ORDER, REST_PATH};
use crate::error::{ConfigError, RemoteError};
use crate::settings::RemoteConfig;
use crate::types::{Book, BookDraft, BookId};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Error body PostgREST (and the Supabase gateway in front of it) sends on non-2xx
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

pub struct RestGateway {
    client: reqwest::Client,
    table_url: Url,
}

impl RestGateway {
    pub fn new(config: &RemoteConfig) -> Result<Self, ConfigError> {
        let mut key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| ConfigError::InvalidKey(e.to_string()))?;
        key.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| ConfigError::InvalidKey(e.to_string()))?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        let table_url = config
            .base_url
            .join(&format!("{}/{}", REST_PATH, BOOKS_TABLE))
            .map_err(|e| ConfigError::InvalidUrl {
                url: config.base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self { client, table_url })
    }

    fn by_id(&self, id: &BookId) -> Url {
        let mut url = self.table_url.clone();
        url.query_pairs_mut()
            .append_pair("id", &format!("eq.{}", id));
        url
    }
}

/// Pass 2xx through; turn anything else into the store's own message.
async fn check(response: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            debug!(status = status.as_u16(), error = %e, "Could not read error body");
            String::new()
        }
    };
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|e| match (e.message, e.details) {
            (Some(m), _) if !m.is_empty() => Some(m),
            (_, Some(d)) if !d.is_empty() => Some(d),
            _ => None,
        })
        .unwrap_or_else(|| {
            let body = body.trim();
            if body.is_empty() {
                format!("HTTP {}", status)
            } else {
                format!("HTTP {}: {}", status, body)
            }
        });

    debug!(status = status.as_u16(), message = %message, "Remote store rejected request");
    Err(RemoteError::Rejected {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl BookGateway for RestGateway {
    async fn list_all(&self) -> Result<Vec<Book>, RemoteError> {
        let response = self
            .client
            .get(self.table_url.clone())
            .query(&[("select", "*"), ("order", LIST_ORDER)])
            .send()
            .await?;
        let books: Vec<Book> = check(response).await?.json().await?;
        debug!(count = books.len(), "Fetched books");
        Ok(books)
    }

    async fn insert(&self, draft: &BookDraft) -> Result<(), RemoteError> {
        let response = self
            .client
            .post(self.table_url.clone())
            .header("Prefer", "return=minimal")
            .json(&[draft])
            .send()
            .await?;
        check(response).await?;
        debug!(name = %draft.name, pages = draft.pages, "Inserted book");
        Ok(())
    }

    async fn update(&self, id: &BookId, draft: &BookDraft) -> Result<(), RemoteError> {
        let response = self
            .client
            .patch(self.by_id(id))
            .header("Prefer", "return=minimal")
            .json(draft)
            .send()
            .await?;
        check(response).await?;
        debug!(id = %id, name = %draft.name, pages = draft.pages, "Updated book");
        Ok(())
    }

    async fn delete(&self, id: &BookId) -> Result<(), RemoteError> {
        let response = self.client.delete(self.by_id(id)).send().await?;
        check(response).await?;
        debug!(id = %id, "Deleted book");
        Ok(())
    }
}
