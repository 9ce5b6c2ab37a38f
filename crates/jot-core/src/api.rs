//! Typed HTTP client for the notes backend REST API.
//!
//! One method per backend operation. Non-2xx responses are translated into
//! a single user-facing message via the shared error body convention:
//! an optional JSON `{error, details?}` body, falling back to a synthesized
//! status-line message when the body is absent or not JSON.

use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::models::{CreateNote, Note};

/// HTTP client for the notes collection resource.
#[derive(Debug, Clone)]
pub struct NotesApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl NotesApiClient {
    /// Builds a client for the configured backend.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            base_url: config.base_url.clone(),
            client: reqwest::Client::builder().build()?,
        })
    }

    /// Returns the base URL this client was configured with.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the full note collection snapshot, in the backend's order
    /// (ascending creation order).
    pub async fn fetch_notes(&self) -> Result<Vec<Note>> {
        let response = self
            .client
            .get(format!("{}/notes", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(parse_api_error(status, &body)));
        }

        Ok(response.json::<Vec<Note>>().await?)
    }

    /// Creates a note with the given content.
    ///
    /// The created record in the response body is discarded: callers re-fetch
    /// the collection for authoritative state instead of trusting it.
    pub async fn create_note(&self, content: &str) -> Result<()> {
        let response = self
            .client
            .post(format!("{}/notes", self.base_url))
            .json(&CreateNote { content })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(parse_api_error(status, &body)));
        }

        Ok(())
    }

    /// Deletes a note by id.
    ///
    /// The backend answers 2xx for ids it no longer holds, so deleting a
    /// missing note is a silent no-op.
    pub async fn delete_note(&self, id: &str) -> Result<()> {
        let response = self
            .client
            .delete(format!("{}/notes/{id}", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(parse_api_error(status, &body)));
        }

        Ok(())
    }
}

/// Backend error body convention on non-2xx responses.
///
/// `details` also appears on the wire but is never surfaced; serde drops it
/// with the other unknown fields.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
}

/// Builds the user-facing message for a non-2xx response.
///
/// Uses the backend's `error` field verbatim when present and non-empty,
/// otherwise falls back to `HTTP error! status: <code> <statusText>`.
pub(crate) fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(message) = payload.error {
            let message = message.trim();
            if !message.is_empty() {
                return message.to_string();
            }
        }
    }

    format!(
        "HTTP error! status: {} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or_default()
    )
}
