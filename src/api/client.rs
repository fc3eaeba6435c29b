//! REST client for the program collection.
//!
//! Speaks plain JSON over HTTP against `{base_url}/api/programs`:
//!
//! | op     | method | path                  | body        |
//! |--------|--------|-----------------------|-------------|
//! | list   | GET    | `api/programs`        | —           |
//! | create | POST   | `api/programs`        | draft       |
//! | update | PUT    | `api/programs/{id}`   | full record |
//! | delete | DELETE | `api/programs/{id}`   | —           |
//!
//! Error responses are expected to carry a JSON body with a `detail`
//! field (Connexion's problem format); when they don't, the raw body is
//! used verbatim.

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;

use crate::api::{ApiError, ProgramApi};
use crate::core::program::{Program, ProgramDraft, ProgramId};

/// Error body shape the backend sends for failed requests.
#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

pub struct RestClient {
    base_url: String,
    client: reqwest::Client,
}

impl RestClient {
    pub fn new(base_url: String) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Build on a preconfigured reqwest client. Tests use this to turn off
    /// proxy discovery so transport failures stay transport failures.
    pub fn with_client(base_url: String, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/api/programs", self.base_url)
    }

    fn record_url(&self, id: ProgramId) -> String {
        format!("{}/api/programs/{}", self.base_url, id)
    }

    /// Turn a non-2xx response into an `ApiError::Api`, pulling the
    /// server's `detail` field out of the body when it's there.
    async fn error_from_response(response: reqwest::Response) -> ApiError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .map(|e| e.detail)
            .unwrap_or(body);
        ApiError::Api {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
            detail,
        }
    }

    /// Check the status and decode a JSON success body.
    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Network(e.to_string())
    }
}

#[async_trait]
impl ProgramApi for RestClient {
    async fn list(&self) -> Result<Vec<Program>, ApiError> {
        debug!("GET {}", self.collection_url());
        let response = self.client.get(self.collection_url()).send().await?;
        Self::decode(response).await
    }

    async fn create(&self, draft: &ProgramDraft) -> Result<Program, ApiError> {
        debug!("POST {}", self.collection_url());
        let response = self
            .client
            .post(self.collection_url())
            .json(draft)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn update(&self, id: ProgramId, draft: &ProgramDraft) -> Result<Program, ApiError> {
        debug!("PUT {}", self.record_url(id));
        // The update body carries the id, matching the backend's schema.
        let record = draft.clone().with_id(id);
        let response = self
            .client
            .put(self.record_url(id))
            .json(&record)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn delete(&self, id: ProgramId) -> Result<(), ApiError> {
        debug!("DELETE {}", self.record_url(id));
        let response = self.client.delete(self.record_url(id)).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        // Delete's response body is unspecified; only the status matters.
        Ok(())
    }
}
