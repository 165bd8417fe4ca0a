//! Registration API HTTP client.

use crate::config::ClientConfig;
use crate::error::ClientError;
use allowlist_core::{ErrorResponse, MessageResponse, RegistrationRecord, SubmitRequest};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Client for the allowlist registration API.
#[derive(Clone)]
pub struct RegistrationClient {
    client: Client,
    base_url: String,
}

impl RegistrationClient {
    /// Create a new registration client.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    /// Create a client from configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::new(config.base_url.as_str(), config.timeout)
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check if the API is reachable.
    pub async fn health_check(&self) -> bool {
        self.client
            .get(self.url("/api/test"))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    /// Submit a registration, returning the server's confirmation message.
    #[instrument(skip(self, request), fields(wallet_address = %request.wallet_address))]
    pub async fn submit(&self, request: &SubmitRequest) -> Result<String, ClientError> {
        let response = self
            .client
            .post(self.url("/submit"))
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let body: MessageResponse = response.json().await?;
        debug!(message = %body.message, "Submission accepted");
        Ok(body.message)
    }

    /// Fetch every stored registration, newest first.
    #[instrument(skip(self))]
    pub async fn list_submissions(&self) -> Result<Vec<RegistrationRecord>, ClientError> {
        let response = self
            .client
            .get(self.url("/submissions"))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        Ok(response.json().await?)
    }

    /// Decode an error body, falling back to the raw text.
    async fn error_from_response(response: Response) -> ClientError {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let parsed = serde_json::from_str::<ErrorResponse>(&text).ok();

        if status == StatusCode::BAD_REQUEST {
            let (message, field) = match parsed {
                Some(body) => (body.error, body.field),
                None => (text, None),
            };
            warn!(%status, ?field, %message, "Submission rejected");
            return ClientError::Rejected { message, field };
        }

        let message = parsed.map(|body| body.error).unwrap_or(text);
        warn!(%status, %message, "Registration API error");
        ClientError::Server {
            status: status.as_u16(),
            message,
        }
    }
}
