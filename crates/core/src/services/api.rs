//! Registration backend client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, warn};

use crate::{error::ApiError, forms::ProsumerRecord};

/// Path of the prosumer registration endpoint.
pub const PROSUMERS_PATH: &str = "/api/prosumers";

/// Backend operations used by the client.
#[async_trait]
pub trait ProsumerApi: Send + Sync {
    /// Register a prosumer. Any non-success status is an error.
    async fn register(&self, record: &ProsumerRecord) -> Result<(), ApiError>;
}

/// [`ProsumerApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpProsumerApi {
    client: Client,
    endpoint: Url,
}

impl HttpProsumerApi {
    /// Client posting to `{base_url}/api/prosumers`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let endpoint = format!("{}{}", base_url.trim_end_matches('/'), PROSUMERS_PATH);
        let endpoint = Url::parse(&endpoint).map_err(|_| ApiError::InvalidUrl(endpoint))?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    /// Full endpoint URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ProsumerApi for HttpProsumerApi {
    async fn register(&self, record: &ProsumerRecord) -> Result<(), ApiError> {
        debug!(endpoint = %self.endpoint, "Posting prosumer registration");
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(record)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "Prosumer registration rejected");
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }
}
