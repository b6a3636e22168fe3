use anisync_core::{Endpoints, RecordSource};
use anisync_types::{Service, Snapshot};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::types::decode_library;
use crate::{ClientConfig, ClientError};

/// Reads a user's library from hummingbird.me.
pub struct HummingbirdSource {
    client: Client,
    config: ClientConfig,
    url: String,
}

impl HummingbirdSource {
    pub fn new(
        config: ClientConfig,
        endpoints: &Endpoints,
        username: &str,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;
        let url = endpoints.library_url(Service::Hummingbird, username);
        Ok(Self {
            client,
            config,
            url,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch_with_retry(&self) -> Result<String, ClientError> {
        let retry = self.config.retry;
        let mut attempts = 0;
        let mut delay = retry.base_delay_ms;

        loop {
            attempts += 1;
            match self.fetch_once().await {
                Ok(body) => return Ok(body),
                Err(ClientError::RateLimited { retry_after }) => {
                    if attempts > retry.max_retries {
                        return Err(ClientError::Timeout(attempts));
                    }
                    let wait =
                        retry_after.map_or(Duration::from_millis(delay), Duration::from_secs);
                    tracing::debug!("Rate limited, waiting {:?} (attempt {})", wait, attempts);
                    tokio::time::sleep(wait).await;
                    delay = (delay * 2).min(retry.max_delay_ms);
                }
                Err(ClientError::ServerError { status, .. }) if status >= 500 => {
                    if attempts > retry.max_retries {
                        return Err(ClientError::Timeout(attempts));
                    }
                    tracing::debug!("Server error {}, retrying (attempt {})", status, attempts);
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(retry.max_delay_ms);
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_once(&self) -> Result<String, ClientError> {
        let resp = self.client.get(&self.url).send().await?;
        let status = resp.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok());
            return Err(ClientError::RateLimited { retry_after });
        }

        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ClientError::ServerError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.text().await?)
    }
}

#[async_trait]
impl RecordSource for HummingbirdSource {
    type Error = ClientError;

    fn service(&self) -> Service {
        Service::Hummingbird
    }

    async fn fetch(&self) -> Result<Snapshot, ClientError> {
        let body = self.fetch_with_retry().await?;
        let snapshot = decode_library(&body)?;
        tracing::info!(service = %Service::Hummingbird, count = snapshot.len(), "fetched library");
        Ok(snapshot)
    }
}
