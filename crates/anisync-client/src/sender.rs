use anisync_core::{RequestSender, ResponseValidator};
use anisync_types::{Credential, PushError, PushRequest, PushResponse};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

use crate::{ClientConfig, ClientError};

/// Sends every request of a batch at once over one shared connection pool.
#[derive(Debug, Clone)]
pub struct HttpSender {
    client: Client,
}

impl HttpSender {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }
}

async fn send_one(client: &Client, request: PushRequest) -> Result<PushResponse, reqwest::Error> {
    let PushRequest {
        url,
        mut form,
        credential,
    } = request;
    let mut builder = client.post(&url);
    match credential {
        Credential::Token { token } => form.set("auth_token", token),
        Credential::Basic { username, password } => {
            builder = builder.basic_auth(username, Some(password));
        }
    }

    let resp = builder
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(form.encode())
        .send()
        .await?;
    let status = resp.status().as_u16();
    let body = resp.text().await?;
    Ok(PushResponse { status, body })
}

#[async_trait]
impl RequestSender for HttpSender {
    async fn send_many(
        &self,
        requests: Vec<PushRequest>,
        timeout: Duration,
        validator: ResponseValidator,
    ) -> Result<(), PushError> {
        let total = requests.len();
        let mut tasks = JoinSet::new();
        for request in requests {
            let client = self.client.clone();
            let validator = Arc::clone(&validator);
            tasks.spawn(async move {
                let url = request.url.clone();
                let response = send_one(&client, request)
                    .await
                    .map_err(|e| PushError::request_failed(format!("{url}: {e}")))?;
                validator(&response)
                    .map_err(|reason| PushError::request_failed(format!("{url}: {reason}")))
            });
        }

        let drained = tokio::time::timeout(timeout, async {
            while let Some(joined) = tasks.join_next().await {
                joined.map_err(PushError::request_failed)??;
            }
            Ok::<(), PushError>(())
        })
        .await;

        let result = drained.unwrap_or_else(|_| {
            Err(PushError::BatchTimeout {
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            })
        });

        match &result {
            Ok(()) => tracing::debug!(total, "batch sent"),
            Err(e) => {
                // Requests still in flight run to completion; their results are dropped.
                let in_flight = tasks.len();
                tasks.detach_all();
                tracing::warn!(total, in_flight, "batch failed: {}", e);
            }
        }
        result
    }
}
