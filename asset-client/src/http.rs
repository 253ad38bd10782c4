//! HTTP transport to the sheet service
//!
//! Reads check the status and decode the body. Writes are fire-and-forget:
//! the script's reply is never inspected, only a failed send is an error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header};
use serde_json::Value;

use crate::{ClientConfig, ClientError, ClientResult};

/// Transport used by [`crate::AssetClient`]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// GET and decode a JSON body
    async fn get_json(&self, url: &str) -> ClientResult<Value>;

    /// GET a text body (CSV export)
    async fn get_text(&self, url: &str) -> ClientResult<String>;

    /// POST `body` as `text/plain`; the reply is ignored
    async fn post_text(&self, url: &str, body: String) -> ClientResult<()>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct NetworkTransport {
    client: Client,
}

impl NetworkTransport {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self { client })
    }

    async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl HttpTransport for NetworkTransport {
    async fn get_json(&self, url: &str) -> ClientResult<Value> {
        tracing::debug!(url, "GET json");
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;
        let text = Self::check_status(response).await?.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| ClientError::InvalidResponse(format!("expected JSON body: {e}")))
    }

    async fn get_text(&self, url: &str) -> ClientResult<String> {
        tracing::debug!(url, "GET text");
        let response = self.client.get(url).send().await?;
        Ok(Self::check_status(response).await?.text().await?)
    }

    async fn post_text(&self, url: &str, body: String) -> ClientResult<()> {
        tracing::debug!(url, bytes = body.len(), "POST text");
        let response = self
            .client
            .post(url)
            .header(header::CONTENT_TYPE, "text/plain;charset=utf-8")
            .body(body)
            .send()
            .await?;
        // The script's reply is opaque to us; a status is only worth a trace.
        tracing::debug!(status = %response.status(), "POST sent");
        Ok(())
    }
}
