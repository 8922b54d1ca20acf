use std::time::Duration;

use reqwest::Client;
use reqwest::header::ACCEPT;
use tokio::time::timeout;

use crate::error::{Error, Result};
use crate::quotation::{Quotation, unwrap_envelope};

/// HTTP client for the remote quotation API. Single attempt, no retries.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Client,
    url: String,
}

impl UpstreamClient {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    /// `budget` covers connecting, the response headers and the whole body.
    pub async fn fetch(&self, budget: Duration) -> Result<Quotation> {
        timeout(budget, self.load())
            .await
            .map_err(|_| Error::Timeout(budget))?
    }

    async fn load(&self) -> Result<Quotation> {
        let resp = self
            .http
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(Error::UnexpectedStatus(resp.status()));
        }

        let body = resp.bytes().await?;

        unwrap_envelope(&body)
    }
}
