use std::path::Path;

use log::info;
use reqwest::{Client, StatusCode};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::time::timeout;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::quotation::BidQuotation;

pub const LABEL: &str = "Dólar";

/// Asks the local service for the current quotation and returns its bid.
pub async fn fetch_bid(config: &ClientConfig) -> Result<String> {
    let http = Client::builder().build()?;
    timeout(config.timeout, request_bid(&http, &config.server_url))
        .await
        .map_err(|_| Error::Timeout(config.timeout))?
}

async fn request_bid(http: &Client, url: &str) -> Result<String> {
    let resp = http.get(url).send().await?;
    if resp.status() != StatusCode::OK {
        return Err(Error::UnexpectedStatus(resp.status()));
    }

    let body = resp.bytes().await?;
    let quotation: BidQuotation = serde_json::from_slice(&body)?;

    Ok(quotation.bid)
}

/// Appends `<label>: <bid>` to `path`, creating the file if needed.
pub async fn append_bid(path: &Path, label: &str, bid: &str) -> Result<()> {
    let line = format!("{label}: {bid}\n");
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(line.as_bytes()).await?;
    file.flush().await?;
    Ok(())
}

/// Nothing is written unless the whole fetch succeeded.
pub async fn run(config: &ClientConfig) -> Result<String> {
    let bid = fetch_bid(config).await?;
    append_bid(&config.output_path, LABEL, &bid).await?;
    info!("{LABEL}: {bid} written to {}", config.output_path.display());
    Ok(bid)
}
