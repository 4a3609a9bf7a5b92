//! Loading raw input bytes from disk or over HTTP.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::io::Read;
use tracing::debug;

pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?.error_for_status()?;
    Ok(resp.bytes().await?.to_vec())
}

/// Reads `source` from a local path or fetches it when it is an `http(s)`
/// URL. Sources ending in `.gz` are decompressed.
#[tracing::instrument(skip_all, fields(source = %source))]
pub async fn load_source(source: &str) -> Result<Vec<u8>> {
    let bytes = if source.starts_with("http://") || source.starts_with("https://") {
        let client = BasicClient::new().context("Failed to build HTTP client")?;
        fetch_bytes(&client, source)
            .await
            .with_context(|| format!("Failed to fetch {source}"))?
    } else {
        std::fs::read(source).with_context(|| format!("Failed to read {source}"))?
    };
    debug!(bytes = bytes.len(), "Source loaded");

    if source.ends_with(".gz") {
        gunzip(&bytes).with_context(|| format!("Failed to decompress {source}"))
    } else {
        Ok(bytes)
    }
}

fn gunzip(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut decoded = Vec::new();
    GzDecoder::new(bytes).read_to_end(&mut decoded)?;
    Ok(decoded)
}
