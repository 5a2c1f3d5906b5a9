// src/fetch.rs

use anyhow::{Context, Result};
use reqwest::Client;
use std::{fs, path::Path, time::Duration};
use tokio::time::sleep;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::config::Config;

const MAX_RETRIES: u32 = 3;
const INITIAL_BACKOFF_MS: u64 = 500;

/// Client with a stable user agent; some hosts refuse anonymous clients.
pub fn build_client() -> Result<Client> {
    Client::builder()
        .user_agent(concat!("medalscraper/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .build()
        .context("building HTTP client")
}

async fn get_text_core(client: &Client, url: &Url) -> Result<String> {
    debug!("Fetching text from {}", url);
    client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("GET {} failed", url))?
        .error_for_status()
        .with_context(|| format!("Non-success status {}", url))?
        .text()
        .await
        .with_context(|| format!("Reading text from {}", url))
}

async fn get_text_with_retry(
    client: &Client,
    url: &Url,
    max_retries: u32,
    initial_backoff_ms: u64,
) -> Result<String> {
    let mut attempts = 0;
    loop {
        match get_text_core(client, url).await {
            Ok(t) => return Ok(t),
            Err(e) if attempts < max_retries => {
                attempts += 1;
                let backoff = initial_backoff_ms * 2u64.pow(attempts - 1);
                warn!(%url, attempt = attempts, delay_ms = backoff, error = %e, "Retrying");
                sleep(Duration::from_millis(backoff)).await;
            }
            Err(e) => {
                error!(%url, error = %e, "Exhausted retries");
                return Err(e);
            }
        }
    }
}

/// Download the standings page body.
pub async fn fetch_document(client: &Client, url: &str) -> Result<String> {
    let url = Url::parse(url).with_context(|| format!("parsing source URL {}", url))?;
    let body = get_text_with_retry(client, &url, MAX_RETRIES, INITIAL_BACKOFF_MS).await?;
    info!(%url, bytes = body.len(), "document fetched");
    Ok(body)
}

/// Read a saved page from disk.
pub fn read_document<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let body = fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
    info!(path = %path.display(), bytes = body.len(), "document read");
    Ok(body)
}

/// The configured local file if there is one, otherwise the configured URL.
pub async fn load_source(client: &Client, cfg: &Config) -> Result<String> {
    match &cfg.source_path {
        Some(path) => read_document(path),
        None => fetch_document(client, &cfg.source_url).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_local_source_wins_over_url() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        write!(tmp, "<table></table>")?;
        let cfg = Config {
            source_url: "not a url".into(),
            source_path: Some(tmp.path().to_path_buf()),
            ..Config::default()
        };
        let body = load_source(&build_client()?, &cfg).await?;
        assert_eq!(body, "<table></table>");
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_url_is_error_without_network() {
        let client = build_client().unwrap();
        let err = fetch_document(&client, "not a url").await.unwrap_err();
        assert!(err.to_string().contains("parsing source URL"));
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(read_document("/definitely/not/here.html").is_err());
    }
}
