//! Dataset transport.
//!
//! [`HttpClient`] is the seam tests fake; [`BasicClient`] is the plain
//! reqwest transport both dataset fetches use.

use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response>;
}

pub struct BasicClient(reqwest::Client);

impl BasicClient {
    pub fn new() -> Self {
        Self(reqwest::Client::new())
    }
}

impl Default for BasicClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.0.execute(req).await
    }
}

/// Fetches a URL and returns the raw response body.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?;
    Ok(resp.bytes().await?.to_vec())
}

/// Loads a dataset from a local path or over HTTP, decided by the shape of
/// the source string.
pub async fn read_source<C: HttpClient>(client: &C, source: &str) -> Result<Vec<u8>> {
    if source.starts_with("http") {
        fetch_bytes(client, source).await
    } else {
        Ok(std::fs::read(source)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[tokio::test]
    async fn test_read_source_from_local_file() {
        let path = format!("{}/bikeflow_test_source.json", env::temp_dir().display());
        fs::write(&path, b"{\"data\":{\"stations\":[]}}").unwrap();

        let bytes = read_source(&BasicClient::new(), &path).await.unwrap();
        assert_eq!(bytes, b"{\"data\":{\"stations\":[]}}");

        fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_read_source_missing_file_errors() {
        let result = read_source(&BasicClient::new(), "/no/such/bikeflow/file.csv").await;
        assert!(result.is_err());
    }
}
