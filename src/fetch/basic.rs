use super::client::HttpClient;
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Plain `reqwest` client with the timeouts used for dataset downloads.
pub struct BasicClient(reqwest::Client);

impl BasicClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self(client)
    }
}

impl Default for BasicClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);
        let resp = self.0.execute(req).await?.error_for_status()?;
        Ok(resp.bytes().await?.to_vec())
    }
}
