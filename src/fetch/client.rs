use anyhow::Result;
use async_trait::async_trait;

/// Transport used to download CSV datasets.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Downloads the body at `url`. Non-success statuses are errors.
    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>>;
}
