use crate::{MapError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

const USER_AGENT: &str = concat!("quakemap/", env!("CARGO_PKG_VERSION"));

/// Fetches JSON documents by URL
#[async_trait]
pub trait FeedClient: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value>;
}

/// `FeedClient` over a shared `reqwest` client
#[derive(Debug, Clone)]
pub struct ReqwestFeedClient {
    client: Client,
}

impl ReqwestFeedClient {
    /// Client without a request timeout
    pub fn new() -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Timeout taken from the feed configuration, if any
    pub fn from_timeout_secs(timeout_secs: Option<u64>) -> Result<Self> {
        match timeout_secs {
            Some(secs) => Self::with_timeout(Duration::from_secs(secs)),
            None => Self::new(),
        }
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FeedClient for ReqwestFeedClient {
    async fn get_json(&self, url: &str) -> Result<Value> {
        #[cfg(feature = "debug")]
        log::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MapError::Http {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let value = response.json::<Value>().await?;
        Ok(value)
    }
}
