use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use tracing::{debug, info, instrument};

use crate::app::ports::TextFetcher;
use crate::error::{RebuildError, Result};

/// Blocking GET with a fixed user agent and timeout. No retries.
pub struct ReqwestFetcher {
    client: Client,
    user_agent: String,
}

impl ReqwestFetcher {
    pub fn new(user_agent: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            user_agent: user_agent.into(),
        })
    }
}

impl TextFetcher for ReqwestFetcher {
    #[instrument(skip(self))]
    fn fetch_text(&self, url: &str) -> Result<String> {
        let resp = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(RebuildError::Fetch {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let bytes = resp.bytes()?;
        debug!(bytes_len = bytes.len(), "fetched registry document");
        info!(status = status.as_u16(), "fetch ok");
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
