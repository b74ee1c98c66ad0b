use crate::model::{MenuRequest, ScraperError};
use crate::scraper::traits::MenuFetcher;

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

pub struct ScraperImpl {
    pub client: Client,
}

impl ScraperImpl {
    pub fn new() -> Result<Self, ScraperError> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) MensaReminderBot/0.1")
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| ScraperError::HttpError(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl MenuFetcher for ScraperImpl {
    async fn fetch(&self, req: &MenuRequest) -> Result<String, ScraperError> {
        debug!("GET {} ({})", req.url, req.mensa);

        let response = self.client.get(&req.url).send().await.map_err(|e| {
            if e.is_timeout() {
                ScraperError::Timeout
            } else {
                ScraperError::HttpError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} answered with {}", req.url, status);
            return Err(ScraperError::InvalidResponse(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| ScraperError::HttpError(e.to_string()))
    }
}
