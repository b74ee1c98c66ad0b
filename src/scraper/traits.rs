use crate::model::{MenuRequest, ScraperError};

/// Retrieves the raw HTML of one cafeteria's daily menu page.
#[async_trait::async_trait]
pub trait MenuFetcher: Send + Sync {
    async fn fetch(&self, req: &MenuRequest) -> Result<String, ScraperError>;
}
