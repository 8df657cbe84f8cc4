use crate::domain::ports::{ConfigProvider, DetailFetcher};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;

/// Fetches one unit's detail fragment via the page's ajax endpoint.
///
/// The endpoint only answers requests that look like the page's own
/// in-flight ajax calls, so every request carries the `XMLHttpRequest`
/// marker and the form page as referer.
pub struct HttpDetailFetcher<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> HttpDetailFetcher<C> {
    pub fn new(config: C) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout()).build()?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl<C: ConfigProvider> DetailFetcher for HttpDetailFetcher<C> {
    async fn fetch_details(
        &self,
        project_value: &str,
        tower_value: &str,
        unit_value: &str,
    ) -> Result<String> {
        tracing::debug!(
            "Requesting details for {} / {} / {}",
            project_value,
            tower_value,
            unit_value
        );

        let response = self
            .client
            .post(self.config.ajax_url())
            .header("accept", "*/*")
            .header("accept-language", "en-US,en;q=0.9")
            .header("x-requested-with", "XMLHttpRequest")
            .header("referer", self.config.page_url())
            .form(&[
                ("project_id", project_value),
                ("tower_id", tower_value),
                ("unit_id", unit_value),
                ("action", self.config.detail_action()),
            ])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }
}
