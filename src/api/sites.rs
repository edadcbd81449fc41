use super::SitesClient;
use crate::api::types::{Site, SitesResponse};
use anyhow::{Context, Result};
use std::future::Future;
use tracing::debug;

/// Source of the site collection shown by the picker.
pub trait SiteSource: Send + Sync + 'static {
    fn fetch_sites(&self) -> impl Future<Output = Result<Vec<Site>>> + Send;
}

impl SiteSource for SitesClient {
    async fn fetch_sites(&self) -> Result<Vec<Site>> {
        let url = format!("{}/rest/v1.1/me/sites", self.api_url);
        debug!(%url, "requesting sites");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("API request failed with status: {} - {}", status, text);
        }

        let sites_response = response
            .json::<SitesResponse>()
            .await
            .context("Failed to parse JSON")?;
        debug!(count = sites_response.sites.len(), "sites received");
        Ok(sites_response.sites)
    }
}
