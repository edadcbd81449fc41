pub mod sites;
pub mod types;

use crate::config::Config;
use anyhow::{Context, Result};
use reqwest::Client;

pub use sites::SiteSource;
pub use types::Site;

/// HTTP client for the site-listing service. The bearer token is fixed at
/// construction; there is no shared auth state.
#[derive(Clone, Debug)]
pub struct SitesClient {
    pub(crate) client: Client,
    pub(crate) api_url: String,
    pub(crate) access_token: String,
}

impl SitesClient {
    pub fn new(config: &Config, access_token: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self::with_client(client, &config.api_url, access_token))
    }

    pub fn with_client(client: Client, api_url: &str, access_token: String) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            access_token,
        }
    }
}
