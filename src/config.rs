use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_API_URL: &str = "https://public-api.wordpress.com";
const DEFAULT_TOKEN_VAR: &str = "SITE_PICKER_ACCESS_TOKEN";
const DEFAULT_LOG_FILE: &str = "/tmp/site-picker.log";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_url: String,
    /// Environment variable the token store reads the bearer token from.
    pub token_var: String,
    pub log_file: PathBuf,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup, so values can come
    /// from somewhere other than the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = get("SITE_PICKER_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        url::Url::parse(&api_url)
            .with_context(|| format!("SITE_PICKER_API_URL is not a valid URL: {api_url}"))?;

        let token_var =
            get("SITE_PICKER_TOKEN_VAR").unwrap_or_else(|| DEFAULT_TOKEN_VAR.to_string());

        let log_file = get("SITE_PICKER_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        let timeout_secs = match get("SITE_PICKER_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("SITE_PICKER_TIMEOUT_SECS must be an integer: {raw}"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_url,
            token_var,
            log_file,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
