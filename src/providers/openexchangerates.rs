use super::util::with_retry;
use crate::core::{RateTable, RateTableProvider};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use tracing::{debug, error, instrument};

enum AppId {
    Fixed(String),
    /// Looked up at fetch time so a fresh cache never needs the credential.
    Env(String),
}

/// Fetches `latest.json` from Open Exchange Rates.
pub struct OpenExchangeRatesProvider {
    base_url: String,
    app_id: AppId,
    client: reqwest::Client,
}

impl OpenExchangeRatesProvider {
    pub fn new(base_url: &str, app_id: &str) -> Result<Self> {
        Self::build(base_url, AppId::Fixed(app_id.to_string()))
    }

    /// Reads the app id from the environment variable `var_name` on each fetch.
    pub fn from_env(base_url: &str, var_name: &str) -> Result<Self> {
        Self::build(base_url, AppId::Env(var_name.to_string()))
    }

    fn build(base_url: &str, app_id: AppId) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("cconv/1.0")
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            app_id,
            client,
        })
    }

    fn app_id(&self) -> Result<String> {
        match &self.app_id {
            AppId::Fixed(id) => Ok(id.clone()),
            AppId::Env(var_name) => std::env::var(var_name).with_context(|| {
                format!("Environment variable {var_name} must hold an Open Exchange Rates app id")
            }),
        }
    }
}

#[async_trait]
impl RateTableProvider for OpenExchangeRatesProvider {
    #[instrument(name = "OpenExchangeRatesFetch", skip(self))]
    async fn fetch(&self) -> Result<RateTable> {
        let app_id = self.app_id()?;
        let endpoint = format!("{}/api/latest.json", self.base_url);
        let url = format!("{endpoint}?app_id={app_id}");
        debug!("Requesting latest rates from {}", endpoint);

        let response = with_retry(
            || {
                self.client
                    .get(&url)
                    .header(ACCEPT, "application/json")
                    .send()
            },
            3,
            500,
        )
        .await
        .context("Latest rates request failed")?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} while fetching latest rates",
                response.status()
            ));
        }

        let text = response
            .text()
            .await
            .context("Failed to get response text")?;

        let table: RateTable = match serde_json::from_str(&text) {
            Ok(table) => table,
            Err(e) => {
                error!(error = ?e, response = %text, "Failed to parse latest rates response");
                return Err(e).context("Failed to parse latest rates response");
            }
        };
        table.ensure_not_empty()?;

        debug!(
            timestamp = table.timestamp,
            currencies = table.len(),
            "Fetched latest rates"
        );
        Ok(table)
    }
}
