//! The live rate table together with the operations the front end calls.

use crate::core::conversion;
use crate::core::{Conversion, ConversionError, ConversionRequest, RateTable};
use crate::core::{RateTableProvider, RateTableStorage};
use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

/// What `load` had to do to obtain the active table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing was persisted; a table was fetched and saved.
    Fetched,
    /// The persisted table was stale and has been replaced.
    Updated,
    /// The persisted table is from the current UTC day.
    Cached,
}

impl LoadOutcome {
    /// True when new data came from the provider.
    pub fn is_update(&self) -> bool {
        !matches!(self, LoadOutcome::Cached)
    }
}

/// Owns the single live rate table and the provider/storage it comes from.
pub struct RateStore<P, S> {
    provider: P,
    storage: S,
    table: Option<RateTable>,
}

impl<P, S> RateStore<P, S>
where
    P: RateTableProvider,
    S: RateTableStorage,
{
    pub fn new(provider: P, storage: S) -> Self {
        Self {
            provider,
            storage,
            table: None,
        }
    }

    pub fn table(&self) -> Option<&RateTable> {
        self.table.as_ref()
    }

    pub async fn load(&mut self) -> Result<LoadOutcome> {
        self.load_at(Utc::now()).await
    }

    /// Makes the persisted table active, fetching a new one when nothing is
    /// persisted or the persisted one predates UTC midnight of `now`.
    ///
    /// The previous table stays active if anything fails.
    #[instrument(skip(self))]
    pub async fn load_at(&mut self, now: DateTime<Utc>) -> Result<LoadOutcome> {
        let (table, outcome) = match self.storage.read().await? {
            None => {
                info!("No cached rates found, fetching latest");
                (self.fetch_and_persist().await?, LoadOutcome::Fetched)
            }
            Some(cached) if cached.is_stale(now) => {
                info!(timestamp = cached.timestamp, "Cached rates are stale, fetching latest");
                (self.fetch_and_persist().await?, LoadOutcome::Updated)
            }
            Some(cached) => {
                debug!(timestamp = cached.timestamp, "Using cached rates");
                (cached, LoadOutcome::Cached)
            }
        };

        self.table = Some(table);
        Ok(outcome)
    }

    /// Fetches and persists a new table regardless of staleness.
    pub async fn refresh(&mut self) -> Result<LoadOutcome> {
        let table = self.fetch_and_persist().await?;
        self.table = Some(table);
        Ok(LoadOutcome::Updated)
    }

    async fn fetch_and_persist(&self) -> Result<RateTable> {
        let table = self.provider.fetch().await?;
        self.storage.write(&table).await?;
        info!(
            timestamp = table.timestamp,
            currencies = table.len(),
            "Rates updated"
        );
        Ok(table)
    }

    /// One `"<code> - <rate>"` line per currency, in table order.
    pub fn list_currencies(&self) -> Result<Vec<String>, ConversionError> {
        let table = self.table.as_ref().ok_or(ConversionError::NoTable)?;
        Ok(table
            .iter()
            .map(|(code, rate)| format!("{code} - {rate}"))
            .collect())
    }

    /// Converts `amount_text` units of `from_code` into `to_code`.
    ///
    /// Codes are matched as given; callers upper-case user input first.
    pub fn convert(
        &self,
        from_code: &str,
        to_code: &str,
        amount_text: &str,
    ) -> Result<Conversion, ConversionError> {
        let request = ConversionRequest::parse(from_code, to_code, amount_text)?;
        let table = self.table.as_ref().ok_or(ConversionError::NoTable)?;
        let result = conversion::convert(table, &request);
        match &result {
            Ok(conversion) => debug!(%conversion, "Converted"),
            Err(ConversionError::InvalidCurrency { side }) => {
                debug!(%side, from_code, to_code, "No rate found for currency code")
            }
            Err(e) => debug!(error = %e, "Conversion rejected"),
        }
        result
    }

    /// Persists the active table, replacing whatever was stored.
    pub async fn export(&self) -> Result<()> {
        let table = self.table.as_ref().ok_or(ConversionError::NoTable)?;
        self.storage.write(table).await?;
        info!(timestamp = table.timestamp, "Rates exported");
        Ok(())
    }
}
