//! Source of fresh exchange-rate tables

use crate::core::rates::RateTable;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait RateTableProvider: Send + Sync {
    /// Fetches the latest rate table. Transport and HTTP failures are errors.
    async fn fetch(&self) -> Result<RateTable>;
}

#[async_trait]
impl<T: RateTableProvider + ?Sized> RateTableProvider for Arc<T> {
    async fn fetch(&self) -> Result<RateTable> {
        (**self).fetch().await
    }
}
