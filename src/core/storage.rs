//! Persistence of the current rate table

use crate::core::rates::RateTable;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait RateTableStorage: Send + Sync {
    /// Returns `Ok(None)` when nothing has been persisted yet. Any other
    /// read or parse failure is an error.
    async fn read(&self) -> Result<Option<RateTable>>;

    /// Replaces whatever was persisted before with `table`.
    async fn write(&self, table: &RateTable) -> Result<()>;
}

#[async_trait]
impl<T: RateTableStorage + ?Sized> RateTableStorage for Arc<T> {
    async fn read(&self) -> Result<Option<RateTable>> {
        (**self).read().await
    }

    async fn write(&self, table: &RateTable) -> Result<()> {
        (**self).write(table).await
    }
}
