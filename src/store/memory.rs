use crate::core::{RateTable, RateTableStorage};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;
use tracing::debug;

/// In-process rate table storage.
#[derive(Default)]
pub struct MemoryStorage {
    table: Mutex<Option<RateTable>>,
    writes: AtomicUsize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that already holds `table`.
    pub fn with_table(table: RateTable) -> Self {
        Self {
            table: Mutex::new(Some(table)),
            writes: AtomicUsize::new(0),
        }
    }

    pub async fn snapshot(&self) -> Option<RateTable> {
        self.table.lock().await.clone()
    }

    /// Number of writes since creation.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RateTableStorage for MemoryStorage {
    async fn read(&self) -> Result<Option<RateTable>> {
        let table = self.table.lock().await.clone();
        debug!(found = table.is_some(), "Memory storage READ");
        Ok(table)
    }

    async fn write(&self, table: &RateTable) -> Result<()> {
        let mut stored = self.table.lock().await;
        *stored = Some(table.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        debug!(timestamp = table.timestamp, "Memory storage WRITE");
        Ok(())
    }
}
