use crate::core::{RateTable, RateTableStorage};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Keeps the rate table in a single, human-readable JSON file.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Serializes with four-space indentation.
fn to_pretty_json(table: &RateTable) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    table.serialize(&mut serializer)?;
    Ok(buf)
}

#[async_trait]
impl RateTableStorage for JsonFileStorage {
    async fn read(&self) -> Result<Option<RateTable>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No rate table at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read rate table: {}", self.path.display()));
            }
        };

        let table: RateTable = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse rate table: {}", self.path.display()))?;
        table.ensure_not_empty()?;
        debug!(
            timestamp = table.timestamp,
            "Read rate table from {}",
            self.path.display()
        );
        Ok(Some(table))
    }

    async fn write(&self, table: &RateTable) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let json = to_pretty_json(table)?;
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("Failed to write rate table: {}", self.path.display()))?;
        debug!(
            timestamp = table.timestamp,
            "Wrote rate table to {}",
            self.path.display()
        );
        Ok(())
    }
}
