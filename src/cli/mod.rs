//! Command-line front end over the rate store

pub mod convert;
pub mod export;
pub mod info;
pub mod list;
pub mod refresh;
pub mod setup;
pub mod ui;

use crate::core::{RateTable, RateTableProvider, RateTableStorage};
use crate::rate_store::{LoadOutcome, RateStore};
use anyhow::{Context, Result};

pub const UPDATED_MESSAGE: &str = "The data has been updated successfully!";

/// Loads rates behind a spinner and reports an update when one happened.
pub async fn load_with_progress<P, S>(store: &mut RateStore<P, S>) -> Result<LoadOutcome>
where
    P: RateTableProvider,
    S: RateTableStorage,
{
    let pb = ui::new_spinner("Loading exchange rates...");
    let outcome = store.load().await;
    pb.finish_and_clear();

    let outcome = outcome?;
    if outcome.is_update() {
        println!("{}", ui::style_text(UPDATED_MESSAGE, ui::StyleType::Info));
    }
    Ok(outcome)
}

/// Local wall-clock time at which the table was generated.
pub fn modified_at(table: &RateTable) -> String {
    table
        .generated_at_local()
        .map_or("unknown".to_string(), |dt| {
            dt.format("%Y-%m-%d %H:%M:%S").to_string()
        })
}

pub(crate) fn loaded_table<P, S>(store: &RateStore<P, S>) -> Result<&RateTable>
where
    P: RateTableProvider,
    S: RateTableStorage,
{
    store.table().context("No exchange rate data has been loaded yet")
}
