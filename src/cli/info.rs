use super::{load_with_progress, loaded_table, modified_at, ui};
use crate::core::{RateTable, RateTableProvider, RateTableStorage};
use crate::rate_store::RateStore;
use anyhow::Result;
use comfy_table::Cell;
use std::path::Path;

pub fn render(table: &RateTable, data_file: &Path) -> String {
    let mut rendered = ui::new_styled_table();
    rendered.set_header(vec![ui::header_cell("Field"), ui::header_cell("Value")]);
    rendered.add_row(vec![
        Cell::new("Data file"),
        Cell::new(data_file.display().to_string()),
    ]);
    rendered.add_row(vec![
        Cell::new("Base currency"),
        Cell::new(table.base.as_deref().unwrap_or("N/A")),
    ]);
    rendered.add_row(vec![Cell::new("Currencies"), Cell::new(table.len())]);
    rendered.add_row(vec![Cell::new("Modified at"), Cell::new(modified_at(table))]);
    rendered.to_string()
}

pub async fn run<P, S>(store: &mut RateStore<P, S>, data_file: &Path) -> Result<()>
where
    P: RateTableProvider,
    S: RateTableStorage,
{
    load_with_progress(store).await?;
    println!("{}", render(loaded_table(store)?, data_file));
    Ok(())
}
