use super::{load_with_progress, ui};
use crate::core::{RateTableProvider, RateTableStorage};
use crate::rate_store::RateStore;
use anyhow::Result;
use std::path::Path;

pub async fn run<P, S>(store: &mut RateStore<P, S>, data_file: &Path) -> Result<()>
where
    P: RateTableProvider,
    S: RateTableStorage,
{
    load_with_progress(store).await?;
    store.export().await?;
    println!(
        "{}",
        ui::style_text(
            &format!("The data has been saved to {}", data_file.display()),
            ui::StyleType::Info
        )
    );
    Ok(())
}
