use super::{UPDATED_MESSAGE, load_with_progress, loaded_table, modified_at, ui};
use crate::core::{RateTableProvider, RateTableStorage};
use crate::rate_store::RateStore;
use anyhow::Result;

pub async fn run<P, S>(store: &mut RateStore<P, S>, force: bool) -> Result<()>
where
    P: RateTableProvider,
    S: RateTableStorage,
{
    if force {
        let pb = ui::new_spinner("Fetching latest exchange rates...");
        let outcome = store.refresh().await;
        pb.finish_and_clear();
        outcome?;
        println!("{}", ui::style_text(UPDATED_MESSAGE, ui::StyleType::Info));
    } else if !load_with_progress(store).await?.is_update() {
        let table = loaded_table(store)?;
        println!(
            "{}",
            ui::style_text(
                &format!("Exchange rates are up to date ({})", modified_at(table)),
                ui::StyleType::Subtle
            )
        );
    }
    Ok(())
}
