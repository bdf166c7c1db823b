use super::{load_with_progress, ui};
use crate::core::{Conversion, ConversionError, RateTableProvider, RateTableStorage};
use crate::rate_store::RateStore;
use anyhow::Result;

/// Raw field values as the user typed them.
#[derive(Debug, Clone)]
pub struct ConvertArgs {
    pub amount: String,
    pub from: String,
    pub to: String,
}

pub fn render(conversion: &Conversion) -> String {
    ui::style_text(&conversion.to_string(), ui::StyleType::Result)
}

pub fn render_error(error: &ConversionError) -> String {
    ui::style_text(&format!("Error: {error}"), ui::StyleType::Error)
}

pub async fn run<P, S>(store: &mut RateStore<P, S>, args: &ConvertArgs) -> Result<()>
where
    P: RateTableProvider,
    S: RateTableStorage,
{
    load_with_progress(store).await?;

    let from = args.from.to_uppercase();
    let to = args.to.to_uppercase();
    match store.convert(&from, &to, &args.amount) {
        Ok(conversion) => {
            println!("{}", render(&conversion));
            Ok(())
        }
        Err(e) => {
            // Already shown to the user; main only turns it into an exit code
            eprintln!("{}", render_error(&e));
            Err(e.into())
        }
    }
}
