use super::{load_with_progress, loaded_table, modified_at, ui};
use crate::core::{RateTable, RateTableProvider, RateTableStorage};
use crate::rate_store::RateStore;
use anyhow::Result;
use comfy_table::Cell;

/// Renders the currency list with the data timestamp underneath.
pub fn render(entries: &[String], table: &RateTable) -> String {
    let base = table.base.as_deref().unwrap_or("provider base");
    let mut output = format!(
        "{}\n\n",
        ui::style_text("List of all currencies", ui::StyleType::Title)
    );

    let mut rendered = ui::new_styled_table();
    rendered.set_header(vec![ui::header_cell(&format!("Currency - Rate ({base})"))]);
    for entry in entries {
        rendered.add_row(vec![Cell::new(entry)]);
    }
    output.push_str(&rendered.to_string());

    output.push_str(&format!(
        "\n\n{}",
        ui::style_text(
            &format!("The data is modified at: {}", modified_at(table)),
            ui::StyleType::Subtle
        )
    ));
    output
}

pub async fn run<P, S>(store: &mut RateStore<P, S>) -> Result<()>
where
    P: RateTableProvider,
    S: RateTableStorage,
{
    load_with_progress(store).await?;
    let entries = store.list_currencies()?;
    println!("{}", render(&entries, loaded_table(store)?));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lists_every_entry() {
        let table = RateTable::new(
            1760788800,
            vec![("USD".to_string(), 1.0), ("EUR".to_string(), 0.857)],
        )
        .with_base("USD");
        let entries = vec!["USD - 1".to_string(), "EUR - 0.857".to_string()];

        let output = render(&entries, &table);

        assert!(output.contains("List of all currencies"));
        assert!(output.contains("Currency - Rate (USD)"));
        assert!(output.contains("USD - 1"));
        assert!(output.contains("EUR - 0.857"));
        assert!(output.contains("The data is modified at:"));
        assert!(output.find("USD - 1").unwrap() < output.find("EUR - 0.857").unwrap());
    }
}
