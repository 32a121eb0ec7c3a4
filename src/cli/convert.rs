use super::ui;
use crate::core::Converter;
use anyhow::Result;

/// Runs a single conversion and prints the result line.
pub async fn run(
    converter: &mut Converter,
    from_country: &str,
    to_country: &str,
    amount: &str,
    json: bool,
) -> Result<()> {
    let spinner = ui::new_spinner("Converting...");
    let outcome = converter.convert(from_country, to_country, amount).await;
    spinner.finish_and_clear();

    let record = outcome?;
    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!(
            "{}",
            ui::style_text(&record.to_string(), ui::StyleType::Result)
        );
    }
    Ok(())
}
