use super::ui;
use crate::core::AutocompleteIndex;
use anyhow::Result;
use std::io::Write;

/// Prints the catalog entries suggested for `prefix`.
pub fn run(catalog: &[String], prefix: Option<&str>) -> Result<()> {
    let stdout = std::io::stdout();
    write_matches(&mut stdout.lock(), catalog, prefix)?;
    Ok(())
}

/// Writes one suggested country per line.
///
/// Follows the autocomplete rules: without a match the whole catalog is
/// listed, after a note saying so.
pub fn write_matches<W: Write>(
    out: &mut W,
    catalog: &[String],
    prefix: Option<&str>,
) -> std::io::Result<()> {
    let index = AutocompleteIndex::new(catalog.iter().cloned());
    let prefix = prefix.unwrap_or_default();

    if !prefix.is_empty() && index.first_match(prefix).is_none() {
        writeln!(
            out,
            "{}",
            ui::style_text(
                &format!("No country starts with '{prefix}', showing all"),
                ui::StyleType::Subtle
            )
        )?;
    }

    for name in index.filter(prefix) {
        writeln!(out, "{name}")?;
    }
    Ok(())
}
