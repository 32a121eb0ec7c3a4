use crate::core::history::History;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Result,
    Warning,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Result => style(text).green().bold(),
        StyleType::Warning => style(text).yellow(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn amount_cell(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// Renders the visible window of the history, oldest first.
pub fn history_table(history: &History) -> String {
    let mut table = new_styled_table();
    table.set_header(vec![
        header_cell("Time"),
        header_cell("From"),
        header_cell("Amount"),
        header_cell("To"),
        header_cell("Converted"),
    ]);

    for record in history.visible_entries() {
        table.add_row(vec![
            Cell::new(record.converted_at.format("%H:%M:%S")).fg(Color::DarkGrey),
            Cell::new(&record.from_country),
            amount_cell(format!("{:?} {}", record.source_amount, record.source)),
            Cell::new(&record.to_country),
            amount_cell(format!("{:.2} {}", record.target_amount, record.target))
                .fg(Color::Green),
        ]);
    }

    format!(
        "{}\n{}",
        style_text("Conversion History (last 10):", StyleType::Title),
        table
    )
}

/// Creates a spinner for a network call of unknown length.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
