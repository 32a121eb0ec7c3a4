use std::borrow::Cow::{self, Borrowed, Owned};
use std::cell::{Cell, RefCell};

use anyhow::Result;
use console::style;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper};
use tracing::debug;

use super::ui;
use crate::core::{AutocompleteField, AutocompleteIndex, ConversionError, Converter, InputKey};

/// Line editor helper that feeds every edit into an [`AutocompleteField`].
///
/// Hints show the rest of the first matching country, Tab lists the current
/// suggestions.
pub struct CountryHelper {
    field: RefCell<AutocompleteField>,
    cursor: Cell<usize>,
    enabled: bool,
}

impl CountryHelper {
    pub fn new(catalog: &[String]) -> Self {
        Self {
            field: RefCell::new(AutocompleteField::new(AutocompleteIndex::new(
                catalog.iter().cloned(),
            ))),
            cursor: Cell::new(0),
            enabled: true,
        }
    }

    /// Starts a fresh input, with or without autocomplete.
    pub fn begin_input(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.cursor.set(0);
        self.field.get_mut().reset();
    }

    /// Suggestions replacing the whole line. Only offered with the cursor at
    /// the end, since rustyline keeps whatever follows the cursor.
    fn candidates(&self, line: &str, pos: usize) -> Vec<Pair> {
        if !self.enabled {
            return vec![];
        }
        self.sync(line, pos);
        if pos < line.len() {
            return vec![];
        }
        self.field
            .borrow()
            .suggestions()
            .iter()
            .map(|name| Pair {
                display: name.clone(),
                replacement: name.clone(),
            })
            .collect()
    }

    fn sync(&self, line: &str, pos: usize) {
        let mut field = self.field.borrow_mut();
        let key = infer_key(field.text(), line, self.cursor.get(), pos);
        self.cursor.set(pos);
        if let Some(suggestions) = field.on_input_change(line, key) {
            debug!(?key, count = suggestions.len(), "Updated suggestions");
        }
    }
}

/// Guesses which key produced `current` from the previous line state.
pub fn infer_key(previous: &str, current: &str, previous_pos: usize, pos: usize) -> InputKey {
    use std::cmp::Ordering;

    match current.len().cmp(&previous.len()) {
        Ordering::Greater => InputKey::Char,
        Ordering::Less if pos < previous_pos => InputKey::Backspace,
        Ordering::Less => InputKey::Delete,
        Ordering::Equal if current != previous => InputKey::Other,
        Ordering::Equal => match pos.cmp(&previous_pos) {
            Ordering::Less => InputKey::Left,
            Ordering::Greater => InputKey::Right,
            Ordering::Equal => InputKey::Other,
        },
    }
}

impl Helper for CountryHelper {}

impl Completer for CountryHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok((0, self.candidates(line, pos)))
    }
}

impl Hinter for CountryHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        if !self.enabled {
            return None;
        }
        self.sync(line, pos);
        if line.is_empty() || pos < line.len() {
            return None;
        }

        let field = self.field.borrow();
        let typed = line.chars().count();
        field
            .index()
            .first_match(line)
            .map(|name| name.chars().skip(typed).collect::<String>())
            .filter(|rest| !rest.is_empty())
    }
}

impl Highlighter for CountryHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        if hint.is_empty() {
            Borrowed(hint)
        } else {
            Owned(style(hint).dim().to_string())
        }
    }
}

impl Validator for CountryHelper {}

/// Reads one line, `None` when the user ends the session.
fn prompt(
    editor: &mut Editor<CountryHelper, DefaultHistory>,
    label: &str,
    autocomplete: bool,
) -> Result<Option<String>> {
    if let Some(helper) = editor.helper_mut() {
        helper.begin_input(autocomplete);
    }

    match tokio::task::block_in_place(|| editor.readline(label)) {
        Ok(line) => {
            if autocomplete && !line.trim().is_empty() {
                editor.add_history_entry(line.as_str())?;
            }
            Ok(Some(line))
        }
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Interactive converter: two country prompts, an amount, then the result
/// and the recent history.
pub async fn run(catalog: &[String], converter: &mut Converter) -> Result<()> {
    let mut editor = Editor::<CountryHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CountryHelper::new(catalog)));

    println!("{}", ui::style_text("Currency Converter", ui::StyleType::Title));
    println!(
        "{}",
        ui::style_text(
            &format!(
                "{} countries available. Tab lists matches, Ctrl-D quits.",
                catalog.len()
            ),
            ui::StyleType::Subtle
        )
    );

    loop {
        println!();
        let Some(from) = prompt(&mut editor, "Select From Country: ", true)? else {
            break;
        };
        let Some(to) = prompt(&mut editor, "Select To Country: ", true)? else {
            break;
        };
        let Some(amount) = prompt(&mut editor, "Amount to Convert: ", false)? else {
            break;
        };

        let spinner = ui::new_spinner("Converting...");
        let outcome = converter.convert(&from, &to, &amount).await;
        spinner.finish_and_clear();

        match outcome {
            Ok(record) => {
                println!(
                    "\n{}\n",
                    ui::style_text(&record.to_string(), ui::StyleType::Result)
                );
                println!("{}", ui::history_table(converter.history()));
            }
            Err(e @ ConversionError::InvalidInput(_)) => {
                println!(
                    "{}",
                    ui::style_text(&format!("Input Error: {e}"), ui::StyleType::Warning)
                );
            }
            Err(e) => {
                println!(
                    "{}",
                    ui::style_text(&format!("Error: {e}"), ui::StyleType::Error)
                );
            }
        }
    }

    Ok(())
}
