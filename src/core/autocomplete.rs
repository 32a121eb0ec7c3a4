//! Prefix autocomplete over a fixed catalog of names

use tracing::trace;

/// The key (or edit) that triggered an input change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    Char,
    Backspace,
    Delete,
    Left,
    Right,
    Other,
}

impl InputKey {
    /// Keys that move or erase around the cursor rather than insert text.
    pub fn is_cursor_key(&self) -> bool {
        matches!(
            self,
            InputKey::Backspace | InputKey::Delete | InputKey::Left | InputKey::Right
        )
    }
}

/// Sorted list of candidates filtered by case-insensitive prefix.
#[derive(Debug, Clone, Default)]
pub struct AutocompleteIndex {
    items: Vec<String>,
}

fn sort_case_insensitive(items: &mut [String]) {
    items.sort_by_cached_key(|item| item.to_lowercase());
}

impl AutocompleteIndex {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = Self::default();
        index.set_items(items);
        index
    }

    /// Replaces the catalog with a case-insensitively sorted copy of `items`.
    pub fn set_items<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut items: Vec<String> = items.into_iter().map(Into::into).collect();
        sort_case_insensitive(&mut items);
        self.items = items;
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    fn matching<'a>(&'a self, text: &str) -> impl Iterator<Item = &'a str> + 'a {
        let needle = text.to_lowercase();
        self.items
            .iter()
            .filter(move |item| item.to_lowercase().starts_with(&needle))
            .map(String::as_str)
    }

    /// Returns the items prefixed by `text`, ignoring case, in catalog order.
    ///
    /// When nothing matches the whole catalog is returned, so a field never
    /// ends up with an empty suggestion list.
    pub fn filter(&self, text: &str) -> Vec<&str> {
        let matches: Vec<&str> = self.matching(text).collect();
        if matches.is_empty() {
            self.items.iter().map(String::as_str).collect()
        } else {
            matches
        }
    }

    /// First genuine prefix match, without the full-catalog fallback.
    pub fn first_match(&self, text: &str) -> Option<&str> {
        self.matching(text).next()
    }
}

/// Autocomplete state for a single text input.
///
/// The host UI calls [`AutocompleteField::on_input_change`] on every edit.
/// The last computed match set is kept only to skip redundant UI updates.
#[derive(Debug, Clone)]
pub struct AutocompleteField {
    index: AutocompleteIndex,
    text: String,
    position: usize,
    matches: Vec<String>,
}

impl AutocompleteField {
    pub fn new(index: AutocompleteIndex) -> Self {
        let matches = index.items().to_vec();
        Self {
            index,
            text: String::new(),
            position: 0,
            matches,
        }
    }

    pub fn set_items<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.index.set_items(items);
        self.reset();
    }

    /// Clears the entered text and shows the full catalog again.
    pub fn reset(&mut self) {
        self.text.clear();
        self.position = 0;
        self.matches = self.index.items().to_vec();
    }

    /// Recomputes suggestions for `text`.
    ///
    /// Returns the new suggestion list when it differs from the one shown,
    /// `None` when the display does not need to change.
    pub fn on_input_change(&mut self, text: &str, key: InputKey) -> Option<&[String]> {
        self.position = text.chars().count();
        if key.is_cursor_key() && self.text == text {
            return None;
        }
        self.text = text.to_string();

        let matches = self.index.filter(text);
        if matches.iter().copied().eq(self.matches.iter().map(String::as_str)) {
            return None;
        }

        trace!(text, count = matches.len(), "Suggestions changed");
        self.matches = matches.into_iter().map(str::to_string).collect();
        Some(&self.matches)
    }

    pub fn index(&self) -> &AutocompleteIndex {
        &self.index
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Suggestions currently on display.
    pub fn suggestions(&self) -> &[String] {
        &self.matches
    }
}
