//! Inline text editing for product fields and list entries.

use trendlens_core::product::ProductField;
use trendlens_core::ViewState;

/// What an open inline editor will write to when committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    ProductName,
    Description,
    Trend(usize),
    NewTrend,
    Link(usize),
    NewLink,
}

impl EditTarget {
    pub fn label(&self) -> &'static str {
        match self {
            EditTarget::ProductName => "Name",
            EditTarget::Description => "Description",
            EditTarget::Trend(_) => "Trend search text",
            EditTarget::NewTrend => "New trend search text",
            EditTarget::Link(_) => "Website link",
            EditTarget::NewLink => "New website link",
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, EditTarget::Description)
    }
}

/// A text buffer with a byte-offset cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    pub text: String,
    pub cursor: usize,
    multiline: bool,
}

impl TextInput {
    pub fn new(text: impl Into<String>, multiline: bool) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self {
            text,
            cursor,
            multiline,
        }
    }

    fn clamp_cursor(&mut self) {
        if self.cursor > self.text.len() {
            self.cursor = self.text.len();
        }
    }

    /// Insert a character at the cursor position.
    pub fn insert_char(&mut self, c: char) {
        if c == '\n' && !self.multiline {
            return;
        }
        self.clamp_cursor();
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Insert a string at the cursor position (for paste).
    /// Single-line inputs turn line breaks into spaces.
    pub fn insert_str(&mut self, s: &str) {
        self.clamp_cursor();
        let s = if self.multiline {
            s.to_string()
        } else {
            s.replace(['\r', '\n'], " ")
        };
        self.text.insert_str(self.cursor, &s);
        self.cursor += s.len();
    }

    /// Delete the character before the cursor.
    pub fn delete_char(&mut self) {
        self.clamp_cursor();
        if self.cursor > 0 {
            let prev = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.text.remove(prev);
            self.cursor = prev;
        }
    }

    /// Delete the word before the cursor (Ctrl+W).
    pub fn delete_word(&mut self) {
        self.clamp_cursor();
        if self.cursor > 0 {
            let bytes = self.text.as_bytes();
            let mut end = self.cursor;
            while end > 0 && bytes[end - 1] == b' ' {
                end -= 1;
            }
            let mut start = end;
            while start > 0 && bytes[start - 1] != b' ' {
                start -= 1;
            }
            self.text.drain(start..self.cursor);
            self.cursor = start;
        }
    }

    pub fn move_left(&mut self) {
        self.clamp_cursor();
        if let Some((i, _)) = self.text[..self.cursor].char_indices().next_back() {
            self.cursor = i;
        }
    }

    pub fn move_right(&mut self) {
        self.clamp_cursor();
        if let Some(c) = self.text[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    /// Line number and column (in bytes) of the cursor.
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let cursor = self.cursor.min(self.text.len());
        let before = &self.text[..cursor];
        let line = before.matches('\n').count();
        let col = before.rfind('\n').map(|p| cursor - p - 1).unwrap_or(cursor);
        (line, col)
    }

    /// Text with a visible cursor marker, for rendering.
    pub fn with_cursor(&self) -> String {
        let cursor = self.cursor.min(self.text.len());
        format!("{}▏{}", &self.text[..cursor], &self.text[cursor..])
    }
}

/// An open editor bound to a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineEdit {
    pub target: EditTarget,
    pub input: TextInput,
}

impl InlineEdit {
    /// Open an editor pre-filled with the target's current value.
    /// Returns `None` when there is no product or the list entry does not exist.
    pub fn begin(target: EditTarget, state: &ViewState) -> Option<Self> {
        let product = state.product.as_ref()?;
        let initial = match target {
            EditTarget::ProductName => product.field(ProductField::Name).to_string(),
            EditTarget::Description => product.field(ProductField::Description).to_string(),
            EditTarget::Trend(i) => product.trend_descriptions.get(i)?.clone(),
            EditTarget::Link(i) => state.links.get(i)?.clone(),
            EditTarget::NewTrend | EditTarget::NewLink => String::new(),
        };
        Some(Self {
            target,
            input: TextInput::new(initial, target.is_multiline()),
        })
    }

    /// Write the buffer back to the state. Returns a status message.
    pub fn commit(self, state: &mut ViewState) -> String {
        let text = self.input.text;
        match self.target {
            EditTarget::ProductName => {
                state.set_field(ProductField::Name, &text);
                "Name updated".to_string()
            }
            EditTarget::Description => {
                state.set_field(ProductField::Description, &text);
                "Description updated".to_string()
            }
            EditTarget::Trend(i) => {
                state.update_trend(i, &text);
                format!("Trend text {} updated", i + 1)
            }
            EditTarget::Link(i) => {
                state.update_link(i, &text);
                format!("Link {} updated", i + 1)
            }
            EditTarget::NewTrend => {
                if state.add_trend(&text) {
                    "Trend text added".to_string()
                } else {
                    "Empty trend text ignored".to_string()
                }
            }
            EditTarget::NewLink => {
                if state.add_link(&text) {
                    "Link added".to_string()
                } else {
                    "Empty link ignored".to_string()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trendlens_core::catalog::Catalog;

    fn state() -> ViewState {
        let mut state = ViewState::new(6);
        let catalog = Catalog::from_json(
            r#"{"products": [{"id": 1, "name": "Neem Oil", "description": "Pesticide",
                "trend_descriptions": ["neem demand"], "reviews": []}]}"#,
        )
        .unwrap();
        state.apply_catalog(catalog, 1).unwrap();
        state
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut input = TextInput::new("ab", false);
        input.insert_char('c');
        input.move_left();
        input.move_left();
        input.insert_char('é');
        assert_eq!(input.text, "aébc");
        input.delete_char();
        assert_eq!(input.text, "abc");
        assert_eq!(input.cursor, 1);
    }

    #[test]
    fn test_delete_word() {
        let mut input = TextInput::new("organic neem oil  ", false);
        input.delete_word();
        assert_eq!(input.text, "organic neem ");
    }

    #[test]
    fn test_single_line_rejects_newlines() {
        let mut input = TextInput::new("", false);
        input.insert_char('\n');
        input.insert_str("a\nb");
        assert_eq!(input.text, "a b");

        let mut multi = TextInput::new("", true);
        multi.insert_str("a\nbc");
        assert_eq!(multi.cursor_line_col(), (1, 2));
    }

    #[test]
    fn test_begin_prefills_current_value() {
        let state = state();
        let edit = InlineEdit::begin(EditTarget::Trend(0), &state).unwrap();
        assert_eq!(edit.input.text, "neem demand");
        assert!(InlineEdit::begin(EditTarget::Trend(5), &state).is_none());
        assert!(InlineEdit::begin(EditTarget::NewTrend, &ViewState::new(6)).is_none());
    }

    #[test]
    fn test_commit_new_trend_and_blank() {
        let mut state = state();
        let mut edit = InlineEdit::begin(EditTarget::NewTrend, &state).unwrap();
        edit.input.insert_str("neem exports");
        assert_eq!(edit.commit(&mut state), "Trend text added");

        let mut blank = InlineEdit::begin(EditTarget::NewTrend, &state).unwrap();
        blank.input.insert_str("   ");
        assert_eq!(blank.commit(&mut state), "Empty trend text ignored");
        assert_eq!(state.trend_descriptions().len(), 2);
    }

    #[test]
    fn test_commit_description() {
        let mut state = state();
        let mut edit = InlineEdit::begin(EditTarget::Description, &state).unwrap();
        edit.input.insert_str("\nCold pressed");
        edit.commit(&mut state);
        assert_eq!(
            state.product.as_ref().unwrap().description,
            "Pesticide\nCold pressed"
        );
    }

    #[test]
    fn test_with_cursor_marks_position() {
        let mut input = TextInput::new("ab", false);
        input.move_left();
        assert_eq!(input.with_cursor(), "a▏b");
    }
}
