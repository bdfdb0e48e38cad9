//! Parsing of the free-text suggestion service response into selectable phrases.

use serde::{Deserialize, Serialize};

/// A candidate trend phrase offered to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendSuggestion {
    pub text: String,
    pub selected: bool,
}

impl TrendSuggestion {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            selected: false,
        }
    }

    pub fn toggle(&mut self) {
        self.selected = !self.selected;
    }
}

/// Separator between quoted phrases in the raw response.
const PHRASE_SEPARATOR: &str = "\", \"";

/// Only the first element of the service's `suggested_trends` list is parsed.
pub fn first_response(suggested_trends: &[String]) -> Option<&str> {
    suggested_trends.first().map(String::as_str)
}

/// Turn `"a", "b!!"` style text into unselected suggestions.
///
/// One leading and one trailing double quote are removed, the rest is split
/// on `", "`, and each fragment keeps only ASCII letters, digits, whitespace,
/// `.` and `,` before being trimmed. Empty fragments are kept.
pub fn parse_suggestions(raw: &str) -> Vec<TrendSuggestion> {
    let unquoted = raw.strip_prefix('"').unwrap_or(raw);
    let unquoted = unquoted.strip_suffix('"').unwrap_or(unquoted);

    unquoted
        .split(PHRASE_SEPARATOR)
        .map(|fragment| TrendSuggestion::new(clean_fragment(fragment)))
        .collect()
}

fn clean_fragment(fragment: &str) -> String {
    fragment
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '.' || *c == ',')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Texts of the selected suggestions, in display order.
pub fn selected_texts(suggestions: &[TrendSuggestion]) -> Vec<String> {
    suggestions
        .iter()
        .filter(|s| s.selected)
        .map(|s| s.text.clone())
        .collect()
}
