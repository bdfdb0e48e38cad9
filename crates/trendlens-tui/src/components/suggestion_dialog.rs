//! Suggestion dialog — overlay for picking suggested trend phrases.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use trendlens_core::ViewState;

use crate::action::Action;
use crate::components::{centered_rect, truncate, Component, RenderContext};
use crate::theme::Theme;

pub struct SuggestionDialogComponent {
    /// Highlighted suggestion.
    pub cursor: usize,
}

impl SuggestionDialogComponent {
    pub fn new() -> Self {
        Self { cursor: 0 }
    }
}

impl Component for SuggestionDialogComponent {
    fn handle_action(&mut self, state: &mut ViewState, action: &Action) -> Option<Action> {
        if !state.suggestions_open {
            self.cursor = 0;
            return None;
        }

        let len = state.suggestions.len();
        match action {
            Action::ScrollUp | Action::FocusPrev => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            Action::ScrollDown | Action::FocusNext => {
                if self.cursor + 1 < len {
                    self.cursor += 1;
                }
                None
            }
            Action::Toggle => {
                state.toggle_suggestion(self.cursor);
                None
            }
            Action::Confirm | Action::AcceptSuggestions => {
                let added = state.accept_suggestions();
                self.cursor = 0;
                Some(Action::SetStatus(format!(
                    "Added {added} suggested trend{}",
                    if added == 1 { "" } else { "s" }
                )))
            }
            Action::Cancel => {
                state.close_suggestions();
                self.cursor = 0;
                Some(Action::SetStatus("Suggestions discarded".to_string()))
            }
            _ => None,
        }
    }

    fn render(&self, ctx: &RenderContext<'_>, frame: &mut Frame, area: Rect) {
        let state = ctx.state;
        if !state.suggestions_open {
            return;
        }

        let height = (state.suggestions.len() as u16).clamp(1, 14) + 5;
        let dialog_area = centered_rect(area, 64.min(area.width), height.min(area.height));

        // Clear the background.
        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(" Suggested Trends ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::accent()));

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let chunks = Layout::vertical([
            Constraint::Min(1),    // Pills
            Constraint::Length(1), // Spacer
            Constraint::Length(2), // Instructions
        ])
        .split(inner);

        if state.suggestions.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("No suggestions returned.", Theme::dim())),
                chunks[0],
            );
        } else {
            let width = chunks[0].width.saturating_sub(6) as usize;
            let items: Vec<ListItem> = state
                .suggestions
                .iter()
                .map(|s| {
                    let mark = if s.selected { "✓ " } else { "  " };
                    ListItem::new(Line::from(Span::styled(
                        format!(" {mark}{} ", truncate(&s.text, width)),
                        Theme::pill(s.selected),
                    )))
                })
                .collect();
            let list = List::new(items).highlight_symbol("▸ ");
            let mut list_state = ListState::default().with_selected(Some(self.cursor));
            frame.render_stateful_widget(list, chunks[0], &mut list_state);
        }

        let instructions = Paragraph::new(vec![
            Line::from(vec![
                Span::styled("[Up/Down]", Theme::selected()),
                Span::styled(" move  ", Theme::dim()),
                Span::styled("[Space]", Theme::selected()),
                Span::styled(" select  ", Theme::dim()),
                Span::styled("[Enter]", Theme::selected()),
                Span::styled(" add selected", Theme::dim()),
            ]),
            Line::from(vec![
                Span::styled("[Esc]", Theme::selected()),
                Span::styled(" cancel", Theme::dim()),
            ]),
        ]);
        frame.render_widget(instructions, chunks[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trendlens_core::catalog::Catalog;

    fn open_state() -> ViewState {
        let mut state = ViewState::new(6);
        let catalog = Catalog::from_json(
            r#"{"products": [{"id": 1, "name": "Neem Oil", "trend_descriptions": ["neem demand"]}]}"#,
        )
        .unwrap();
        state.apply_catalog(catalog, 1).unwrap();
        state
            .open_suggestions(&[r#""organic farming", "pest control", "home garden""#.to_string()])
            .unwrap();
        state
    }

    #[test]
    fn test_toggle_and_accept() {
        let mut state = open_state();
        let mut dialog = SuggestionDialogComponent::new();
        dialog.handle_action(&mut state, &Action::ScrollDown);
        dialog.handle_action(&mut state, &Action::Toggle);
        dialog.handle_action(&mut state, &Action::ScrollDown);
        dialog.handle_action(&mut state, &Action::Toggle);

        let status = dialog.handle_action(&mut state, &Action::Confirm);
        assert!(matches!(status, Some(Action::SetStatus(ref m)) if m == "Added 2 suggested trends"));
        assert!(!state.suggestions_open);
        assert_eq!(
            state.trend_descriptions(),
            ["neem demand", "pest control", "home garden"]
        );
    }

    #[test]
    fn test_cancel_discards() {
        let mut state = open_state();
        let mut dialog = SuggestionDialogComponent::new();
        dialog.handle_action(&mut state, &Action::Toggle);
        dialog.handle_action(&mut state, &Action::Cancel);
        assert!(!state.suggestions_open);
        assert!(state.suggestions.is_empty());
        assert_eq!(state.trend_descriptions(), ["neem demand"]);
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut state = open_state();
        let mut dialog = SuggestionDialogComponent::new();
        for _ in 0..10 {
            dialog.handle_action(&mut state, &Action::ScrollDown);
        }
        assert_eq!(dialog.cursor, 2);
    }
}
