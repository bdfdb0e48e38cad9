//! Loading overlay shown while a service call is in flight.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use trendlens_core::ViewState;

use crate::action::Action;
use crate::components::{centered_rect, Component, RenderContext};
use crate::theme::Theme;

/// Braille spinner frames.
const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct LoadingComponent {
    spinner_tick: usize,
}

impl LoadingComponent {
    pub fn new() -> Self {
        Self { spinner_tick: 0 }
    }

    pub fn frame_symbol(&self) -> &'static str {
        SPINNER[self.spinner_tick % SPINNER.len()]
    }
}

impl Component for LoadingComponent {
    fn handle_action(&mut self, state: &mut ViewState, action: &Action) -> Option<Action> {
        if matches!(action, Action::Tick) && state.is_loading() {
            self.spinner_tick = self.spinner_tick.wrapping_add(1);
        }
        None
    }

    fn render(&self, ctx: &RenderContext<'_>, frame: &mut Frame, area: Rect) {
        let Some(label) = ctx.state.loading_label() else {
            return;
        };

        // Dim everything underneath.
        frame.buffer_mut().set_style(area, Theme::blurred());

        let width = (label.chars().count() as u16 + 12).min(area.width);
        let dialog = centered_rect(area, width, 3);
        frame.render_widget(Clear, dialog);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::accent()));
        let line = Line::from(vec![
            Span::styled(format!(" {} ", self.frame_symbol()), Theme::title()),
            Span::styled(format!("{label}..."), Theme::header()),
        ]);
        frame.render_widget(Paragraph::new(line).block(block), dialog);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trendlens_core::catalog::Catalog;
    use trendlens_core::operation::OperationKind;

    #[test]
    fn test_spinner_advances_only_while_loading() {
        let mut state = ViewState::new(6);
        let mut loading = LoadingComponent::new();
        loading.handle_action(&mut state, &Action::Tick);
        assert_eq!(loading.frame_symbol(), "⠋");

        let catalog = Catalog::from_json(r#"{"products": [{"id": 1, "name": "Neem Oil"}]}"#).unwrap();
        state.apply_catalog(catalog, 1).unwrap();
        let token = state.begin_operation(OperationKind::TrendAnalysis).unwrap();
        loading.handle_action(&mut state, &Action::Tick);
        assert_eq!(loading.frame_symbol(), "⠙");

        state.finish_operation(token);
        loading.handle_action(&mut state, &Action::Tick);
        assert_eq!(loading.frame_symbol(), "⠙");
    }
}
