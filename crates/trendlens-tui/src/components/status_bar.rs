//! Status bar at the bottom of the TUI.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use trendlens_core::state::Section;
use trendlens_core::ViewState;

use crate::action::Action;
use crate::components::{truncate, Component, RenderContext};
use crate::theme::Theme;

pub struct StatusBarComponent {
    /// Current status message.
    pub message: String,
    /// Section that currently has focus.
    pub focus: Section,
}

impl StatusBarComponent {
    pub fn new() -> Self {
        Self {
            message: "Loading product catalog...".to_string(),
            focus: Section::Description,
        }
    }

    /// Short section name for the pill badge.
    fn section_badge(&self) -> &'static str {
        match self.focus {
            Section::Description => "Description",
            Section::TrendTexts => "Trends",
            Section::WebsiteLinks => "Links",
            Section::CustomerReviews => "Reviews",
            Section::TrendReport => "Report",
            Section::TrendPlot => "Plot",
        }
    }

    fn hints(&self) -> &'static str {
        match self.focus {
            Section::TrendTexts | Section::WebsiteLinks => "a·e·d·s·r·?",
            Section::Description => "e·n·s·r·?",
            _ => "s·r·x·?",
        }
    }
}

impl Component for StatusBarComponent {
    fn handle_action(&mut self, _state: &mut ViewState, action: &Action) -> Option<Action> {
        match action {
            Action::SetStatus(msg) => {
                self.message = msg.clone();
                None
            }
            Action::ClearStatus => {
                self.message.clear();
                None
            }
            _ => None,
        }
    }

    fn render(&self, ctx: &RenderContext<'_>, frame: &mut Frame, area: Rect) {
        let width = area.width as usize;

        let hints = self.hints();
        let hints_len = hints.chars().count() + 1;

        let badge = match ctx.edit {
            Some(edit) => edit.target.label(),
            None => self.section_badge(),
        };
        let badge_len = badge.chars().count() + 2;

        let msg_budget = width
            .saturating_sub(badge_len)
            .saturating_sub(hints_len)
            .saturating_sub(4);
        let msg = truncate(&self.message, msg_budget);

        // Pad to push hints to the right edge
        let used = badge_len + 2 + msg.chars().count();
        let pad = width.saturating_sub(used + hints_len);

        let line = Line::from(vec![
            Span::styled(format!(" {} ", badge), Theme::muted()),
            Span::styled("  ", Theme::dim()),
            Span::styled(msg, Theme::dim()),
            Span::raw(" ".repeat(pad)),
            Span::styled(hints, Theme::key_hint()),
            Span::raw(" "),
        ]);

        frame.render_widget(Paragraph::new(line).style(Theme::status_bar()), area);
    }
}
