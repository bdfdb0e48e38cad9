//! Help overlay — keybinding reference.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use trendlens_core::ViewState;

use crate::action::Action;
use crate::components::{centered_rect, Component, RenderContext};
use crate::theme::Theme;

pub struct HelpComponent {
    pub visible: bool,
}

impl HelpComponent {
    pub fn new() -> Self {
        Self { visible: false }
    }
}

impl Component for HelpComponent {
    fn handle_action(&mut self, _state: &mut ViewState, action: &Action) -> Option<Action> {
        match action {
            Action::ToggleHelp => {
                self.visible = !self.visible;
                None
            }
            Action::Tick | Action::SetStatus(_) | Action::ClearStatus => None,
            _ if self.visible => {
                // Any key closes help.
                self.visible = false;
                None
            }
            _ => None,
        }
    }

    fn render(&self, _ctx: &RenderContext<'_>, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let dialog = centered_rect(area, 58, 27);
        frame.render_widget(Clear, dialog);

        let block = Block::default()
            .title(" Help — Keybindings ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::accent()));

        let help_text = vec![
            Line::from(""),
            key_line("q / Ctrl+C", "Quit"),
            key_line("?", "Toggle this help"),
            key_line("[ / ]", "Previous / next product"),
            key_line("Tab / Shift+Tab", "Next / previous section"),
            key_line("Space", "Collapse / expand section"),
            key_line("Up / Down / j / k", "Select / scroll"),
            key_line("Esc", "Close dialog"),
            Line::from(""),
            Line::from(Span::styled("── Editing ──", Theme::header())),
            Line::from(""),
            key_line("n", "Edit product name"),
            key_line("e / Enter", "Edit description or entry"),
            key_line("a", "Add trend text or link"),
            key_line("d / Delete", "Delete highlighted entry"),
            key_line("+ / -", "Trend duration in months"),
            key_line("Ctrl+S / Alt+Enter", "Save edit (Esc discards)"),
            Line::from(""),
            Line::from(Span::styled("── Analysis ──", Theme::header())),
            Line::from(""),
            key_line("s", "Suggest trends"),
            key_line("r", "Run trend analysis"),
            key_line("x", "Export report to file"),
        ];

        let paragraph = Paragraph::new(help_text).block(block);
        frame.render_widget(paragraph, dialog);
    }
}

fn key_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {:<22}", key), Theme::selected()),
        Span::styled(desc, Theme::normal()),
    ])
}
