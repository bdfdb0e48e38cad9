//! Trend report section: the service's markdown-ish text rendered as styled lines.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use trendlens_core::report::ReportBlock;
use trendlens_core::state::Section;
use trendlens_core::ViewState;

use crate::action::Action;
use crate::components::{render_section_frame, Component, RenderContext};
use crate::theme::Theme;

pub struct ReportViewComponent {
    scroll: u16,
}

impl ReportViewComponent {
    pub fn new() -> Self {
        Self { scroll: 0 }
    }

    /// One styled line per report block.
    pub fn block_line(block: &ReportBlock) -> Line<'static> {
        match block {
            ReportBlock::Heading(text) => {
                Line::from(Span::styled(text.clone(), Theme::report_heading()))
            }
            ReportBlock::Subheading(text) => {
                Line::from(Span::styled(text.clone(), Theme::report_subheading()))
            }
            ReportBlock::ListItem(text) => Line::from(vec![
                Span::styled("  • ", Theme::key_hint()),
                Span::styled(text.clone(), Theme::normal()),
            ]),
            ReportBlock::Paragraph(text) => Line::from(Span::styled(text.clone(), Theme::normal())),
        }
    }
}

impl Component for ReportViewComponent {
    fn handle_action(&mut self, _state: &mut ViewState, action: &Action) -> Option<Action> {
        match action {
            Action::ScrollUp => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            Action::ScrollDown => {
                self.scroll = self.scroll.saturating_add(1);
                None
            }
            Action::AnalysisReceived { .. } | Action::NavigateTo(_) => {
                self.scroll = 0;
                None
            }
            Action::Confirm => Some(Action::ExportReport),
            _ => None,
        }
    }

    fn render(&self, ctx: &RenderContext<'_>, frame: &mut Frame, area: Rect) {
        let Some(inner) = render_section_frame(Section::TrendReport, ctx, frame, area) else {
            return;
        };

        if ctx.state.report_text().is_none() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "No report yet. Press r to run the trend analysis.",
                    Theme::dim(),
                )),
                inner,
            );
            return;
        }

        let mut lines: Vec<Line> = Vec::new();
        if let Some(analysis) = ctx.state.analysis.as_ref() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("Received {}", analysis.received_at.format("%Y-%m-%d %H:%M")),
                    Theme::dim(),
                ),
                Span::styled("  [x] export", Theme::key_hint()),
            ]));
        }
        lines.extend(ctx.state.report_blocks().iter().map(Self::block_line));

        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .scroll((self.scroll, 0)),
            inner,
        );
    }
}
