//! Product description section.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use trendlens_core::state::Section;
use trendlens_core::ViewState;

use crate::action::Action;
use crate::components::{render_section_frame, Component, RenderContext};
use crate::input::EditTarget;
use crate::theme::Theme;

pub struct DescriptionComponent {
    scroll: u16,
}

impl DescriptionComponent {
    pub fn new() -> Self {
        Self { scroll: 0 }
    }
}

impl Component for DescriptionComponent {
    fn handle_action(&mut self, _state: &mut ViewState, action: &Action) -> Option<Action> {
        match action {
            Action::EditItem | Action::Confirm => Some(Action::BeginEdit(EditTarget::Description)),
            Action::ScrollUp => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            Action::ScrollDown => {
                self.scroll = self.scroll.saturating_add(1);
                None
            }
            Action::NavigateTo(_) | Action::CatalogLoaded { .. } => {
                self.scroll = 0;
                None
            }
            _ => None,
        }
    }

    fn render(&self, ctx: &RenderContext<'_>, frame: &mut Frame, area: Rect) {
        let Some(inner) = render_section_frame(Section::Description, ctx, frame, area) else {
            return;
        };
        let Some(product) = ctx.state.product.as_ref() else {
            return;
        };

        let editing = ctx.edit.filter(|e| e.target == EditTarget::Description);
        let paragraph = match editing {
            Some(edit) => {
                let lines: Vec<Line> = edit
                    .input
                    .with_cursor()
                    .split('\n')
                    .map(|l| Line::from(Span::styled(l.to_string(), Theme::input())))
                    .collect();
                let (row, _) = edit.input.cursor_line_col();
                let scroll = (row as u16).saturating_sub(inner.height.saturating_sub(1));
                Paragraph::new(lines).scroll((scroll, 0))
            }
            None if product.description.is_empty() => {
                Paragraph::new(Span::styled("No description. Press e to write one.", Theme::dim()))
            }
            None => Paragraph::new(product.description.clone())
                .style(Theme::normal())
                .scroll((self.scroll, 0)),
        };

        frame.render_widget(paragraph.wrap(Wrap { trim: false }), inner);
    }
}
