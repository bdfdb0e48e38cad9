//! Title, product selector and the editable product name.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::components::{truncate, Component, RenderContext};
use crate::input::EditTarget;
use crate::theme::Theme;

/// Rows the header occupies.
pub const HEADER_HEIGHT: u16 = 5;

pub struct HeaderComponent;

impl HeaderComponent {
    pub fn new() -> Self {
        Self
    }

    fn selector_line(ctx: &RenderContext<'_>, width: usize) -> Line<'static> {
        let state = ctx.state;
        let mut spans = vec![Span::styled(" Select Product: ", Theme::header())];

        if state.products.is_empty() {
            spans.push(Span::styled("--Select a Product--", Theme::dim()));
            return Line::from(spans);
        }

        let position = state
            .route
            .and_then(|id| state.products.iter().position(|p| p.id == id));
        let label = match position {
            Some(i) => format!(
                "{} ({}/{})",
                state.products[i].name,
                i + 1,
                state.products.len()
            ),
            None => "--Select a Product--".to_string(),
        };

        spans.push(Span::styled("[ ", Theme::key_hint()));
        spans.push(Span::styled(
            truncate(&label, width.saturating_sub(28)),
            Theme::selected(),
        ));
        spans.push(Span::styled(" ]", Theme::key_hint()));
        spans.push(Span::styled("  [/] switch", Theme::dim()));
        Line::from(spans)
    }
}

impl Component for HeaderComponent {
    fn render(&self, ctx: &RenderContext<'_>, frame: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Selector
            Constraint::Length(3), // Name
        ])
        .split(area);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                " Product Details and Trend Analysis",
                Theme::title(),
            ))),
            chunks[0],
        );

        frame.render_widget(
            Paragraph::new(Self::selector_line(ctx, area.width as usize)),
            chunks[1],
        );

        let Some(product) = ctx.state.product.as_ref() else {
            return;
        };

        let editing = ctx
            .edit
            .filter(|e| e.target == EditTarget::ProductName);
        let block = Block::default()
            .title(" Name [n] ")
            .title_style(Theme::muted())
            .borders(Borders::ALL)
            .border_style(if editing.is_some() {
                Theme::border_focused()
            } else {
                Theme::border()
            });
        let body = match editing {
            Some(edit) => Span::styled(edit.input.with_cursor(), Theme::input()),
            None => Span::styled(product.name.clone(), Theme::header()),
        };
        frame.render_widget(Paragraph::new(body).block(block), chunks[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use trendlens_core::catalog::Catalog;
    use trendlens_core::ViewState;

    #[test]
    fn test_renders_selected_product() {
        let mut state = ViewState::new(6);
        let catalog = Catalog::from_json(
            r#"{"products": [{"id": 1, "name": "Neem Oil"}, {"id": 2, "name": "Drip Kit"}]}"#,
        )
        .unwrap();
        state.apply_catalog(catalog, 2).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(60, HEADER_HEIGHT)).unwrap();
        terminal
            .draw(|frame| {
                let ctx = RenderContext {
                    state: &state,
                    edit: None,
                    focused: false,
                };
                HeaderComponent::new().render(&ctx, frame, frame.area());
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Drip Kit (2/2)"));
        assert!(text.contains("Name [n]"));
    }
}
