//! Customer reviews section (read-only).

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use trendlens_core::product::Review;
use trendlens_core::state::Section;
use trendlens_core::ViewState;

use crate::action::Action;
use crate::components::{render_section_frame, Component, RenderContext};
use crate::theme::Theme;

const MAX_RATING: f64 = 5.0;

pub struct ReviewsComponent {
    scroll: u16,
}

impl ReviewsComponent {
    pub fn new() -> Self {
        Self { scroll: 0 }
    }

    fn review_lines(review: &Review) -> Vec<Line<'static>> {
        let stars = review.rating.clamp(0.0, MAX_RATING).round() as usize;
        vec![
            Line::from(vec![
                Span::styled(review.customer_name.clone(), Theme::header()),
                Span::raw("  "),
                Span::styled(
                    format!("{}{}", "★".repeat(stars), "☆".repeat(5 - stars)),
                    Style::default().fg(Theme::rating_color(review.rating, MAX_RATING)),
                ),
                Span::styled(format!(" {}", review.rating), Theme::dim()),
            ]),
            Line::from(Span::styled(review.review.clone(), Theme::normal())),
            Line::from(""),
        ]
    }
}

impl Component for ReviewsComponent {
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
            Action::NavigateTo(_) | Action::CatalogLoaded { .. } => {
                self.scroll = 0;
                None
            }
            _ => None,
        }
    }

    fn render(&self, ctx: &RenderContext<'_>, frame: &mut Frame, area: Rect) {
        let Some(inner) = render_section_frame(Section::CustomerReviews, ctx, frame, area) else {
            return;
        };
        if ctx.state.product.is_none() {
            return;
        }

        let reviews = ctx.state.reviews();
        if reviews.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("No customer reviews.", Theme::dim())),
                inner,
            );
            return;
        }

        let lines: Vec<Line> = reviews.iter().flat_map(Self::review_lines).collect();
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .scroll((self.scroll, 0)),
            inner,
        );
    }
}
