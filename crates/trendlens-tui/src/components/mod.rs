//! Component trait and all TUI components.
//!
//! Components keep only presentation state (selection, scroll). Everything
//! the user edits lives in the shared [`ViewState`].

pub mod description;
pub mod editable_list;
pub mod header;
pub mod help;
pub mod loading;
pub mod report_view;
pub mod reviews;
pub mod status_bar;
pub mod suggestion_dialog;
pub mod trend_chart;

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use trendlens_core::state::Section;
use trendlens_core::ViewState;

use crate::action::Action;
use crate::input::InlineEdit;
use crate::theme::Theme;

/// Everything a component may read while rendering.
pub struct RenderContext<'a> {
    pub state: &'a ViewState,
    /// The open inline editor, if any.
    pub edit: Option<&'a InlineEdit>,
    /// Whether the component's section has focus.
    pub focused: bool,
}

/// Trait implemented by all TUI components.
pub trait Component {
    /// Handle an action and optionally return a new action to dispatch.
    fn handle_action(&mut self, state: &mut ViewState, action: &Action) -> Option<Action> {
        let _ = (state, action);
        None
    }

    /// Render the component into the given area.
    fn render(&self, ctx: &RenderContext<'_>, frame: &mut Frame, area: Rect);
}

/// Height a section takes when collapsed: just its header line.
pub const COLLAPSED_HEIGHT: u16 = 1;

/// Bordered frame for an expanded section.
pub fn section_block(section: Section, focused: bool) -> Block<'static> {
    let border = if focused {
        Theme::border_focused()
    } else {
        Theme::border()
    };
    Block::default()
        .title(format!(" ▾ {} ", section.title()))
        .title_style(if focused { Theme::title() } else { Theme::header() })
        .borders(Borders::ALL)
        .border_style(border)
}

/// Single header line for a collapsed section.
pub fn render_collapsed(section: Section, focused: bool, frame: &mut Frame, area: Rect) {
    let style = if focused { Theme::title() } else { Theme::muted() };
    let line = Line::from(vec![
        Span::styled(format!(" ▸ {} ", section.title()), style),
        Span::styled("(collapsed)", Theme::dim()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Render a section frame (or its collapsed header) and return the inner
/// area to draw the body into, if expanded.
pub fn render_section_frame(
    section: Section,
    ctx: &RenderContext<'_>,
    frame: &mut Frame,
    area: Rect,
) -> Option<Rect> {
    if ctx.state.is_collapsed(section) {
        render_collapsed(section, ctx.focused, frame, area);
        return None;
    }
    let block = section_block(section, ctx.focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    Some(inner)
}

/// Vertical constraints for a column of sections: collapsed ones shrink to
/// their header and expanded ones share the rest using `weights`.
pub fn column_constraints(state: &ViewState, sections: &[(Section, u16)]) -> Vec<Constraint> {
    sections
        .iter()
        .map(|(section, weight)| {
            if state.is_collapsed(*section) {
                Constraint::Length(COLLAPSED_HEIGHT)
            } else {
                Constraint::Fill(*weight)
            }
        })
        .collect()
}

/// Center a rectangle inside another.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(height),
        Constraint::Min(0),
    ])
    .flex(Flex::Center)
    .split(area);

    let horizontal = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(width),
        Constraint::Min(0),
    ])
    .flex(Flex::Center)
    .split(vertical[1]);

    horizontal[1]
}

/// Shorten `s` to at most `max` characters, marking the cut with `...`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let kept: String = s.chars().take(max - 3).collect();
        format!("{kept}...")
    } else {
        s.chars().take(max).collect()
    }
}
