//! Editable string lists: trend search texts and website links.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use trendlens_core::state::Section;
use trendlens_core::ViewState;

use crate::action::Action;
use crate::components::{render_section_frame, truncate, Component, RenderContext};
use crate::input::EditTarget;
use crate::theme::Theme;

/// Which list of the view this component edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Trends,
    Links,
}

impl ListKind {
    pub fn section(&self) -> Section {
        match self {
            ListKind::Trends => Section::TrendTexts,
            ListKind::Links => Section::WebsiteLinks,
        }
    }

    fn items<'a>(&self, state: &'a ViewState) -> &'a [String] {
        match self {
            ListKind::Trends => state.trend_descriptions(),
            ListKind::Links => state.links.as_slice(),
        }
    }

    fn entry_target(&self, index: usize) -> EditTarget {
        match self {
            ListKind::Trends => EditTarget::Trend(index),
            ListKind::Links => EditTarget::Link(index),
        }
    }

    fn new_target(&self) -> EditTarget {
        match self {
            ListKind::Trends => EditTarget::NewTrend,
            ListKind::Links => EditTarget::NewLink,
        }
    }

    fn empty_hint(&self) -> &'static str {
        match self {
            ListKind::Trends => "No trend search texts. Press a to add one or s for suggestions.",
            ListKind::Links => "No website links. Press a to add one.",
        }
    }
}

pub struct EditableListComponent {
    kind: ListKind,
    /// Highlighted entry.
    pub selected: usize,
}

impl EditableListComponent {
    pub fn new(kind: ListKind) -> Self {
        Self { kind, selected: 0 }
    }

    pub fn kind(&self) -> ListKind {
        self.kind
    }

    fn clamp(&mut self, len: usize) {
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}

impl Component for EditableListComponent {
    fn handle_action(&mut self, state: &mut ViewState, action: &Action) -> Option<Action> {
        let len = self.kind.items(state).len();
        match action {
            Action::ScrollUp => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            Action::ScrollDown => {
                if self.selected + 1 < len {
                    self.selected += 1;
                }
                None
            }
            Action::AddItem => Some(Action::BeginEdit(self.kind.new_target())),
            Action::EditItem | Action::Confirm => {
                if len == 0 {
                    return Some(Action::BeginEdit(self.kind.new_target()));
                }
                self.clamp(len);
                Some(Action::BeginEdit(self.kind.entry_target(self.selected)))
            }
            Action::DeleteItem => {
                if len == 0 {
                    return None;
                }
                self.clamp(len);
                let index = self.selected;
                match self.kind {
                    ListKind::Trends => state.delete_trend(index),
                    ListKind::Links => state.delete_link(index),
                }
                self.clamp(len - 1);
                Some(Action::SetStatus(format!("Deleted entry {}", index + 1)))
            }
            Action::NavigateTo(_) | Action::CatalogLoaded { .. } => {
                self.selected = 0;
                None
            }
            _ => None,
        }
    }

    fn render(&self, ctx: &RenderContext<'_>, frame: &mut Frame, area: Rect) {
        let Some(inner) = render_section_frame(self.kind.section(), ctx, frame, area) else {
            return;
        };
        if ctx.state.product.is_none() {
            return;
        }

        let (list_area, footer) = if self.kind == ListKind::Trends {
            let chunks =
                Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);
            (chunks[0], Some(chunks[1]))
        } else {
            (inner, None)
        };

        let items = self.kind.items(ctx.state);
        let width = list_area.width.saturating_sub(4) as usize;
        let edit = ctx.edit;

        let mut rows: Vec<ListItem> = items
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let editing = edit.filter(|e| e.target == self.kind.entry_target(i));
                let line = match editing {
                    Some(e) => Line::from(vec![
                        Span::styled(format!("{:>2}. ", i + 1), Theme::key_hint()),
                        Span::styled(e.input.with_cursor(), Theme::input()),
                    ]),
                    None => Line::from(vec![
                        Span::styled(format!("{:>2}. ", i + 1), Theme::dim()),
                        Span::styled(truncate(text, width), Theme::normal()),
                    ]),
                };
                ListItem::new(line)
            })
            .collect();

        if let Some(draft) = edit.filter(|e| e.target == self.kind.new_target()) {
            rows.push(ListItem::new(Line::from(vec![
                Span::styled(" +  ", Theme::key_hint()),
                Span::styled(draft.input.with_cursor(), Theme::input()),
            ])));
        }

        if rows.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(self.kind.empty_hint(), Theme::dim())),
                list_area,
            );
        } else {
            let highlight = if ctx.focused && edit.is_none() {
                Theme::selection()
            } else {
                Theme::normal()
            };
            let list = List::new(rows).highlight_style(highlight);
            let selected = if edit.is_some_and(|e| e.target == self.kind.new_target()) {
                items.len()
            } else {
                self.selected.min(items.len().saturating_sub(1))
            };
            let mut list_state = ListState::default().with_selected(Some(selected));
            frame.render_stateful_widget(list, list_area, &mut list_state);
        }

        if let Some(footer) = footer {
            let line = Line::from(vec![
                Span::styled(" Trend duration: ", Theme::muted()),
                Span::styled(
                    format!("{} months", ctx.state.trend_duration()),
                    Theme::header(),
                ),
                Span::styled("  [+/-]", Theme::key_hint()),
            ]);
            frame.render_widget(Paragraph::new(line), footer);
        }
    }
}
