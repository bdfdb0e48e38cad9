//! Main application state and render loop.

use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::{Frame, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use trendlens_backend::BackendClient;
use trendlens_core::catalog::Catalog;
use trendlens_core::config::{ExportConfig, TrendlensConfig};
use trendlens_core::operation::OperationKind;
use trendlens_core::report::export_report;
use trendlens_core::state::Section;
use trendlens_core::ViewState;

use crate::action::{Action, InputMode};
use crate::components::description::DescriptionComponent;
use crate::components::editable_list::{EditableListComponent, ListKind};
use crate::components::header::{HeaderComponent, HEADER_HEIGHT};
use crate::components::help::HelpComponent;
use crate::components::loading::LoadingComponent;
use crate::components::report_view::ReportViewComponent;
use crate::components::reviews::ReviewsComponent;
use crate::components::status_bar::StatusBarComponent;
use crate::components::suggestion_dialog::SuggestionDialogComponent;
use crate::components::trend_chart::TrendChartComponent;
use crate::components::{column_constraints, Component, RenderContext};
use crate::event::{self, EventHandler, InputModeFlag};
use crate::input::{EditTarget, InlineEdit};
use crate::theme::Theme;

/// Left column sections and their share of the height.
const LEFT_COLUMN: &[(Section, u16)] = &[
    (Section::Description, 2),
    (Section::TrendTexts, 3),
    (Section::WebsiteLinks, 2),
    (Section::CustomerReviews, 3),
];

/// Right column sections and their share of the height.
const RIGHT_COLUMN: &[(Section, u16)] = &[(Section::TrendReport, 3), (Section::TrendPlot, 2)];

/// Main application state.
pub struct App {
    /// Everything the user edits, plus catalog and analysis results.
    state: ViewState,
    /// Section receiving navigation keys.
    focus: Section,
    /// Open inline editor, if any.
    edit: Option<InlineEdit>,
    /// Whether the app should exit.
    should_quit: bool,
    /// Shared flag to tell the EventHandler which key-mapping to use.
    input_mode_flag: InputModeFlag,

    // ── Service / files ──────────────────────────────────────
    /// HTTP client for the trend service (shared across async tasks).
    client: Arc<BackendClient>,
    catalog_path: PathBuf,
    export: ExportConfig,
    /// Product id to route to on startup.
    initial_route: i64,
    /// Last catalog read failure, shown instead of the editor.
    catalog_error: Option<String>,

    // Components
    header: HeaderComponent,
    description: DescriptionComponent,
    trends: EditableListComponent,
    links: EditableListComponent,
    reviews: ReviewsComponent,
    report: ReportViewComponent,
    chart: TrendChartComponent,
    suggestion_dialog: SuggestionDialogComponent,
    loading: LoadingComponent,
    status_bar: StatusBarComponent,
    help: HelpComponent,
}

impl App {
    pub fn new(config: &TrendlensConfig, route: i64) -> Self {
        let timeout = config.backend.timeout_seconds.map(Duration::from_secs);
        Self {
            state: ViewState::new(config.analysis.default_trend_duration),
            focus: Section::Description,
            edit: None,
            should_quit: false,
            input_mode_flag: event::new_input_mode_flag(),
            client: Arc::new(BackendClient::new(config.backend.base_url.clone(), timeout)),
            catalog_path: config.catalog.path.clone(),
            export: config.export.clone(),
            initial_route: route,
            catalog_error: None,
            header: HeaderComponent::new(),
            description: DescriptionComponent::new(),
            trends: EditableListComponent::new(ListKind::Trends),
            links: EditableListComponent::new(ListKind::Links),
            reviews: ReviewsComponent::new(),
            report: ReportViewComponent::new(),
            chart: TrendChartComponent::new(),
            suggestion_dialog: SuggestionDialogComponent::new(),
            loading: LoadingComponent::new(),
            status_bar: StatusBarComponent::new(),
            help: HelpComponent::new(),
        }
    }

    /// Run the TUI application.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        // Set up terminal.
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Create the action channel.
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();

        // Start the event handler with the shared input mode flag.
        let event_tx = tx.clone();
        let mode_flag = self.input_mode_flag.clone();
        let event_handler = EventHandler::new(event_tx, Duration::from_millis(100), mode_flag);
        tokio::spawn(async move {
            event_handler.run().await;
        });

        info!(
            route = self.initial_route,
            backend = %self.client.base_url(),
            "Starting trendlens"
        );
        self.handle_action(&Action::NavigateTo(self.initial_route), &tx);

        // Main loop.
        loop {
            terminal.draw(|frame| {
                self.render(frame);
            })?;

            if let Some(action) = rx.recv().await {
                self.handle_action(&action, &tx);

                if self.should_quit {
                    break;
                }
            }
        }

        // Restore terminal.
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableBracketedPaste
        )?;
        terminal.show_cursor()?;

        info!("Exiting trendlens");
        Ok(())
    }

    /// Keep the EventHandler's keymap in step with the inline editor.
    fn sync_input_mode(&self) {
        let mode = if self.edit.is_some() {
            InputMode::Editing
        } else {
            InputMode::Normal
        };
        event::set_input_mode(&self.input_mode_flag, mode);
    }

    /// Dispatch an action to the app and the relevant components.
    fn handle_action(&mut self, action: &Action, tx: &mpsc::UnboundedSender<Action>) {
        if matches!(action, Action::Quit) {
            self.should_quit = true;
            return;
        }

        if self.state.is_loading() && !action.allowed_while_loading() {
            debug!(?action, "Ignored while loading");
            return;
        }

        let result = if self.edit.is_some() && Self::is_edit_action(action) {
            self.handle_edit_action(action)
        } else if self.help.visible && Self::is_user_action(action) {
            self.help.handle_action(&mut self.state, action)
        } else if self.state.suggestions_open && Self::is_user_action(action) {
            self.suggestion_dialog.handle_action(&mut self.state, action)
        } else {
            self.handle_app_action(action, tx)
        };

        // Always forward to overlays and status bar.
        self.status_bar.handle_action(&mut self.state, action);
        self.loading.handle_action(&mut self.state, action);
        if matches!(action, Action::ToggleHelp) {
            self.help.handle_action(&mut self.state, action);
        }

        self.sync_input_mode();

        // Handle chained actions from components.
        if let Some(chained) = result {
            self.handle_action(&chained, tx);
        }
    }

    /// Keys produced by the editing keymap.
    fn is_edit_action(action: &Action) -> bool {
        matches!(
            action,
            Action::CharInput(_)
                | Action::BackspaceInput
                | Action::DeleteWord
                | Action::NewlineInput
                | Action::CursorLeft
                | Action::CursorRight
                | Action::SubmitForm
                | Action::CancelInput
                | Action::PasteBulk(_)
        )
    }

    /// Actions that come from a key press rather than a background task.
    fn is_user_action(action: &Action) -> bool {
        !matches!(
            action,
            Action::Tick
                | Action::SetStatus(_)
                | Action::ClearStatus
                | Action::ToggleHelp
                | Action::CatalogLoaded { .. }
                | Action::CatalogFailed(_)
                | Action::SuggestionsReceived { .. }
                | Action::SuggestionsFailed { .. }
                | Action::AnalysisReceived { .. }
                | Action::AnalysisFailed { .. }
        )
    }

    fn handle_edit_action(&mut self, action: &Action) -> Option<Action> {
        let edit = self.edit.as_mut()?;
        match action {
            Action::CharInput(c) => edit.input.insert_char(*c),
            Action::BackspaceInput => edit.input.delete_char(),
            Action::DeleteWord => edit.input.delete_word(),
            Action::CursorLeft => edit.input.move_left(),
            Action::CursorRight => edit.input.move_right(),
            Action::PasteBulk(text) => edit.input.insert_str(text),
            Action::NewlineInput if edit.target.is_multiline() => edit.input.insert_char('\n'),
            Action::NewlineInput | Action::SubmitForm => {
                let edit = self.edit.take()?;
                let status = edit.commit(&mut self.state);
                return Some(Action::SetStatus(status));
            }
            Action::CancelInput => {
                self.edit = None;
                return Some(Action::SetStatus("Edit discarded".to_string()));
            }
            _ => {}
        }
        None
    }

    fn handle_app_action(
        &mut self,
        action: &Action,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Option<Action> {
        match action {
            // ── Navigation ───────────────────────────────────────
            Action::FocusNext => {
                self.set_focus(self.focus.next());
                None
            }
            Action::FocusPrev => {
                self.set_focus(self.focus.prev());
                None
            }
            Action::Toggle => {
                self.state.toggle_section(self.focus);
                None
            }
            Action::ScrollUp
            | Action::ScrollDown
            | Action::AddItem
            | Action::EditItem
            | Action::DeleteItem
            | Action::Confirm => {
                if self.state.product.is_none() || self.state.is_collapsed(self.focus) {
                    return None;
                }
                self.forward_to_focused(action)
            }
            Action::EditName => Some(Action::BeginEdit(EditTarget::ProductName)),
            Action::BeginEdit(target) => {
                self.begin_edit(*target);
                None
            }

            // ── Catalog / routing ────────────────────────────────
            Action::NavigateTo(id) => {
                self.edit = None;
                self.broadcast(action);
                self.spawn_load_catalog(*id, tx.clone());
                None
            }
            Action::PrevProduct => self.state.neighbour_product_id(-1).map(Action::NavigateTo),
            Action::NextProduct => self.state.neighbour_product_id(1).map(Action::NavigateTo),
            Action::CatalogLoaded { catalog, route } => {
                self.catalog_error = None;
                self.broadcast(action);
                match self.state.apply_catalog(catalog.clone(), *route) {
                    Ok(()) => {
                        info!(product_id = *route, "Product selected");
                        Some(Action::SetStatus(format!(
                            "Loaded {} products",
                            self.state.products.len()
                        )))
                    }
                    Err(e) => {
                        warn!("{e}");
                        Some(Action::SetStatus(e.to_string()))
                    }
                }
            }
            Action::CatalogFailed(e) => {
                error!("Catalog load failed: {e}");
                self.catalog_error = Some(e.clone());
                None
            }

            // ── Trend duration ───────────────────────────────────
            Action::IncreaseDuration => {
                self.state.adjust_trend_duration(1);
                None
            }
            Action::DecreaseDuration => {
                self.state.adjust_trend_duration(-1);
                None
            }

            // ── Suggestions ──────────────────────────────────────
            Action::RequestSuggestions => {
                self.spawn_suggest_trends(tx.clone());
                None
            }
            Action::SuggestionsReceived {
                token,
                suggested_trends,
            } => {
                if !self.state.finish_operation(*token) {
                    return None;
                }
                match self.state.open_suggestions(suggested_trends) {
                    Ok(count) => {
                        info!(count, "Suggestions received");
                        Some(Action::SetStatus(format!("{count} trend suggestions")))
                    }
                    Err(e) => {
                        error!("Unusable suggestion response: {e}");
                        Some(Action::SetStatus("No usable suggestions returned".to_string()))
                    }
                }
            }
            Action::SuggestionsFailed { token, error } => {
                if !self.state.finish_operation(*token) {
                    return None;
                }
                error!("Suggestion request failed: {error}");
                Some(Action::SetStatus("Suggestion request failed".to_string()))
            }

            // ── Analysis ─────────────────────────────────────────
            Action::RunAnalysis => {
                self.spawn_run_analysis(tx.clone());
                None
            }
            Action::AnalysisReceived { token, response } => {
                if !self.state.finish_operation(*token) {
                    return None;
                }
                self.broadcast(action);
                match self
                    .state
                    .apply_analysis(response.report.clone(), &response.structured_data)
                {
                    Ok(()) => Some(Action::SetStatus("Trend analysis complete".to_string())),
                    Err(e) => {
                        error!("Trend data not plotted: {e}");
                        Some(Action::SetStatus(
                            "Trend analysis complete (no plottable data)".to_string(),
                        ))
                    }
                }
            }
            Action::AnalysisFailed { token, error } => {
                if !self.state.finish_operation(*token) {
                    return None;
                }
                error!("Trend analysis failed: {error}");
                Some(Action::SetStatus("Trend analysis failed".to_string()))
            }
            Action::ExportReport => Some(Action::SetStatus(self.export_report())),
            _ => None,
        }
    }

    fn set_focus(&mut self, section: Section) {
        self.focus = section;
        self.status_bar.focus = section;
    }

    /// Send navigation keys to the component owning the focused section.
    fn forward_to_focused(&mut self, action: &Action) -> Option<Action> {
        let state = &mut self.state;
        match self.focus {
            Section::Description => self.description.handle_action(state, action),
            Section::TrendTexts => self.trends.handle_action(state, action),
            Section::WebsiteLinks => self.links.handle_action(state, action),
            Section::CustomerReviews => self.reviews.handle_action(state, action),
            Section::TrendReport => self.report.handle_action(state, action),
            Section::TrendPlot => self.chart.handle_action(state, action),
        }
    }

    /// Lifecycle actions that reset every section's presentation state.
    fn broadcast(&mut self, action: &Action) {
        let state = &mut self.state;
        self.description.handle_action(state, action);
        self.trends.handle_action(state, action);
        self.links.handle_action(state, action);
        self.reviews.handle_action(state, action);
        self.report.handle_action(state, action);
    }

    fn begin_edit(&mut self, target: EditTarget) {
        let Some(edit) = InlineEdit::begin(target, &self.state) else {
            return;
        };
        let section = match target {
            EditTarget::ProductName => None,
            EditTarget::Description => Some(Section::Description),
            EditTarget::Trend(_) | EditTarget::NewTrend => Some(Section::TrendTexts),
            EditTarget::Link(_) | EditTarget::NewLink => Some(Section::WebsiteLinks),
        };
        if let Some(section) = section {
            if self.state.is_collapsed(section) {
                self.state.toggle_section(section);
            }
            self.set_focus(section);
        }
        self.edit = Some(edit);
    }

    fn export_report(&self) -> String {
        let Some(report) = self.state.report_text() else {
            return "No report to export. Run the trend analysis first.".to_string();
        };
        match export_report(
            report,
            &self.export.directory_or_cwd(),
            &self.export.file_name,
        ) {
            Ok(path) => {
                info!(path = %path.display(), "Report exported");
                format!("Report saved to {}", path.display())
            }
            Err(e) => {
                error!("Report export failed: {e}");
                format!("Export failed: {e}")
            }
        }
    }

    // ── Async task spawners ─────────────────────────────────────

    /// Re-read the catalog file and route to `route` once it is parsed.
    fn spawn_load_catalog(&self, route: i64, tx: mpsc::UnboundedSender<Action>) {
        let path = self.catalog_path.clone();
        let _ = tx.send(Action::SetStatus("Loading product details...".to_string()));

        tokio::spawn(async move {
            let loaded = tokio::task::spawn_blocking(move || Catalog::load(&path)).await;
            let action = match loaded {
                Ok(Ok(catalog)) => {
                    debug!(products = catalog.products.len(), "Catalog read");
                    Action::CatalogLoaded { catalog, route }
                }
                Ok(Err(e)) => Action::CatalogFailed(e.to_string()),
                Err(e) => Action::CatalogFailed(format!("Catalog task failed: {e}")),
            };
            let _ = tx.send(action);
        });
    }

    /// Spawn a task asking the service for trend suggestions.
    fn spawn_suggest_trends(&mut self, tx: mpsc::UnboundedSender<Action>) {
        let Some((product, trend_duration)) = self.state.suggest_inputs() else {
            return;
        };
        let Some(token) = self.state.begin_operation(OperationKind::SuggestTrends) else {
            return;
        };
        let client = self.client.clone();

        tokio::spawn(async move {
            let action = match client.suggest_trends(product, trend_duration).await {
                Ok(suggested_trends) => Action::SuggestionsReceived {
                    token,
                    suggested_trends,
                },
                Err(e) => Action::SuggestionsFailed {
                    token,
                    error: format!("{e:#}"),
                },
            };
            let _ = tx.send(action);
        });
    }

    /// Spawn a task running the trend analysis.
    fn spawn_run_analysis(&mut self, tx: mpsc::UnboundedSender<Action>) {
        let Some(inputs) = self.state.analysis_inputs() else {
            return;
        };
        let Some(token) = self.state.begin_operation(OperationKind::TrendAnalysis) else {
            return;
        };
        let client = self.client.clone();

        tokio::spawn(async move {
            let action = match client.run_trend_analysis(inputs).await {
                Ok(response) => {
                    info!("Trend analysis received");
                    Action::AnalysisReceived {
                        token,
                        response: Box::new(response),
                    }
                }
                Err(e) => Action::AnalysisFailed {
                    token,
                    error: format!("{e:#}"),
                },
            };
            let _ = tx.send(action);
        });
    }

    // ── Rendering ───────────────────────────────────────────────

    /// Render the full UI.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT), // Title, selector, name
            Constraint::Min(6),                // Sections
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

        let ctx = self.context(false);
        self.header.render(&ctx, frame, chunks[0]);

        if self.state.product.is_some() {
            self.render_sections(frame, chunks[1]);
        } else {
            self.render_placeholder(frame, chunks[1]);
        }

        self.status_bar.render(&ctx, frame, chunks[2]);

        // Overlays (rendered on top)
        let body = Rect {
            height: area.height.saturating_sub(1),
            ..area
        };
        self.loading.render(&ctx, frame, body);
        self.suggestion_dialog.render(&ctx, frame, area);
        self.help.render(&ctx, frame, area);
    }

    fn context(&self, focused: bool) -> RenderContext<'_> {
        RenderContext {
            state: &self.state,
            edit: self.edit.as_ref(),
            focused,
        }
    }

    fn render_sections(&self, frame: &mut Frame, area: Rect) {
        let columns =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(area);

        let left = Layout::vertical(column_constraints(&self.state, LEFT_COLUMN)).split(columns[0]);
        for (i, (section, _)) in LEFT_COLUMN.iter().enumerate() {
            self.render_section(*section, frame, left[i]);
        }

        let right =
            Layout::vertical(column_constraints(&self.state, RIGHT_COLUMN)).split(columns[1]);
        for (i, (section, _)) in RIGHT_COLUMN.iter().enumerate() {
            self.render_section(*section, frame, right[i]);
        }
    }

    fn render_section(&self, section: Section, frame: &mut Frame, area: Rect) {
        let ctx = self.context(self.focus == section);
        match section {
            Section::Description => self.description.render(&ctx, frame, area),
            Section::TrendTexts => self.trends.render(&ctx, frame, area),
            Section::WebsiteLinks => self.links.render(&ctx, frame, area),
            Section::CustomerReviews => self.reviews.render(&ctx, frame, area),
            Section::TrendReport => self.report.render(&ctx, frame, area),
            Section::TrendPlot => self.chart.render(&ctx, frame, area),
        }
    }

    /// Shown in place of the editor while no product is selected.
    fn placeholder_text(&self) -> String {
        if let Some(e) = &self.catalog_error {
            return format!("Could not load product details: {e}");
        }
        match self.state.route {
            Some(id) => format!("Product {id} not found"),
            None => "Loading product details...".to_string(),
        }
    }

    fn render_placeholder(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(2),
            Constraint::Fill(1),
        ])
        .split(area);
        let style = if self.catalog_error.is_some() || self.state.route.is_some() {
            Theme::muted()
        } else {
            Theme::dim()
        };
        frame.render_widget(
            Paragraph::new(Span::styled(self.placeholder_text(), style))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            rows[1],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use std::io::Write;

    const CATALOG: &str = r#"{"products": [
        {"id": 1, "name": "Neem Oil", "description": "Cold pressed neem oil",
         "trend_descriptions": ["neem oil demand", "organic pesticide"],
         "reviews": [{"customer_name": "Asha", "review": "Works well", "rating": 5}]},
        {"id": 2, "name": "Drip Irrigation Kit", "description": "Kit for small farms",
         "trend_descriptions": [], "reviews": []}
    ]}"#;

    fn app() -> (App, mpsc::UnboundedSender<Action>, mpsc::UnboundedReceiver<Action>) {
        let mut config = TrendlensConfig::default();
        // Nothing listens on the discard port, so service calls fail fast.
        config.backend.base_url = "http://127.0.0.1:9".to_string();
        config.backend.timeout_seconds = Some(5);
        let (tx, rx) = mpsc::unbounded_channel();
        (App::new(&config, 1), tx, rx)
    }

    fn loaded_app() -> (App, mpsc::UnboundedSender<Action>, mpsc::UnboundedReceiver<Action>) {
        let (mut app, tx, rx) = app();
        let catalog = Catalog::from_json(CATALOG).unwrap();
        app.handle_action(&Action::CatalogLoaded { catalog, route: 1 }, &tx);
        (app, tx, rx)
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    async fn next_matching(
        rx: &mut mpsc::UnboundedReceiver<Action>,
        pred: impl Fn(&Action) -> bool,
    ) -> Action {
        loop {
            let action = tokio::time::timeout(Duration::from_secs(10), rx.recv())
                .await
                .expect("timed out waiting for action")
                .expect("channel closed");
            if pred(&action) {
                return action;
            }
        }
    }

    #[test]
    fn test_placeholder_before_catalog() {
        let (app, _tx, _rx) = app();
        assert_eq!(app.placeholder_text(), "Loading product details...");
        assert!(screen(&app).contains("Loading product details..."));
    }

    #[test]
    fn test_unknown_route_shows_not_found() {
        let (mut app, tx, _rx) = app();
        let catalog = Catalog::from_json(CATALOG).unwrap();
        app.handle_action(&Action::CatalogLoaded { catalog, route: 42 }, &tx);
        assert!(app.state.product.is_none());
        assert!(screen(&app).contains("Product 42 not found"));
    }

    #[test]
    fn test_renders_sections_for_loaded_product() {
        let (app, _tx, _rx) = loaded_app();
        let text = screen(&app);
        assert!(text.contains("Neem Oil (1/2)"));
        assert!(text.contains("Cold pressed neem oil"));
        assert!(text.contains("organic pesticide"));
        assert!(text.contains("Asha"));
        assert!(text.contains("No report yet"));
    }

    #[test]
    fn test_add_trend_through_inline_editor() {
        let (mut app, tx, _rx) = loaded_app();
        app.handle_action(&Action::FocusNext, &tx);
        assert_eq!(app.focus, Section::TrendTexts);

        app.handle_action(&Action::AddItem, &tx);
        assert_eq!(
            app.edit.as_ref().map(|e| e.target),
            Some(EditTarget::NewTrend)
        );
        assert_eq!(
            event::get_input_mode(&app.input_mode_flag),
            InputMode::Editing
        );

        for c in "garden oil".chars() {
            app.handle_action(&Action::CharInput(c), &tx);
        }
        app.handle_action(&Action::NewlineInput, &tx);

        assert!(app.edit.is_none());
        assert_eq!(
            app.state.trend_descriptions(),
            ["neem oil demand", "organic pesticide", "garden oil"]
        );
        assert_eq!(app.status_bar.message, "Trend text added");
        assert_eq!(event::get_input_mode(&app.input_mode_flag), InputMode::Normal);
    }

    #[test]
    fn test_description_newline_and_cancel() {
        let (mut app, tx, _rx) = loaded_app();
        app.handle_action(&Action::EditItem, &tx);
        app.handle_action(&Action::NewlineInput, &tx);
        app.handle_action(&Action::CharInput('x'), &tx);
        assert_eq!(
            app.edit.as_ref().map(|e| e.input.text.as_str()),
            Some("Cold pressed neem oil\nx")
        );
        app.handle_action(&Action::CancelInput, &tx);
        assert!(app.edit.is_none());
        assert_eq!(
            app.state.product.as_ref().map(|p| p.description.as_str()),
            Some("Cold pressed neem oil")
        );
    }

    #[test]
    fn test_edit_name_and_duration() {
        let (mut app, tx, _rx) = loaded_app();
        app.handle_action(&Action::EditName, &tx);
        app.handle_action(&Action::DeleteWord, &tx);
        app.handle_action(&Action::PasteBulk("Extract".into()), &tx);
        app.handle_action(&Action::SubmitForm, &tx);
        assert_eq!(
            app.state.product.as_ref().map(|p| p.name.as_str()),
            Some("Neem Extract")
        );

        app.handle_action(&Action::DecreaseDuration, &tx);
        assert_eq!(app.state.trend_duration(), 5);
        for _ in 0..10 {
            app.handle_action(&Action::DecreaseDuration, &tx);
        }
        assert_eq!(app.state.trend_duration(), 1);
    }

    #[test]
    fn test_collapsed_section_ignores_navigation() {
        let (mut app, tx, _rx) = loaded_app();
        app.handle_action(&Action::FocusNext, &tx);
        app.handle_action(&Action::Toggle, &tx);
        assert!(app.state.is_collapsed(Section::TrendTexts));

        app.handle_action(&Action::DeleteItem, &tx);
        assert_eq!(app.state.trend_descriptions().len(), 2);

        app.handle_action(&Action::Toggle, &tx);
        app.handle_action(&Action::DeleteItem, &tx);
        assert_eq!(app.state.trend_descriptions(), ["organic pesticide"]);
    }

    #[test]
    fn test_suggestions_flow() {
        let (mut app, tx, _rx) = loaded_app();
        let token = app
            .state
            .begin_operation(OperationKind::SuggestTrends)
            .unwrap();
        app.handle_action(
            &Action::SuggestionsReceived {
                token,
                suggested_trends: vec![r#""neem cake", "bio pesticide""#.to_string()],
            },
            &tx,
        );
        assert!(app.state.suggestions_open);
        assert!(!app.state.is_loading());
        assert!(screen(&app).contains("Suggested Trends"));

        app.handle_action(&Action::Toggle, &tx);
        app.handle_action(&Action::Confirm, &tx);
        assert!(!app.state.suggestions_open);
        assert_eq!(app.state.trend_descriptions().last().map(String::as_str), Some("neem cake"));
    }

    #[test]
    fn test_empty_suggestion_list_keeps_dialog_closed() {
        let (mut app, tx, _rx) = loaded_app();
        let token = app
            .state
            .begin_operation(OperationKind::SuggestTrends)
            .unwrap();
        app.handle_action(
            &Action::SuggestionsReceived {
                token,
                suggested_trends: Vec::new(),
            },
            &tx,
        );
        assert!(!app.state.suggestions_open);
        assert!(!app.state.is_loading());
    }

    #[test]
    fn test_analysis_result_renders_report_and_chart() {
        let (mut app, tx, _rx) = loaded_app();
        let token = app
            .state
            .begin_operation(OperationKind::TrendAnalysis)
            .unwrap();
        let response = serde_json::from_value(serde_json::json!({
            "report": "## Summary\n* Neem demand is rising",
            "structured_data": [
                {"Trend Name": "neem", "Week": 1, "Trend Score": 40},
                {"Trend Name": "neem", "Week": 2, "Trend Score": 55}
            ]
        }))
        .unwrap();
        app.handle_action(
            &Action::AnalysisReceived {
                token,
                response: Box::new(response),
            },
            &tx,
        );

        assert!(!app.state.is_loading());
        assert!(app.state.chart_series().is_some());
        let text = screen(&app);
        assert!(text.contains("Summary"));
        assert!(text.contains("Neem demand is rising"));
        assert!(text.contains("Weeks"));
    }

    #[test]
    fn test_stale_result_is_ignored() {
        let (mut app, tx, _rx) = loaded_app();
        let token = app
            .state
            .begin_operation(OperationKind::TrendAnalysis)
            .unwrap();
        app.handle_action(
            &Action::AnalysisFailed {
                token,
                error: "boom".into(),
            },
            &tx,
        );
        // Second delivery of the same token must not touch state.
        app.handle_action(
            &Action::AnalysisFailed {
                token,
                error: "boom".into(),
            },
            &tx,
        );
        assert!(!app.state.is_loading());
        assert_eq!(app.status_bar.message, "Trend analysis failed");
    }

    #[test]
    fn test_export_without_report() {
        let (mut app, tx, _rx) = loaded_app();
        app.handle_action(&Action::ExportReport, &tx);
        assert!(app.status_bar.message.starts_with("No report to export"));
    }

    #[test]
    fn test_export_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, tx, _rx) = loaded_app();
        app.export.directory = Some(dir.path().to_path_buf());
        app.state
            .apply_analysis("## Outlook\nSteady".into(), &serde_json::json!([]))
            .unwrap();

        app.handle_action(&Action::ExportReport, &tx);

        let written = std::fs::read_to_string(dir.path().join("Trend_Report.txt")).unwrap();
        assert_eq!(written, "## Outlook\nSteady");
        assert!(app.status_bar.message.starts_with("Report saved to"));
    }

    #[tokio::test]
    async fn test_navigation_reloads_catalog() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CATALOG.as_bytes()).unwrap();

        let (mut app, tx, mut rx) = app();
        app.catalog_path = file.path().to_path_buf();

        app.handle_action(&Action::NavigateTo(1), &tx);
        let loaded = next_matching(&mut rx, |a| matches!(a, Action::CatalogLoaded { .. })).await;
        app.handle_action(&loaded, &tx);
        assert_eq!(app.state.product.as_ref().map(|p| p.id), Some(1));

        app.handle_action(&Action::NextProduct, &tx);
        let loaded = next_matching(&mut rx, |a| matches!(a, Action::CatalogLoaded { .. })).await;
        app.handle_action(&loaded, &tx);
        assert_eq!(app.state.product.as_ref().map(|p| p.id), Some(2));
    }

    #[tokio::test]
    async fn test_missing_catalog_reports_error() {
        let (mut app, tx, mut rx) = app();
        app.catalog_path = PathBuf::from("/nonexistent/product_details.json");

        app.handle_action(&Action::NavigateTo(1), &tx);
        let failed = next_matching(&mut rx, |a| matches!(a, Action::CatalogFailed(_))).await;
        app.handle_action(&failed, &tx);
        assert!(app
            .placeholder_text()
            .starts_with("Could not load product details"));
    }

    #[tokio::test]
    async fn test_analysis_blocks_input_until_finished() {
        let (mut app, tx, mut rx) = loaded_app();
        app.handle_action(&Action::RunAnalysis, &tx);
        assert!(app.state.is_loading());
        assert_eq!(app.state.loading_label(), Some("Running trend analysis"));

        // Edits and a second trigger are refused while in flight.
        app.handle_action(&Action::EditName, &tx);
        assert!(app.edit.is_none());
        app.handle_action(&Action::RequestSuggestions, &tx);
        assert!(!app.state.suggestions_open);

        let failed = next_matching(&mut rx, |a| matches!(a, Action::AnalysisFailed { .. })).await;
        app.handle_action(&failed, &tx);
        assert!(!app.state.is_loading());
    }
}
