//! Action enum — the central message bus for the TUI.
//! All user interactions and async results flow through here.

use trendlens_backend::protocol::RunTrendAnalysisResponse;
use trendlens_core::catalog::Catalog;
use trendlens_core::operation::OperationToken;

use crate::input::EditTarget;

/// Every possible action that can occur in the application.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Global ──────────────────────────────────────────────
    /// Quit the application.
    Quit,
    /// Toggle help overlay.
    ToggleHelp,
    /// Display a status message in the status bar.
    SetStatus(String),
    /// Clear the status message.
    ClearStatus,
    /// A tick event for animations.
    Tick,

    // ── Navigation ──────────────────────────────────────────
    /// Focus the next collapsible section.
    FocusNext,
    /// Focus the previous collapsible section.
    FocusPrev,
    /// Collapse/expand the focused section, or flip the highlighted suggestion.
    Toggle,
    ScrollUp,
    ScrollDown,
    Confirm,
    /// Close whichever dialog is open.
    Cancel,

    // ── Catalog / routing ───────────────────────────────────
    /// Route to a product id; reloads the catalog.
    NavigateTo(i64),
    PrevProduct,
    NextProduct,
    CatalogLoaded { catalog: Catalog, route: i64 },
    CatalogFailed(String),

    // ── Editing ─────────────────────────────────────────────
    /// Open an inline editor for a field or list entry.
    BeginEdit(EditTarget),
    /// Add an entry to the focused list.
    AddItem,
    /// Edit the highlighted entry (or the focused field).
    EditItem,
    /// Delete the highlighted entry of the focused list.
    DeleteItem,
    /// Edit the product name.
    EditName,
    /// A character was typed (only sent when in input mode).
    CharInput(char),
    /// Backspace pressed (only sent when in input mode).
    BackspaceInput,
    /// Delete word (Ctrl+W).
    DeleteWord,
    /// Enter in input mode; newline in multi-line fields, submit otherwise.
    NewlineInput,
    CursorLeft,
    CursorRight,
    /// Commit the inline editor (Ctrl+S / Alt+Enter).
    SubmitForm,
    /// Discard the inline editor (Esc in input mode).
    CancelInput,
    /// Bulk paste from bracketed paste mode (terminal sends entire text at once).
    PasteBulk(String),

    // ── Trend duration ──────────────────────────────────────
    IncreaseDuration,
    DecreaseDuration,

    // ── Suggestions ─────────────────────────────────────────
    /// Ask the service for trend suggestions.
    RequestSuggestions,
    SuggestionsReceived {
        token: OperationToken,
        suggested_trends: Vec<String>,
    },
    SuggestionsFailed {
        token: OperationToken,
        error: String,
    },
    /// Add the selected suggestions to the trend texts.
    AcceptSuggestions,

    // ── Analysis ────────────────────────────────────────────
    /// Run the trend analysis.
    RunAnalysis,
    AnalysisReceived {
        token: OperationToken,
        response: Box<RunTrendAnalysisResponse>,
    },
    AnalysisFailed {
        token: OperationToken,
        error: String,
    },
    /// Write the report text to disk.
    ExportReport,
}

impl Action {
    /// Actions still honoured while a service call blocks the screen.
    pub fn allowed_while_loading(&self) -> bool {
        matches!(
            self,
            Action::Quit
                | Action::ToggleHelp
                | Action::SetStatus(_)
                | Action::ClearStatus
                | Action::Tick
                | Action::CatalogLoaded { .. }
                | Action::CatalogFailed(_)
                | Action::SuggestionsReceived { .. }
                | Action::SuggestionsFailed { .. }
                | Action::AnalysisReceived { .. }
                | Action::AnalysisFailed { .. }
        )
    }
}

/// Whether the app is in a text-input mode where raw keys should
/// be forwarded to the inline editor instead of interpreted as
/// global shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal mode — keys are global shortcuts.
    Normal,
    /// Text input mode — keys go to the inline editor.
    Editing,
}
