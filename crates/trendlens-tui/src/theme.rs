//! Color scheme and styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// The color palette for trendlens's TUI.
pub struct Theme;

/// Line colors assigned to chart series in order.
const SERIES_PALETTE: &[Color] = &[
    Color::Rgb(110, 170, 255),
    Color::Rgb(240, 150, 80),
    Color::Rgb(80, 200, 120),
    Color::Rgb(180, 130, 240),
    Color::Rgb(230, 200, 80),
    Color::Rgb(240, 100, 140),
    Color::Rgb(90, 210, 210),
];

impl Theme {
    // ── Base colors ─────────────────────────────────────────
    pub fn fg() -> Color {
        Color::Rgb(200, 200, 200)
    }

    pub fn fg_dim() -> Color {
        Color::Rgb(100, 100, 100)
    }

    pub fn fg_muted() -> Color {
        Color::Rgb(140, 140, 140)
    }

    // ── Accent colors ───────────────────────────────────────
    pub fn accent() -> Color {
        Color::Rgb(110, 170, 255)
    }

    pub fn accent_secondary() -> Color {
        Color::Rgb(180, 130, 240)
    }

    pub fn success() -> Color {
        Color::Rgb(80, 200, 120)
    }

    pub fn warning() -> Color {
        Color::Rgb(230, 180, 80)
    }

    pub fn error() -> Color {
        Color::Rgb(240, 80, 80)
    }

    // ── Structural colors ───────────────────────────────────
    pub fn border_color() -> Color {
        Color::Rgb(60, 60, 60)
    }

    pub fn selection_bg() -> Color {
        Color::Rgb(40, 40, 60)
    }

    pub fn series_color(index: usize) -> Color {
        SERIES_PALETTE[index % SERIES_PALETTE.len()]
    }

    // ── Composite styles ────────────────────────────────────

    pub fn title() -> Style {
        Style::default()
            .fg(Self::accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn header() -> Style {
        Style::default().fg(Self::fg()).add_modifier(Modifier::BOLD)
    }

    pub fn selected() -> Style {
        Style::default()
            .fg(Self::accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn normal() -> Style {
        Style::default().fg(Self::fg())
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::fg_dim())
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::fg_muted())
    }

    pub fn border() -> Style {
        Style::default().fg(Self::border_color())
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::accent())
    }

    pub fn key_hint() -> Style {
        Style::default().fg(Self::accent())
    }

    pub fn selection() -> Style {
        Style::default().bg(Self::selection_bg())
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::fg_muted())
    }

    pub fn input() -> Style {
        Style::default()
            .fg(Self::fg())
            .bg(Self::selection_bg())
    }

    /// Applied over the whole body while a service call is running.
    pub fn blurred() -> Style {
        Style::default()
            .fg(Self::fg_dim())
            .add_modifier(Modifier::DIM)
    }

    pub fn pill(selected: bool) -> Style {
        if selected {
            Style::default()
                .fg(Color::Black)
                .bg(Self::success())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Self::fg()).bg(Self::border_color())
        }
    }

    // ── Report blocks ───────────────────────────────────────

    pub fn report_heading() -> Style {
        Style::default()
            .fg(Self::accent())
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    pub fn report_subheading() -> Style {
        Style::default()
            .fg(Self::accent_secondary())
            .add_modifier(Modifier::BOLD)
    }

    pub fn rating_color(rating: f64, max: f64) -> Color {
        let ratio = rating / max;
        if ratio >= 0.8 {
            Self::success()
        } else if ratio >= 0.5 {
            Self::warning()
        } else {
            Self::error()
        }
    }
}
