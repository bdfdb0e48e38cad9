//! Trend plot: one line per trend name over the analysed weeks.

use ratatui::layout::Rect;
use ratatui::style::{Style, Stylize};
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, LegendPosition, Paragraph};
use ratatui::Frame;

use trendlens_core::series::SeriesSet;
use trendlens_core::state::Section;

use crate::components::{render_section_frame, Component, RenderContext};
use crate::theme::Theme;

/// Most x-axis labels drawn before thinning.
const MAX_WEEK_LABELS: usize = 8;

pub struct TrendChartComponent;

impl TrendChartComponent {
    pub fn new() -> Self {
        Self
    }

    /// Category axis over week indexes with labels taken from the week values.
    pub fn week_axis(set: &SeriesSet) -> ([f64; 2], Vec<String>) {
        let n = set.weeks.len();
        if n <= 1 {
            let label = set.weeks.first().map(|w| SeriesSet::week_label(*w)).unwrap_or_default();
            return ([-1.0, 1.0], vec![String::new(), label, String::new()]);
        }
        let last = (n - 1) as f64;
        let count = n.min(MAX_WEEK_LABELS);
        let labels = (0..count)
            .map(|j| {
                let position = j as f64 * last / (count - 1) as f64;
                SeriesSet::week_label(set.weeks[position.round() as usize])
            })
            .collect();
        ([0.0, last], labels)
    }

    /// Score bounds padded so lines never touch the frame.
    pub fn score_axis(set: &SeriesSet) -> [f64; 2] {
        let (lo, hi) = set.score_bounds().unwrap_or((0.0, 1.0));
        let padding = (hi - lo).abs().max(1.0) * 0.1;
        [lo - padding, hi + padding]
    }
}

impl Component for TrendChartComponent {
    fn render(&self, ctx: &RenderContext<'_>, frame: &mut Frame, area: Rect) {
        let Some(inner) = render_section_frame(Section::TrendPlot, ctx, frame, area) else {
            return;
        };

        let Some(set) = ctx.state.chart_series().filter(|s| !s.is_empty()) else {
            let message = if ctx.state.report_text().is_some() {
                "No plottable trend data in the last analysis."
            } else {
                "No trend data yet. Press r to run the trend analysis."
            };
            frame.render_widget(Paragraph::new(Span::styled(message, Theme::dim())), inner);
            return;
        };

        // Datasets borrow their points, so segments must outlive the chart.
        let segmented: Vec<(String, Vec<Vec<(f64, f64)>>)> = set
            .series
            .values()
            .map(|s| (s.label.clone(), s.segments()))
            .collect();

        let mut datasets = Vec::new();
        for (i, (label, segments)) in segmented.iter().enumerate() {
            let style = Style::default().fg(Theme::series_color(i));
            for (j, segment) in segments.iter().enumerate() {
                let graph_type = if segment.len() == 1 {
                    GraphType::Scatter
                } else {
                    GraphType::Line
                };
                let mut dataset = Dataset::default()
                    .marker(symbols::Marker::Braille)
                    .graph_type(graph_type)
                    .style(style)
                    .data(segment);
                if j == 0 {
                    dataset = dataset.name(label.clone());
                }
                datasets.push(dataset);
            }
        }

        let (x_bounds, x_labels) = Self::week_axis(&set);
        let y_bounds = Self::score_axis(&set);
        let y_labels = vec![
            format!("{:.1}", y_bounds[0]),
            format!("{:.1}", (y_bounds[0] + y_bounds[1]) / 2.0),
            format!("{:.1}", y_bounds[1]),
        ];

        let x_axis = Axis::default()
            .title("Weeks".dark_gray())
            .style(Theme::muted())
            .bounds(x_bounds)
            .labels(x_labels);
        let y_axis = Axis::default()
            .title("Trend Score".dark_gray())
            .style(Theme::muted())
            .bounds(y_bounds)
            .labels(y_labels);

        let chart = Chart::new(datasets)
            .x_axis(x_axis)
            .y_axis(y_axis)
            .legend_position(Some(LegendPosition::TopLeft));
        frame.render_widget(chart, inner);
    }
}
