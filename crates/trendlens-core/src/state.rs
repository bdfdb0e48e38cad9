//! The single state unit behind the product detail screen.
//!
//! All screen state lives in [`ViewState`]; report blocks and chart series
//! are derived from it on every read.

use chrono::{DateTime, Local};
use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::error::{Result, TrendlensError};
use crate::list_ops;
use crate::operation::{OperationKind, OperationToken, OperationTracker};
use crate::product::{Product, ProductField, Review};
use crate::report::{parse_report, ReportBlock};
use crate::series::{build_series, parse_structured_data, SeriesSet, TrendPoint};
use crate::suggestion::{first_response, parse_suggestions, selected_texts, TrendSuggestion};

/// Collapsible panels of the detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Description,
    TrendTexts,
    WebsiteLinks,
    CustomerReviews,
    TrendReport,
    TrendPlot,
}

impl Section {
    pub fn all() -> &'static [Section] {
        &[
            Section::Description,
            Section::TrendTexts,
            Section::WebsiteLinks,
            Section::CustomerReviews,
            Section::TrendReport,
            Section::TrendPlot,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Description => "Description",
            Section::TrendTexts => "Trend Search Texts",
            Section::WebsiteLinks => "Website Links for Data Scraping",
            Section::CustomerReviews => "Customer Reviews",
            Section::TrendReport => "Generated Trend Report",
            Section::TrendPlot => "Trend Plot",
        }
    }

    pub fn index(&self) -> usize {
        Section::all()
            .iter()
            .position(|s| s == self)
            .unwrap_or_default()
    }

    /// Next section, wrapping around.
    pub fn next(&self) -> Section {
        let all = Section::all();
        all[(self.index() + 1) % all.len()]
    }

    /// Previous section, wrapping around.
    pub fn prev(&self) -> Section {
        let all = Section::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}

/// What the analysis service is asked to analyse.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisInputs {
    pub trend_descriptions: Vec<String>,
    pub website_links: Vec<String>,
    pub customer_reviews: Vec<Review>,
}

/// Last analysis result as received.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub report: String,
    /// `None` when the service sent something other than a list of rows.
    pub points: Option<Vec<TrendPoint>>,
    pub received_at: DateTime<Local>,
}

#[derive(Debug)]
pub struct ViewState {
    /// Catalog entries available in the selector.
    pub products: Vec<Product>,
    /// Product id from the current route.
    pub route: Option<i64>,
    /// Product under edit. Everything product-dependent is inert while `None`.
    pub product: Option<Product>,
    /// Look-back window sent with suggestion requests, in months.
    trend_duration: u32,
    pub links: Vec<String>,
    pub suggestions: Vec<TrendSuggestion>,
    pub suggestions_open: bool,
    pub analysis: Option<AnalysisResult>,
    collapsed: HashSet<Section>,
    operations: OperationTracker,
}

impl ViewState {
    pub fn new(trend_duration: u32) -> Self {
        Self {
            products: Vec::new(),
            route: None,
            product: None,
            trend_duration: trend_duration.max(1),
            links: Vec::new(),
            suggestions: Vec::new(),
            suggestions_open: false,
            analysis: None,
            collapsed: HashSet::new(),
            operations: OperationTracker::new(),
        }
    }

    // ── Catalog / routing ───────────────────────────────────

    /// Install a freshly loaded catalog and select the product named by `route`.
    ///
    /// When the route names an unknown product the editor is left empty.
    pub fn apply_catalog(&mut self, catalog: Catalog, route: i64) -> Result<()> {
        self.products = catalog.products;
        self.route = Some(route);
        self.select_product(route)
    }

    /// Select a product from the loaded catalog, discarding edits to the previous one.
    pub fn select_product(&mut self, id: i64) -> Result<()> {
        match self.products.iter().find(|p| p.id == id) {
            Some(product) => {
                self.product = Some(product.clone());
                self.route = Some(id);
                self.suggestions.clear();
                self.suggestions_open = false;
                Ok(())
            }
            None => {
                self.product = None;
                Err(TrendlensError::ProductNotFound(id))
            }
        }
    }

    /// Id of the catalog entry `offset` positions away from the current one.
    pub fn neighbour_product_id(&self, offset: isize) -> Option<i64> {
        if self.products.is_empty() {
            return None;
        }
        let len = self.products.len() as isize;
        let current = self
            .route
            .and_then(|id| self.products.iter().position(|p| p.id == id))
            .map(|i| i as isize)
            .unwrap_or(-1);
        let next = if current < 0 && offset < 0 {
            len - 1
        } else {
            (current + offset).rem_euclid(len)
        };
        self.products.get(next as usize).map(|p| p.id)
    }

    // ── Product fields ──────────────────────────────────────

    pub fn set_field(&mut self, field: ProductField, value: &str) {
        if let Some(product) = &self.product {
            self.product = Some(product.with_field(field, value));
        }
    }

    pub fn trend_descriptions(&self) -> &[String] {
        self.product
            .as_ref()
            .map(|p| p.trend_descriptions.as_slice())
            .unwrap_or_default()
    }

    pub fn reviews(&self) -> &[Review] {
        self.product
            .as_ref()
            .map(|p| p.reviews.as_slice())
            .unwrap_or_default()
    }

    fn replace_trends(&mut self, edit: impl FnOnce(&[String]) -> Vec<String>) {
        if let Some(product) = &self.product {
            let next = edit(&product.trend_descriptions);
            self.product = Some(product.with_trend_descriptions(next));
        }
    }

    /// Append a trend query. Returns whether anything was added.
    pub fn add_trend(&mut self, text: &str) -> bool {
        let before = self.trend_descriptions().len();
        self.replace_trends(|list| list_ops::add(list, text));
        self.trend_descriptions().len() != before
    }

    pub fn update_trend(&mut self, index: usize, text: &str) {
        self.replace_trends(|list| list_ops::update(list, index, text));
    }

    pub fn delete_trend(&mut self, index: usize) {
        self.replace_trends(|list| list_ops::delete(list, index));
    }

    // ── Links ───────────────────────────────────────────────

    pub fn add_link(&mut self, text: &str) -> bool {
        let before = self.links.len();
        self.links = list_ops::add(&self.links, text);
        self.links.len() != before
    }

    pub fn update_link(&mut self, index: usize, text: &str) {
        self.links = list_ops::update(&self.links, index, text);
    }

    pub fn delete_link(&mut self, index: usize) {
        self.links = list_ops::delete(&self.links, index);
    }

    // ── Trend duration ──────────────────────────────────────

    pub fn trend_duration(&self) -> u32 {
        self.trend_duration
    }

    pub fn set_trend_duration(&mut self, months: u32) {
        self.trend_duration = months.max(1);
    }

    pub fn adjust_trend_duration(&mut self, delta: i32) {
        let next = (self.trend_duration as i64 + delta as i64).clamp(1, u32::MAX as i64);
        self.trend_duration = next as u32;
    }

    // ── Suggestions ─────────────────────────────────────────

    /// Snapshot sent to the suggestion service.
    pub fn suggest_inputs(&self) -> Option<(Product, u32)> {
        self.product
            .as_ref()
            .map(|p| (p.clone(), self.trend_duration))
    }

    /// Parse the service response and open the picker. Returns the number of candidates.
    pub fn open_suggestions(&mut self, suggested_trends: &[String]) -> Result<usize> {
        let raw = first_response(suggested_trends).ok_or_else(|| {
            TrendlensError::MalformedResponse("suggested_trends is empty".into())
        })?;
        self.suggestions = parse_suggestions(raw);
        self.suggestions_open = true;
        Ok(self.suggestions.len())
    }

    pub fn toggle_suggestion(&mut self, index: usize) {
        if let Some(suggestion) = self.suggestions.get_mut(index) {
            suggestion.toggle();
        }
    }

    /// Merge selected suggestions into the trend queries and close the picker.
    /// Returns the number of phrases merged.
    pub fn accept_suggestions(&mut self) -> usize {
        let selected = selected_texts(&self.suggestions);
        let count = selected.len();
        self.replace_trends(|list| list_ops::extend(list, &selected));
        self.close_suggestions();
        count
    }

    pub fn close_suggestions(&mut self) {
        self.suggestions.clear();
        self.suggestions_open = false;
    }

    // ── Analysis ────────────────────────────────────────────

    pub fn analysis_inputs(&self) -> Option<AnalysisInputs> {
        self.product.as_ref().map(|p| AnalysisInputs {
            trend_descriptions: p.trend_descriptions.clone(),
            website_links: self.links.clone(),
            customer_reviews: p.reviews.clone(),
        })
    }

    /// Store an analysis response. The report is always kept; a malformed
    /// `structured_data` payload leaves the chart empty and is returned as an error.
    pub fn apply_analysis(&mut self, report: String, structured_data: &serde_json::Value) -> Result<()> {
        let parsed = parse_structured_data(structured_data);
        let (points, outcome) = match parsed {
            Ok(points) => (Some(points), Ok(())),
            Err(e) => (None, Err(e)),
        };
        self.analysis = Some(AnalysisResult {
            report,
            points,
            received_at: Local::now(),
        });
        outcome
    }

    pub fn report_text(&self) -> Option<&str> {
        self.analysis
            .as_ref()
            .map(|a| a.report.as_str())
            .filter(|r| !r.is_empty())
    }

    /// Display blocks for the current report; empty when there is no report.
    pub fn report_blocks(&self) -> Vec<ReportBlock> {
        self.report_text().map(parse_report).unwrap_or_default()
    }

    /// Chart series for the current analysis, if its time series was valid.
    pub fn chart_series(&self) -> Option<SeriesSet> {
        self.analysis
            .as_ref()
            .and_then(|a| a.points.as_deref())
            .map(build_series)
    }

    // ── Sections ────────────────────────────────────────────

    pub fn toggle_section(&mut self, section: Section) {
        if !self.collapsed.remove(&section) {
            self.collapsed.insert(section);
        }
    }

    pub fn is_collapsed(&self, section: Section) -> bool {
        self.collapsed.contains(&section)
    }

    // ── Operations ──────────────────────────────────────────

    /// Claim a token for a service call. `None` while one of the same kind is
    /// running or when no product is loaded.
    pub fn begin_operation(&mut self, kind: OperationKind) -> Option<OperationToken> {
        if self.product.is_none() {
            return None;
        }
        self.operations.begin(kind)
    }

    pub fn finish_operation(&mut self, token: OperationToken) -> bool {
        self.operations.finish(token)
    }

    pub fn is_loading(&self) -> bool {
        self.operations.is_loading()
    }

    pub fn loading_label(&self) -> Option<&'static str> {
        self.operations.current_label()
    }
}
