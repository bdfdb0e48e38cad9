//! Trend report text: line-oriented parsing into display blocks, and export.

use std::path::{Path, PathBuf};

use crate::error::{Result, TrendlensError};

/// File name used when the report is exported.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "Trend_Report.txt";

/// One display block derived from a single report line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportBlock {
    Heading(String),
    Subheading(String),
    ListItem(String),
    Paragraph(String),
}

impl ReportBlock {
    pub fn text(&self) -> &str {
        match self {
            ReportBlock::Heading(t)
            | ReportBlock::Subheading(t)
            | ReportBlock::ListItem(t)
            | ReportBlock::Paragraph(t) => t,
        }
    }

    /// Classify a single line. First matching prefix wins.
    pub fn from_line(line: &str) -> ReportBlock {
        if let Some(rest) = line.strip_prefix("## ") {
            ReportBlock::Heading(rest.to_string())
        } else if line.starts_with("**") {
            ReportBlock::Subheading(line.replace("**", ""))
        } else if let Some(rest) = line.strip_prefix("* ") {
            ReportBlock::ListItem(rest.to_string())
        } else {
            ReportBlock::Paragraph(line.to_string())
        }
    }
}

/// Split a report into one block per `\n`-separated line, in order.
///
/// An empty string yields a single empty paragraph.
pub fn parse_report(report: &str) -> Vec<ReportBlock> {
    report.split('\n').map(ReportBlock::from_line).collect()
}

/// Write the raw report text to `dir/file_name`, replacing any existing file.
pub fn export_report(report: &str, dir: &Path, file_name: &str) -> Result<PathBuf> {
    if report.is_empty() {
        return Err(TrendlensError::Export("no report to export".into()));
    }
    if file_name.trim().is_empty() {
        return Err(TrendlensError::Export("export file name is empty".into()));
    }
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    std::fs::write(&path, report)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_rules() {
        assert_eq!(
            ReportBlock::from_line("## Title"),
            ReportBlock::Heading("Title".into())
        );
        assert_eq!(
            ReportBlock::from_line("**Bold**"),
            ReportBlock::Subheading("Bold".into())
        );
        assert_eq!(
            ReportBlock::from_line("* item"),
            ReportBlock::ListItem("item".into())
        );
        assert_eq!(
            ReportBlock::from_line("plain text"),
            ReportBlock::Paragraph("plain text".into())
        );
    }

    #[test]
    fn test_subheading_strips_every_marker() {
        assert_eq!(
            ReportBlock::from_line("**Key:** demand **up**"),
            ReportBlock::Subheading("Key: demand up".into())
        );
    }

    #[test]
    fn test_heading_wins_over_later_rules() {
        // "##" without a space is not a heading, and "* " needs the space too.
        assert_eq!(
            ReportBlock::from_line("##Title"),
            ReportBlock::Paragraph("##Title".into())
        );
        assert_eq!(
            ReportBlock::from_line("*item"),
            ReportBlock::Paragraph("*item".into())
        );
        assert_eq!(
            ReportBlock::from_line("## **Mixed**"),
            ReportBlock::Heading("**Mixed**".into())
        );
    }

    #[test]
    fn test_one_block_per_line_in_order() {
        let report = "## Summary\n\n**Drivers**\n* price\n* weather\nClosing words";
        let blocks = parse_report(report);

        assert_eq!(blocks.len(), report.split('\n').count());
        assert_eq!(
            blocks,
            vec![
                ReportBlock::Heading("Summary".into()),
                ReportBlock::Paragraph(String::new()),
                ReportBlock::Subheading("Drivers".into()),
                ReportBlock::ListItem("price".into()),
                ReportBlock::ListItem("weather".into()),
                ReportBlock::Paragraph("Closing words".into()),
            ]
        );
    }

    #[test]
    fn test_empty_report_is_single_blank_paragraph() {
        assert_eq!(
            parse_report(""),
            vec![ReportBlock::Paragraph(String::new())]
        );
    }

    #[test]
    fn test_parse_is_deterministic() {
        let report = "## A\n* b\nc";
        assert_eq!(parse_report(report), parse_report(report));
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_report("## Report\nbody", dir.path(), DEFAULT_EXPORT_FILE_NAME).unwrap();

        assert_eq!(path, dir.path().join("Trend_Report.txt"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "## Report\nbody");
    }

    #[test]
    fn test_export_refuses_empty_report() {
        let dir = tempfile::tempdir().unwrap();
        let err = export_report("", dir.path(), DEFAULT_EXPORT_FILE_NAME).unwrap_err();
        assert!(matches!(err, TrendlensError::Export(_)));
    }
}
