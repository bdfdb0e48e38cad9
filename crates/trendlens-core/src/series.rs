//! Reshape the analysis service's flat `{trend, week, score}` rows into
//! chart series aligned on a shared week axis.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Result, TrendlensError};

/// One row of the analysis time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    #[serde(rename = "Trend Name")]
    pub trend_name: String,

    #[serde(rename = "Week")]
    pub week: f64,

    #[serde(rename = "Trend Score")]
    pub score: f64,
}

/// A single trend aligned to [`SeriesSet::weeks`]; `None` marks a week with no data.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub points: Vec<Option<f64>>,
}

/// Every series of an analysis, keyed by trend name, sharing one week axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesSet {
    /// Sorted, de-duplicated union of all weeks seen.
    pub weeks: Vec<f64>,
    pub series: BTreeMap<String, ChartSeries>,
}

/// Validate the `structured_data` payload: it must be an array of trend rows.
pub fn parse_structured_data(value: &serde_json::Value) -> Result<Vec<TrendPoint>> {
    let rows = value.as_array().ok_or_else(|| {
        TrendlensError::MalformedResponse(format!("structured_data is not an array: {value}"))
    })?;

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            serde_json::from_value::<TrendPoint>(row.clone()).map_err(|e| {
                TrendlensError::MalformedResponse(format!("structured_data[{i}]: {e}"))
            })
        })
        .collect()
}

/// Group points by trend name and align each group onto the union of weeks.
///
/// When a trend has more than one point for the same week, the first one wins.
pub fn build_series(points: &[TrendPoint]) -> SeriesSet {
    let mut weeks: Vec<f64> = points.iter().map(|p| p.week).collect();
    weeks.sort_by(|a, b| a.total_cmp(b));
    weeks.dedup();

    let mut grouped: BTreeMap<&str, Vec<&TrendPoint>> = BTreeMap::new();
    for point in points {
        grouped.entry(point.trend_name.as_str()).or_default().push(point);
    }

    let series = grouped
        .into_iter()
        .map(|(name, group)| {
            let aligned = weeks
                .iter()
                .map(|week| group.iter().find(|p| p.week == *week).map(|p| p.score))
                .collect();
            (
                name.to_string(),
                ChartSeries {
                    label: name.to_string(),
                    points: aligned,
                },
            )
        })
        .collect();

    SeriesSet { weeks, series }
}

impl SeriesSet {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Lowest and highest observed score across every series.
    pub fn score_bounds(&self) -> Option<(f64, f64)> {
        self.series
            .values()
            .flat_map(|s| s.points.iter().flatten().copied())
            .fold(None, |acc, score| match acc {
                None => Some((score, score)),
                Some((lo, hi)) => Some((lo.min(score), hi.max(score))),
            })
    }

    /// Axis label for a week value; whole weeks print without a fraction.
    pub fn week_label(week: f64) -> String {
        if week.fract() == 0.0 {
            format!("{}", week as i64)
        } else {
            format!("{week}")
        }
    }
}

impl ChartSeries {
    /// Contiguous runs of observed points as `(week index, score)` pairs.
    /// A gap ends the current run, so lines are never drawn across missing weeks.
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for (i, point) in self.points.iter().enumerate() {
            match point {
                Some(score) => current.push((i as f64, *score)),
                None => {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn point(name: &str, week: f64, score: f64) -> TrendPoint {
        TrendPoint {
            trend_name: name.to_string(),
            week,
            score,
        }
    }

    #[test]
    fn test_two_disjoint_trends() {
        let set = build_series(&[point("A", 1.0, 5.0), point("B", 2.0, 7.0)]);

        assert_eq!(set.weeks, vec![1.0, 2.0]);
        assert_eq!(set.series["A"].points, vec![Some(5.0), None]);
        assert_eq!(set.series["B"].points, vec![None, Some(7.0)]);
    }

    #[test]
    fn test_every_series_has_full_length() {
        let set = build_series(&[
            point("A", 3.0, 1.0),
            point("A", 1.0, 2.0),
            point("B", 2.0, 3.0),
            point("C", 5.0, 4.0),
        ]);

        assert_eq!(set.weeks, vec![1.0, 2.0, 3.0, 5.0]);
        for series in set.series.values() {
            assert_eq!(series.points.len(), set.weeks.len());
        }
        assert_eq!(set.series["C"].points, vec![None, None, None, Some(4.0)]);
    }

    #[test]
    fn test_reordering_input_gives_same_output() {
        let points = vec![
            point("A", 1.0, 5.0),
            point("B", 2.0, 7.0),
            point("A", 3.0, 6.0),
            point("B", 1.0, 2.0),
        ];
        let mut reversed = points.clone();
        reversed.reverse();
        let mut rotated = points.clone();
        rotated.rotate_left(2);

        let expected = build_series(&points);
        assert_eq!(build_series(&reversed), expected);
        assert_eq!(build_series(&rotated), expected);
    }

    #[test]
    fn test_weeks_sorted_numerically() {
        let set = build_series(&[point("A", 10.0, 1.0), point("A", 2.0, 1.0), point("A", 1.0, 1.0)]);
        assert_eq!(set.weeks, vec![1.0, 2.0, 10.0]);
    }

    #[test]
    fn test_empty_input() {
        let set = build_series(&[]);
        assert!(set.weeks.is_empty());
        assert!(set.is_empty());
        assert_eq!(set.score_bounds(), None);
    }

    #[test]
    fn test_duplicate_week_keeps_first() {
        let set = build_series(&[point("A", 1.0, 5.0), point("A", 1.0, 9.0)]);
        assert_eq!(set.weeks, vec![1.0]);
        assert_eq!(set.series["A"].points, vec![Some(5.0)]);
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let err = parse_structured_data(&json!("")).unwrap_err();
        assert!(matches!(err, TrendlensError::MalformedResponse(_)));
        assert!(parse_structured_data(&json!({"Week": 1})).is_err());
    }

    #[test]
    fn test_parse_reads_backend_keys() {
        let points = parse_structured_data(&json!([
            {"Trend Name": "organic", "Week": 1, "Trend Score": 4.5},
            {"Trend Name": "organic", "Week": 2, "Trend Score": 5}
        ]))
        .unwrap();

        assert_eq!(points, vec![point("organic", 1.0, 4.5), point("organic", 2.0, 5.0)]);
    }

    #[test]
    fn test_parse_rejects_bad_row() {
        let err = parse_structured_data(&json!([{"Trend Name": "x"}])).unwrap_err();
        assert!(err.to_string().contains("structured_data[0]"));
    }

    #[test]
    fn test_segments_split_on_gaps() {
        let series = ChartSeries {
            label: "A".into(),
            points: vec![Some(1.0), Some(2.0), None, Some(4.0), None],
        };
        assert_eq!(
            series.segments(),
            vec![vec![(0.0, 1.0), (1.0, 2.0)], vec![(3.0, 4.0)]]
        );
    }

    #[test]
    fn test_score_bounds_and_labels() {
        let set = build_series(&[point("A", 1.0, 3.0), point("B", 1.5, -1.0)]);
        assert_eq!(set.score_bounds(), Some((-1.0, 3.0)));
        assert_eq!(SeriesSet::week_label(1.0), "1");
        assert_eq!(SeriesSet::week_label(1.5), "1.5");
    }
}
