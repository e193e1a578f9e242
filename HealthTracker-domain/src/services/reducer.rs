//! Pure views derived from append-ordered reading sequences
//!
//! Nothing here sorts by date. "Latest" and "trailing" always mean latest in
//! append order, so a back-dated reading entered today still counts as the
//! newest entry.

use serde::Serialize;

use crate::entities::sugar::{SugarCategory, SugarReading};

/// Line tension handed to the chart renderer (light linear smoothing)
pub const LINE_TENSION: f64 = 0.1;

/// For each subcategory, the value of the last matching entry in append order
///
/// Subcategories with no matching entry map to `None`. The result follows the
/// order of `subcategories`.
pub fn latest_by_subcategory<T, K, V>(
    readings: &[T],
    subcategories: &[K],
    key_fn: impl Fn(&T) -> K,
    value_fn: impl Fn(&T) -> V,
) -> Vec<(K, Option<V>)>
where
    K: PartialEq + Clone,
{
    subcategories
        .iter()
        .map(|subcategory| {
            let latest = readings
                .iter()
                .rev()
                .find(|reading| key_fn(*reading) == *subcategory)
                .map(&value_fn);
            (subcategory.clone(), latest)
        })
        .collect()
}

/// Latest sugar level for every sugar category, in chart order
pub fn latest_sugar_levels(readings: &[SugarReading]) -> Vec<(SugarCategory, Option<f64>)> {
    latest_by_subcategory(readings, &SugarCategory::ALL, |r| r.category, |r| r.level)
}

/// The last `n` entries in their existing order, or all of them if there are fewer
pub fn trailing_window<T>(readings: &[T], n: usize) -> &[T] {
    &readings[readings.len().saturating_sub(n)..]
}

/// Parallel label and value sequences for plotting
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }
}

/// Map readings onto a chart series, keeping their order
pub fn to_chart_series<T>(
    readings: &[T],
    label_fn: impl Fn(&T) -> String,
    value_fn: impl Fn(&T) -> f64,
) -> ChartSeries {
    ChartSeries {
        labels: readings.iter().map(label_fn).collect(),
        values: readings.iter().map(value_fn).collect(),
    }
}

/// One plotted line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDataset {
    pub label: String,
    pub values: Vec<f64>,
    pub tension: f64,
}

/// A line chart: shared x-axis labels plus one or more datasets
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LineChart {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

impl LineChart {
    /// Start a chart from a series; the series labels become the x-axis
    pub fn from_series(label: impl Into<String>, series: ChartSeries) -> Self {
        Self {
            labels: series.labels,
            datasets: vec![ChartDataset {
                label: label.into(),
                values: series.values,
                tension: LINE_TENSION,
            }],
        }
    }

    /// Add another dataset over the same x-axis
    pub fn with_dataset(mut self, label: impl Into<String>, values: Vec<f64>) -> Self {
        self.datasets.push(ChartDataset {
            label: label.into(),
            values,
            tension: LINE_TENSION,
        });
        self
    }

    /// Values of the dataset with the given label
    pub fn dataset(&self, label: &str) -> Option<&[f64]> {
        self.datasets
            .iter()
            .find(|dataset| dataset.label == label)
            .map(|dataset| dataset.values.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sugar(category: SugarCategory, level: f64) -> SugarReading {
        SugarReading {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            category,
            level,
        }
    }

    #[test]
    fn test_latest_is_last_in_append_order() {
        let readings = vec![
            sugar(SugarCategory::Fasting, 90.0),
            sugar(SugarCategory::Fasting, 110.0),
            sugar(SugarCategory::AfterLunch, 140.0),
        ];

        let latest = latest_sugar_levels(&readings);
        assert_eq!(
            latest,
            vec![
                (SugarCategory::Fasting, Some(110.0)),
                (SugarCategory::AfterBreakfast, None),
                (SugarCategory::AfterLunch, Some(140.0)),
                (SugarCategory::AfterDinner, None),
            ]
        );
    }

    #[test]
    fn test_latest_ignores_dates() {
        let mut later = sugar(SugarCategory::Fasting, 95.0);
        later.date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut backdated = sugar(SugarCategory::Fasting, 130.0);
        backdated.date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();

        let latest = latest_sugar_levels(&[later, backdated]);
        assert_eq!(latest[0], (SugarCategory::Fasting, Some(130.0)));
    }

    #[test]
    fn test_latest_on_empty_input() {
        let latest = latest_by_subcategory(&[] as &[SugarReading], &["a", "b"], |_| "a", |r| r.level);
        assert_eq!(latest, vec![("a", None), ("b", None)]);
    }

    #[test]
    fn test_trailing_window_shorter_than_n() {
        let readings = vec![1, 2, 3];
        assert_eq!(trailing_window(&readings, 7), &[1, 2, 3]);
    }

    #[test]
    fn test_trailing_window_takes_last_n() {
        let readings: Vec<u32> = (1..=10).collect();
        assert_eq!(trailing_window(&readings, 7), &[4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_trailing_window_edges() {
        let empty: Vec<u32> = Vec::new();
        assert!(trailing_window(&empty, 7).is_empty());
        assert!(trailing_window(&[1, 2], 0).is_empty());
    }

    #[test]
    fn test_chart_series_keeps_order() {
        let readings = vec![
            sugar(SugarCategory::AfterDinner, 150.0),
            sugar(SugarCategory::Fasting, 92.0),
        ];

        let series = to_chart_series(&readings, |r| r.category.to_string(), |r| r.level);
        assert_eq!(series.labels, vec!["After dinner", "Fasting"]);
        assert_eq!(series.values, vec![150.0, 92.0]);
    }

    #[test]
    fn test_chart_series_empty() {
        let series = to_chart_series(&[] as &[SugarReading], |r| r.date.to_string(), |r| r.level);
        assert!(series.is_empty());
        assert_eq!(series.len(), 0);
    }

    #[test]
    fn test_line_chart_datasets_share_labels() {
        let series = ChartSeries {
            labels: vec!["2024-01-01".to_string()],
            values: vec![120.0],
        };

        let chart = LineChart::from_series("Systolic", series).with_dataset("Diastolic", vec![80.0]);
        assert_eq!(chart.labels.len(), 1);
        assert_eq!(chart.dataset("Systolic"), Some(&[120.0][..]));
        assert_eq!(chart.dataset("Diastolic"), Some(&[80.0][..]));
        assert_eq!(chart.datasets[0].tension, LINE_TENSION);
        assert_eq!(chart.dataset("Pulse"), None);
    }
}
