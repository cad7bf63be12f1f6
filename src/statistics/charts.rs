//! Chart-ready JSON for the price histogram and category distribution.

use serde::Serialize;

/// Fill colours cycled over the chart's data points.
const BACKGROUND_COLORS: [&str; 2] = ["rgba(255, 99, 132, 0.2)", "rgba(54, 162, 235, 0.2)"];
/// Border colours cycled over the chart's data points.
const BORDER_COLORS: [&str; 2] = ["rgba(255, 99, 132, 1)", "rgba(54, 162, 235, 1)"];

/// Labels and one dataset, in the shape expected by common JavaScript charting libraries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    /// One label per data point.
    pub labels: Vec<String>,
    /// The chart's datasets. Always exactly one.
    pub datasets: Vec<Dataset>,
}

/// A labelled series of counts and its styling.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// The name of the series.
    pub label: &'static str,
    /// The count for each label, in the same order as the labels.
    pub data: Vec<u64>,
    /// Fill colours, cycled over the data points by the client.
    pub background_color: [&'static str; 2],
    /// Border colours, cycled over the data points by the client.
    pub border_color: [&'static str; 2],
    /// Border width in pixels.
    pub border_width: u32,
}

impl ChartData {
    fn single_series<L>(label: &'static str, points: impl IntoIterator<Item = (L, u64)>) -> Self
    where
        L: Into<String>,
    {
        let (labels, data): (Vec<String>, Vec<u64>) = points
            .into_iter()
            .map(|(point_label, count)| (point_label.into(), count))
            .unzip();

        Self {
            labels,
            datasets: vec![Dataset {
                label,
                data,
                background_color: BACKGROUND_COLORS,
                border_color: BORDER_COLORS,
                border_width: 1,
            }],
        }
    }
}

/// Chart data for the price histogram.
pub fn bar_chart(histogram: Vec<(&'static str, u64)>) -> ChartData {
    ChartData::single_series("Price Distribution", histogram)
}

/// Chart data for the number of transactions per category.
pub fn pie_chart(categories: Vec<(String, u64)>) -> ChartData {
    ChartData::single_series("Category Distribution", categories)
}
