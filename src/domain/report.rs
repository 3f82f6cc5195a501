// Report domain models - chart-ready aggregates returned to the reporting layer
use serde::Serialize;

/// Label used when a sample's train is missing or has no class.
pub const UNKNOWN_CLASS: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSnapshot {
    pub throughput_per_hour: u64,
    pub avg_delay_minutes: f64,
    pub congestion_index: f64,
    pub on_time_percentage: f64,
    pub positions_count: u64,
    pub schedules_count: u64,
}

/// Delay index per bucket, `labels` and `series` always have equal length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub labels: Vec<String>,
    pub series: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassCount {
    pub label: String,
    pub value: u64,
}

impl ClassCount {
    pub fn new(label: impl Into<String>, value: u64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassBreakdown {
    pub data: Vec<ClassCount>,
}

impl ClassBreakdown {
    pub fn new(data: Vec<ClassCount>) -> Self {
        Self { data }
    }

    /// Count for a label, if present
    pub fn value_of(&self, label: &str) -> Option<u64> {
        self.data.iter().find(|c| c.label == label).map(|c| c.value)
    }
}

/// Section x time-bucket activity matrix, `data[s][b]` is the event count
/// for `y_labels[s]` in bucket `x_labels[b]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotGrid {
    pub x_labels: Vec<String>,
    pub y_labels: Vec<String>,
    pub data: Vec<Vec<u64>>,
}

impl HotspotGrid {
    pub fn new(x_labels: Vec<String>, y_labels: Vec<String>, data: Vec<Vec<u64>>) -> Self {
        Self {
            x_labels,
            y_labels,
            data,
        }
    }

    pub fn is_all_zero(&self) -> bool {
        self.data.iter().all(|row| row.iter().all(|&v| v == 0))
    }
}
