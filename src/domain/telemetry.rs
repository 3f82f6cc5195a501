// Telemetry domain models - raw position samples and train registry entries
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A single positional report from a moving train.
#[derive(Debug, Clone, Deserialize)]
pub struct PositionSample {
    pub train_id: String,
    pub section_id: String,
    pub timestamp: DateTime<Utc>,
    /// Speed in km/h, never negative
    #[serde(alias = "speed_kmph")]
    pub speed: f64,
}

impl PositionSample {
    pub fn new(
        train_id: impl Into<String>,
        section_id: impl Into<String>,
        timestamp: DateTime<Utc>,
        speed: f64,
    ) -> Self {
        Self {
            train_id: train_id.into(),
            section_id: section_id.into(),
            timestamp,
            speed,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Train {
    pub id: String,
    #[serde(default)]
    pub class_type: Option<String>,
}

impl Train {
    pub fn new(id: impl Into<String>, class_type: Option<&str>) -> Self {
        Self {
            id: id.into(),
            class_type: class_type.map(str::to_string),
        }
    }
}

/// Average speed and sample count for one wall-clock hour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlySpeed {
    pub avg_speed: f64,
    pub count: u64,
}

impl HourlySpeed {
    pub fn new(avg_speed: f64, count: u64) -> Self {
        Self { avg_speed, count }
    }
}
