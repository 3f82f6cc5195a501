// Repository trait for read-only telemetry access
use crate::domain::telemetry::HourlySpeed;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

#[async_trait]
pub trait TelemetryRepository: Send + Sync {
    /// Total number of stored position samples
    async fn count_samples(&self) -> anyhow::Result<u64>;

    /// Total number of stored schedules
    async fn count_schedules(&self) -> anyhow::Result<u64>;

    /// Average speed and count per wall-clock hour for samples at or after `start`,
    /// keyed by the hour-truncated timestamp
    async fn avg_speed_by_hour(
        &self,
        start: DateTime<Utc>,
    ) -> anyhow::Result<HashMap<DateTime<Utc>, HourlySpeed>>;

    /// Sample counts per train class for samples at or after `start`.
    /// `None` covers samples whose train is unregistered or unclassified.
    async fn count_by_class(&self, start: DateTime<Utc>) -> anyhow::Result<Vec<(Option<String>, u64)>>;

    /// Most active sections since `start`, busiest first, ties in store order
    async fn top_sections_by_activity(
        &self,
        start: DateTime<Utc>,
        limit: usize,
    ) -> anyhow::Result<Vec<String>>;

    /// Samples for `section_id` with `start <= timestamp < end`
    async fn count_in_range(
        &self,
        section_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> anyhow::Result<u64>;
}
