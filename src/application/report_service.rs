// Report service - KPI, delay trend, throughput and hotspot aggregation
use crate::application::delay_index::{max_bucket_speed, speed_drop_index, DelayProxy};
use crate::application::error::{ensure_in_range, ReportError};
use crate::application::telemetry_repository::TelemetryRepository;
use crate::application::window::{format_label, validate_bucket_count, ReportWindow};
use crate::domain::report::{ClassBreakdown, ClassCount, HotspotGrid, KpiSnapshot, TrendSeries, UNKNOWN_CLASS};
use crate::infrastructure::config::KpiPlaceholders;
use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use std::sync::Arc;

pub const MIN_TOP_SECTIONS: i64 = 1;
pub const MAX_TOP_SECTIONS: i64 = 12;

/// Coarse throughput proxy: sample count modulo this value
const THROUGHPUT_MODULUS: u64 = 50;

const FALLBACK_CLASSES: [(&str, u64); 3] = [("Express", 100), ("Freight", 80), ("Local", 90)];

/// Section labels ranked when the window has no activity at all
const PLACEHOLDER_SECTIONS: [&str; 4] = ["S1", "S2", "S3", "S4"];

const FALLBACK_GRID_X: [&str; 5] = ["A", "B", "C", "D", "E"];
const FALLBACK_GRID: [[u64; 5]; 4] = [
    [1, 2, 3, 2, 4],
    [2, 3, 5, 1, 2],
    [0, 1, 2, 3, 1],
    [3, 4, 2, 5, 4],
];

#[derive(Clone)]
pub struct ReportService {
    repository: Arc<dyn TelemetryRepository>,
    kpi: KpiPlaceholders,
    delay_proxy: DelayProxy,
}

impl ReportService {
    pub fn new(repository: Arc<dyn TelemetryRepository>, kpi: KpiPlaceholders) -> Self {
        Self {
            repository,
            kpi,
            delay_proxy: speed_drop_index,
        }
    }

    /// Replace the speed-based delay proxy
    pub fn with_delay_proxy(mut self, delay_proxy: DelayProxy) -> Self {
        self.delay_proxy = delay_proxy;
        self
    }

    /// Counts over the whole store, not windowed
    pub async fn kpis(&self) -> Result<KpiSnapshot, ReportError> {
        let positions_count = self.repository.count_samples().await?;
        let schedules_count = self.repository.count_schedules().await?;

        Ok(KpiSnapshot {
            throughput_per_hour: positions_count % THROUGHPUT_MODULUS,
            avg_delay_minutes: self.kpi.avg_delay_minutes,
            congestion_index: self.kpi.congestion_index,
            on_time_percentage: self.kpi.on_time_percentage,
            positions_count,
            schedules_count,
        })
    }

    /// Delay index per wall-clock hour. Empty hours are real output, never replaced.
    pub async fn delay_trends(&self, hours: i64, now: DateTime<Utc>) -> Result<TrendSeries, ReportError> {
        let window = ReportWindow::resolve(hours, now)?;
        let by_hour = self.repository.avg_speed_by_hour(window.start).await?;

        let max_speed = max_bucket_speed(by_hour.values().map(|h| h.avg_speed));
        let boundaries = window.hour_aligned_buckets();

        tracing::debug!(
            "Delay trend over {}h: {} buckets, {} with data, max speed {}",
            hours,
            boundaries.len(),
            by_hour.len(),
            max_speed
        );

        let (labels, series): (Vec<String>, Vec<f64>) = boundaries
            .into_iter()
            .map(|t| {
                let avg_speed = by_hour.get(&t).map(|h| h.avg_speed).unwrap_or(0.0);
                (format_label(t), (self.delay_proxy)(avg_speed, max_speed))
            })
            .unzip();

        Ok(TrendSeries { labels, series })
    }

    /// Sample counts per train class, with a fixed breakdown when the window is empty
    pub async fn throughput(&self, hours: i64, now: DateTime<Utc>) -> Result<ClassBreakdown, ReportError> {
        let window = ReportWindow::resolve(hours, now)?;
        let rows = self.repository.count_by_class(window.start).await?;

        let mut data: Vec<ClassCount> = Vec::with_capacity(rows.len());
        for (class, count) in rows {
            // Unclassified rows and a literal "Unknown" class share one entry
            let label = class.unwrap_or_else(|| UNKNOWN_CLASS.to_string());
            match data.iter_mut().find(|c| c.label == label) {
                Some(existing) => existing.value += count,
                None => data.push(ClassCount::new(label, count)),
            }
        }

        if data.is_empty() {
            tracing::info!("No position samples in last {}h, using fallback throughput", hours);
            data = FALLBACK_CLASSES
                .iter()
                .map(|&(label, value)| ClassCount::new(label, value))
                .collect();
        }

        Ok(ClassBreakdown::new(data))
    }

    /// Section x bucket activity for the busiest sections. An all-zero grid is
    /// replaced, labels included, by a fixed illustrative grid.
    pub async fn hotspots(
        &self,
        hours: i64,
        top_sections: i64,
        buckets: i64,
        now: DateTime<Utc>,
    ) -> Result<HotspotGrid, ReportError> {
        let window = ReportWindow::resolve(hours, now)?;
        ensure_in_range("top_sections", top_sections, MIN_TOP_SECTIONS, MAX_TOP_SECTIONS)?;
        let top_sections = top_sections as usize;
        let buckets = validate_bucket_count(buckets)?;

        let grid = self.scan_hotspots(&window, top_sections, buckets).await?;
        if grid.is_all_zero() {
            tracing::info!("No section activity in last {}h, using fallback hotspot grid", hours);
            return Ok(fallback_grid(top_sections, buckets));
        }

        Ok(grid)
    }

    async fn scan_hotspots(
        &self,
        window: &ReportWindow,
        top_sections: usize,
        buckets: usize,
    ) -> Result<HotspotGrid, ReportError> {
        let mut y_labels = self
            .repository
            .top_sections_by_activity(window.start, top_sections)
            .await?;
        if y_labels.is_empty() {
            y_labels = PLACEHOLDER_SECTIONS.iter().map(|s| s.to_string()).collect();
        }

        let plan = window.fixed_buckets(buckets);
        tracing::debug!(
            "Hotspot scan: {} sections x {} buckets from {}",
            y_labels.len(),
            plan.len(),
            window.start
        );

        let mut data = Vec::with_capacity(y_labels.len());
        for section in &y_labels {
            let row = try_join_all(
                plan.iter()
                    .map(|b| self.repository.count_in_range(section, b.start, b.end)),
            )
            .await?;
            data.push(row);
        }

        let x_labels = plan.into_iter().map(|b| b.label).collect();
        Ok(HotspotGrid::new(x_labels, y_labels, data))
    }
}

fn fallback_grid(top_sections: usize, buckets: usize) -> HotspotGrid {
    let x_labels = FALLBACK_GRID_X
        .iter()
        .take(buckets)
        .map(|s| s.to_string())
        .collect();
    let y_labels = PLACEHOLDER_SECTIONS
        .iter()
        .take(top_sections)
        .map(|s| s.to_string())
        .collect();
    let data = FALLBACK_GRID
        .iter()
        .take(top_sections)
        .map(|row| row.iter().take(buckets).copied().collect())
        .collect();

    HotspotGrid::new(x_labels, y_labels, data)
}
