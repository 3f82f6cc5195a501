// Window resolver - Look-back windows and their bucket plans
//
// Two bucketing strategies coexist: the delay trend walks wall-clock hours,
// the hotspot grid splits the window into equal window-relative slices.
use crate::application::error::{ensure_in_range, ReportError};
use chrono::{DateTime, Duration, Timelike, Utc};

pub const MIN_HOURS: i64 = 1;
pub const MAX_HOURS: i64 = 168;
pub const MIN_BUCKETS: i64 = 2;
pub const MAX_BUCKETS: i64 = 24;

const MICROS_PER_HOUR: f64 = 3_600_000_000.0;

/// The absolute interval `[start, end]` covered by a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub hours: u32,
}

/// One window-relative slice, counted over `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeBucket {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub label: String,
}

impl ReportWindow {
    /// Window of `hours` ending at `now`
    pub fn resolve(hours: i64, now: DateTime<Utc>) -> Result<Self, ReportError> {
        ensure_in_range("hours", hours, MIN_HOURS, MAX_HOURS)?;
        Ok(Self {
            start: now - Duration::hours(hours),
            end: now,
            hours: hours as u32,
        })
    }

    /// Hour boundaries from the top of the hour containing `start`, stepping one
    /// hour while the boundary is not after `end`.
    pub fn hour_aligned_buckets(&self) -> Vec<DateTime<Utc>> {
        let mut boundaries = Vec::with_capacity(self.hours as usize + 1);
        let mut t = truncate_to_hour(self.start);
        while t <= self.end {
            boundaries.push(t);
            t += Duration::hours(1);
        }
        boundaries
    }

    /// `count` equal slices of the window. The last slice ends exactly at `end`
    /// and is labelled with `end`'s time.
    pub fn fixed_buckets(&self, count: usize) -> Vec<TimeBucket> {
        let step = bucket_step(self.hours, count);

        let mut starts = Vec::with_capacity(count);
        let mut t = self.start;
        for _ in 0..count {
            starts.push(t);
            t += step;
        }

        starts
            .iter()
            .enumerate()
            .map(|(i, &start)| match starts.get(i + 1) {
                Some(&next) => TimeBucket {
                    start,
                    end: next,
                    label: format_label(start),
                },
                None => TimeBucket {
                    start,
                    end: self.end,
                    label: format_label(self.end),
                },
            })
            .collect()
    }
}

/// Validate a hotspot bucket count
pub fn validate_bucket_count(buckets: i64) -> Result<usize, ReportError> {
    ensure_in_range("buckets", buckets, MIN_BUCKETS, MAX_BUCKETS)?;
    Ok(buckets as usize)
}

/// `hours / count` hours at microsecond resolution
fn bucket_step(hours: u32, count: usize) -> Duration {
    if count == 0 {
        return Duration::zero();
    }
    let micros = (f64::from(hours) * MICROS_PER_HOUR / count as f64).round() as i64;
    Duration::microseconds(micros)
}

pub fn truncate_to_hour(t: DateTime<Utc>) -> DateTime<Utc> {
    let into_hour = Duration::seconds(i64::from(t.minute()) * 60 + i64::from(t.second()))
        + Duration::nanoseconds(i64::from(t.nanosecond()));
    t - into_hour
}

/// `HH:MM` in UTC
pub fn format_label(t: DateTime<Utc>) -> String {
    t.format("%H:%M").to_string()
}
