// Delay proxy - Synthesizes a 0-10 delay score from relative average speed
//
// No ground-truth delay exists in the telemetry, so slower buckets are scored
// as more delayed. The proxy is a plain function so a real metric can replace it
// without touching the bucketing in the report service.

/// Maps a bucket's average speed and the window's peak bucket speed to an index
pub type DelayProxy = fn(avg_speed: f64, max_speed: f64) -> f64;

/// Peak speed used when no bucket holds data
pub const EMPTY_WINDOW_MAX_SPEED: f64 = 1.0;

/// `10 * (1 - avg / max)` rounded to two decimals. A zero peak counts as full speed.
pub fn speed_drop_index(avg_speed: f64, max_speed: f64) -> f64 {
    let ratio = if max_speed != 0.0 {
        avg_speed / max_speed
    } else {
        1.0
    };
    round_to_hundredths(10.0 * (1.0 - ratio))
}

/// Largest bucket average, or [`EMPTY_WINDOW_MAX_SPEED`] when there are none
pub fn max_bucket_speed<I>(averages: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    averages
        .into_iter()
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
        .unwrap_or(EMPTY_WINDOW_MAX_SPEED)
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
