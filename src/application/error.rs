// Report errors - Rejected parameters and store failures
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{name} must be between {min} and {max}, got {value}")]
    InvalidParameter {
        name: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("telemetry store unavailable: {0}")]
    StoreUnavailable(#[source] anyhow::Error),
}

impl ReportError {
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, ReportError::InvalidParameter { .. })
    }
}

impl From<anyhow::Error> for ReportError {
    fn from(err: anyhow::Error) -> Self {
        ReportError::StoreUnavailable(err)
    }
}

/// Reject `value` unless it lies in `[min, max]`.
pub fn ensure_in_range(name: &'static str, value: i64, min: i64, max: i64) -> Result<(), ReportError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ReportError::InvalidParameter {
            name,
            value,
            min,
            max,
        })
    }
}
