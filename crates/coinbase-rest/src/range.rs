//! Time range chunking for historical candle requests
//!
//! The exchange rejects candle requests that would return more than 300
//! buckets. [`TimeRange::chunks`] splits a range into windows that each stay
//! under that limit. Windows are contiguous: every window starts where the
//! previous one ended, and the last one ends exactly at the range end.

use chrono::{DateTime, Duration, Utc};

use crate::error::{RestError, RestResult};

/// Maximum number of candles the exchange returns per request
pub const MAX_CANDLES_PER_REQUEST: u32 = 300;

/// A historical data window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    /// Window start (inclusive)
    pub start: DateTime<Utc>,
    /// Window end
    pub end: DateTime<Utc>,
    /// Bucket width in seconds
    pub granularity: u32,
}

impl TimeRange {
    /// Create a validated range
    ///
    /// # Errors
    /// Returns [`RestError::InvalidRange`] if `start > end` or the
    /// granularity is zero.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, granularity: u32) -> RestResult<Self> {
        if granularity == 0 {
            return Err(RestError::InvalidRange(
                "granularity must be greater than zero".to_string(),
            ));
        }
        if start > end {
            return Err(RestError::InvalidRange(format!(
                "start {} is after end {}",
                start, end
            )));
        }

        Ok(Self {
            start,
            end,
            granularity,
        })
    }

    /// Length of the range
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Number of whole buckets the range spans
    pub fn bucket_count(&self) -> i64 {
        self.duration().num_seconds() / i64::from(self.granularity)
    }

    /// Split into windows of at most [`MAX_CANDLES_PER_REQUEST`] buckets
    pub fn chunks(&self) -> TimeRangeChunks {
        // 300 * u32::MAX seconds is well inside the Duration range
        let step = window_step(MAX_CANDLES_PER_REQUEST, self.granularity).unwrap_or(Duration::MAX);
        TimeRangeChunks::new(*self, step)
    }

    /// Split into windows of at most `max_points` buckets
    ///
    /// # Errors
    /// Returns [`RestError::InvalidRange`] if `max_points` is zero or the
    /// window span `max_points * granularity` does not fit in a [`Duration`].
    pub fn chunks_of(&self, max_points: u32) -> RestResult<TimeRangeChunks> {
        if max_points == 0 {
            return Err(RestError::InvalidRange(
                "max_points must be greater than zero".to_string(),
            ));
        }

        let step = window_step(max_points, self.granularity).ok_or_else(|| {
            RestError::InvalidRange(format!(
                "window of {} buckets of {}s is out of range",
                max_points, self.granularity
            ))
        })?;

        Ok(TimeRangeChunks::new(*self, step))
    }
}

/// Span of `max_points` buckets, `None` when it overflows
fn window_step(max_points: u32, granularity: u32) -> Option<Duration> {
    i64::from(max_points)
        .checked_mul(i64::from(granularity))
        .and_then(Duration::try_seconds)
}

/// Lazy iterator over the windows of a [`TimeRange`]
///
/// Cloning the iterator restarts from the clone point; calling
/// [`TimeRange::chunks`] again restarts from the beginning.
#[derive(Debug, Clone)]
pub struct TimeRangeChunks {
    range: TimeRange,
    step: Duration,
    cursor: Option<DateTime<Utc>>,
}

impl TimeRangeChunks {
    fn new(range: TimeRange, step: Duration) -> Self {
        Self {
            range,
            step,
            cursor: Some(range.start),
        }
    }

    /// Maximum span of a single window
    pub fn max_span(&self) -> Duration {
        self.step
    }
}

impl Iterator for TimeRangeChunks {
    type Item = TimeRange;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.cursor?;

        let end = if self.range.end - start <= self.step {
            self.range.end
        } else {
            start + self.step
        };

        self.cursor = if end >= self.range.end { None } else { Some(end) };

        Some(TimeRange {
            start,
            end,
            granularity: self.range.granularity,
        })
    }
}
